//! linechart-rs: layout and interaction core for animated line charts.
//!
//! Turns keyed numeric series into pixel-space geometry: per-unit y-scales on
//! a shared x-scale, axis ticks and gutters, projected points, cached paths,
//! nearest-point tooltips and marker-line shading. Drawing is left to a
//! `render::Renderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartLayout, ChartLayoutConfig};
pub use error::{ChartError, ChartResult};

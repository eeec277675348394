use chrono::{DateTime, Utc};
#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::primitives::finite_or_zero;
use crate::core::{Line, PlotArea, ScaleSet, UnitScale, Viewport, XDomain};

/// Left/right pixel margins reserved for y-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisGutters {
    pub left: f64,
    pub right: f64,
}

/// A projected point that keeps the data it came from for tooltip display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighlightPoint {
    /// Pixel-space x.
    pub x: f64,
    /// Pixel-space y.
    pub y: f64,
    /// Original data x.
    pub data_x: f64,
    /// Original data y.
    pub value: f64,
    #[serde(default)]
    pub origin: Option<DateTime<Utc>>,
}

/// Shared linear mapping from data x to pixel x.
///
/// `pixel = x * x_scale - x_offset + left_gutter`; a zero-width domain yields
/// non-finite intermediates that `project` clamps to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XProjection {
    pub x_scale: f64,
    pub x_offset: f64,
    pub left_gutter: f64,
}

impl XProjection {
    /// Returns `None` when the domain has no data.
    #[must_use]
    pub fn new(domain: XDomain, viewport: Viewport, gutters: AxisGutters) -> Option<Self> {
        let (min_x, max_x) = domain.bounds()?;
        let width = (f64::from(viewport.width) - gutters.left - gutters.right).max(0.0);
        let x_scale = width / (max_x - min_x);
        Some(Self {
            x_scale,
            x_offset: min_x * x_scale,
            left_gutter: gutters.left.clamp(0.0, f64::from(viewport.width)),
        })
    }

    #[must_use]
    pub fn project(self, x: f64) -> f64 {
        finite_or_zero((x * self.x_scale) - self.x_offset + self.left_gutter)
    }
}

/// Maps a data value of one unit to pixel y.
#[must_use]
pub fn project_y(value: f64, scale: UnitScale, viewport: Viewport, axis_offset_bottom_px: f64) -> f64 {
    let baseline = (f64::from(viewport.height) - axis_offset_bottom_px).max(0.0);
    finite_or_zero(baseline - ((value - scale.min_y) * scale.y_scale))
}

/// Data rectangle inside the viewport.
///
/// Gutters or an axis offset larger than the viewport collapse the area to
/// zero width or height at the canvas edge instead of inverting it.
#[must_use]
pub fn plot_area(viewport: Viewport, gutters: AxisGutters, axis_offset_bottom_px: f64) -> PlotArea {
    let width = f64::from(viewport.width);
    let left = gutters.left.clamp(0.0, width);
    PlotArea {
        left,
        top: 0.0,
        right: (width - gutters.right).clamp(left, width),
        bottom: (f64::from(viewport.height) - axis_offset_bottom_px).max(0.0),
    }
}

/// Projects one line into pixel space.
///
/// Lines whose unit is missing from the scale set project to an empty series.
#[must_use]
pub fn project_line(
    line: &Line,
    scales: &ScaleSet,
    x_projection: Option<XProjection>,
    viewport: Viewport,
    axis_offset_bottom_px: f64,
) -> Vec<HighlightPoint> {
    let (Some(x_projection), Some(scale)) = (x_projection, scales.get(&line.unit)) else {
        return Vec::new();
    };

    line.points
        .iter()
        .map(|point| HighlightPoint {
            x: x_projection.project(point.x),
            y: project_y(point.y, *scale, viewport, axis_offset_bottom_px),
            data_x: point.x,
            value: point.y,
            origin: point.origin,
        })
        .collect()
}

/// Projects every line, indexed like the input.
#[must_use]
pub fn project_lines(
    lines: &[Line],
    scales: &ScaleSet,
    domain: XDomain,
    viewport: Viewport,
    gutters: AxisGutters,
    axis_offset_bottom_px: f64,
) -> Vec<Vec<HighlightPoint>> {
    let x_projection = XProjection::new(domain, viewport, gutters);

    #[cfg(feature = "parallel-projection")]
    {
        lines
            .par_iter()
            .map(|line| project_line(line, scales, x_projection, viewport, axis_offset_bottom_px))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        lines
            .iter()
            .map(|line| project_line(line, scales, x_projection, viewport, axis_offset_bottom_px))
            .collect()
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One data sample.
///
/// `origin` is set when the sample was ingested from a date key; `x` then
/// holds the same instant as Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub origin: Option<DateTime<Utc>>,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, origin: None }
    }

    #[must_use]
    pub fn at_time(time: DateTime<Utc>, y: f64) -> Self {
        Self {
            x: datetime_to_unix_seconds(time),
            y,
            origin: Some(time),
        }
    }
}

/// A labeled series sharing a y-scale with every other line of the same unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub points: Vec<DataPoint>,
    pub unit: String,
    pub color: Color,
    #[serde(default)]
    pub is_marker_line: bool,
}

impl Line {
    #[must_use]
    pub fn new(points: Vec<DataPoint>, unit: impl Into<String>, color: Color) -> Self {
        Self {
            points,
            unit: unit.into(),
            color,
            is_marker_line: false,
        }
    }

    #[must_use]
    pub fn with_marker(mut self, is_marker_line: bool) -> Self {
        self.is_marker_line = is_marker_line;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Global x-range across all lines. Both ends are `None` when no line has data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct XDomain {
    pub from: Option<f64>,
    pub to: Option<f64>,
}

impl XDomain {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bounds(self) -> Option<(f64, f64)> {
        Some((self.from?, self.to?))
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.bounds().is_none()
    }

    pub(crate) fn include(&mut self, x: f64) {
        self.from = Some(self.from.map_or(x, |from| from.min(x)));
        self.to = Some(self.to.map_or(x, |to| to.max(x)));
    }
}

/// Pixel rectangle left for data once axis gutters are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }
}

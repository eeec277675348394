use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Line;
use crate::error::{ChartError, ChartResult};

/// Tuning controls for per-unit y-scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTuning {
    /// Share of the plot height the data span occupies (the rest is headroom).
    pub effective_height_ratio: f64,
    /// Pixels reserved at the bottom of the viewport for the x-axis.
    pub axis_offset_bottom_px: f64,
    pub y_tick_intervals: u32,
}

impl Default for ScaleTuning {
    fn default() -> Self {
        Self {
            effective_height_ratio: 5.0 / 6.0,
            axis_offset_bottom_px: 20.0,
            y_tick_intervals: 5,
        }
    }
}

impl ScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.effective_height_ratio.is_finite()
            || self.effective_height_ratio <= 0.0
            || self.effective_height_ratio > 1.0
        {
            return Err(ChartError::InvalidData(
                "effective height ratio must be finite and in (0, 1]".to_owned(),
            ));
        }
        if !self.axis_offset_bottom_px.is_finite() || self.axis_offset_bottom_px < 0.0 {
            return Err(ChartError::InvalidData(
                "axis bottom offset must be finite and >= 0".to_owned(),
            ));
        }
        if self.y_tick_intervals == 0 {
            return Err(ChartError::InvalidData(
                "y tick intervals must be >= 1".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Which vertical axis renders a unit's ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSide {
    Left,
    Right,
}

/// Y-scale parameters shared by every line of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    pub min_y: f64,
    pub max_y: f64,
    /// Pixels per data unit. Non-finite when `min_y == max_y`.
    pub y_scale: f64,
    pub y_tick: f64,
    pub axis: Option<AxisSide>,
}

impl UnitScale {
    #[must_use]
    pub fn span(self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.span() > 0.0) || !self.y_scale.is_finite()
    }
}

/// Per-unit scales keyed in first-seen unit order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleSet {
    units: IndexMap<String, UnitScale>,
}

impl ScaleSet {
    #[must_use]
    pub fn get(&self, unit: &str) -> Option<&UnitScale> {
        self.units.get(unit)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UnitScale)> {
        self.units.iter().map(|(unit, scale)| (unit.as_str(), scale))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit rendered on the given axis side, if any.
    #[must_use]
    pub fn unit_on(&self, side: AxisSide) -> Option<(&str, &UnitScale)> {
        self.iter().find(|(_, scale)| scale.axis == Some(side))
    }
}

/// Folds every line into per-unit y-ranges and derives scale and tick step.
///
/// The first two units get the left and right axis; later units still scale
/// their lines but have no axis of their own.
#[must_use]
pub fn compute_scale_set(lines: &[Line], height_px: f64, tuning: ScaleTuning) -> ScaleSet {
    let mut ranges: IndexMap<String, (f64, f64)> = IndexMap::new();
    for line in lines {
        let Some(first) = line.points.first() else {
            continue;
        };
        let (line_min, line_max) = line
            .points
            .iter()
            .fold((first.y, first.y), |(min, max), point| {
                (min.min(point.y), max.max(point.y))
            });
        let entry = ranges
            .entry(line.unit.clone())
            .or_insert((line_min, line_max));
        entry.0 = entry.0.min(line_min);
        entry.1 = entry.1.max(line_max);
    }

    if ranges.len() > 2 {
        warn!(
            unit_count = ranges.len(),
            "only two units get a y-axis; remaining units are drawn without one"
        );
    }

    let usable_height = (height_px - tuning.axis_offset_bottom_px).max(0.0);
    let units = ranges
        .into_iter()
        .enumerate()
        .map(|(index, (unit, (min_y, max_y)))| {
            let span = max_y - min_y;
            let axis = match index {
                0 => Some(AxisSide::Left),
                1 => Some(AxisSide::Right),
                _ => None,
            };
            let scale = UnitScale {
                min_y,
                max_y,
                y_scale: (usable_height / span) * tuning.effective_height_ratio,
                y_tick: span / f64::from(tuning.y_tick_intervals),
                axis,
            };
            (unit, scale)
        })
        .collect();

    ScaleSet { units }
}

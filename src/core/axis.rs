use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::projection::{AxisGutters, XProjection, project_y};
use crate::core::{AxisSide, ScaleSet, UnitScale, Viewport, XDomain};
use crate::error::{ChartError, ChartResult};
use crate::render::{TextMeasurer, TextStyle};

/// How x tick values turn into label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XLabelFormat {
    /// Rounded integer of the raw x value.
    #[default]
    Integer,
    /// `strftime` pattern applied to x read as Unix seconds (UTC).
    DatePattern(String),
}

impl XLabelFormat {
    pub fn validate(&self) -> ChartResult<()> {
        if let Self::DatePattern(pattern) = self {
            if pattern.is_empty() {
                return Err(ChartError::InvalidData(
                    "x label date pattern must not be empty".to_owned(),
                ));
            }
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(ChartError::InvalidData(format!(
                    "invalid x label date pattern `{pattern}`"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    /// Pixel x for the x-axis, pixel y for y-axes.
    pub pixel: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XAxis {
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YAxis {
    pub unit: String,
    pub side: AxisSide,
    pub ticks: Vec<AxisTick>,
}

/// Settings shared by the axis builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLabelOptions<'a> {
    pub label_style: TextStyle,
    pub gutter_margin_px: f64,
    pub edge_padding_px: f64,
    pub y_tick_intervals: u32,
    pub x_tick_intervals: u32,
    pub x_label_format: &'a XLabelFormat,
    pub y_label_unit_suffix: bool,
}

/// Formats a y tick label with precision picked from the tick step.
///
/// Steps below 1 get two decimals with one trailing zero dropped, steps up to
/// 10 get one decimal, larger steps are rounded to integers.
#[must_use]
pub fn format_y_label(value: f64, tick: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let tick = tick.abs();
    let text = if tick < 1.0 {
        let mut text = format!("{value:.2}");
        if text.ends_with('0') {
            text.pop();
        }
        text
    } else if tick <= 10.0 {
        format!("{value:.1}")
    } else {
        format!("{}", value.round() as i64)
    };
    strip_negative_zero(text)
}

/// Drops the sign of labels that rounded to zero, e.g. `-0.0`.
fn strip_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|ch| ch == '0' || ch == '.') => rest.to_owned(),
        _ => text,
    }
}

#[must_use]
pub fn format_x_label(x: f64, format: &XLabelFormat) -> String {
    if !x.is_finite() {
        return "nan".to_owned();
    }
    let integer = || format!("{}", x.round() as i64);
    match format {
        XLabelFormat::Integer => integer(),
        XLabelFormat::DatePattern(pattern) => {
            let Some(time) = unix_seconds_to_datetime(x) else {
                return integer();
            };
            let mut out = String::new();
            if write!(out, "{}", time.format(pattern)).is_err() {
                return integer();
            }
            out
        }
    }
}

/// Evenly spaced values from `start` to `end` inclusive.
///
/// A zero-width range collapses to a single value.
#[must_use]
pub fn tick_values(start: f64, end: f64, intervals: u32) -> Vec<f64> {
    let span = end - start;
    if intervals == 0 || !(span.abs() > 0.0) {
        return vec![start];
    }
    let step = span / f64::from(intervals);
    (0..=intervals)
        .map(|index| start + step * f64::from(index))
        .collect()
}

fn y_labels(unit: &str, scale: UnitScale, options: &AxisLabelOptions<'_>) -> Vec<(f64, String)> {
    tick_values(scale.min_y, scale.max_y, options.y_tick_intervals)
        .into_iter()
        .map(|value| {
            let mut label = format_y_label(value, scale.y_tick);
            if options.y_label_unit_suffix {
                label.push(' ');
                label.push_str(unit);
            }
            (value, label)
        })
        .collect()
}

/// Sizes left/right gutters from the widest tick label of each axis.
///
/// Every label is measured once; a side without a unit gets the edge padding.
pub fn compute_gutters(
    scales: &ScaleSet,
    measurer: &dyn TextMeasurer,
    options: &AxisLabelOptions<'_>,
) -> AxisGutters {
    let side_width = |side: AxisSide| {
        let Some((unit, scale)) = scales.unit_on(side) else {
            return options.edge_padding_px;
        };
        let widest = y_labels(unit, *scale, options)
            .iter()
            .map(|(_, label)| measurer.measure(label, options.label_style).width)
            .fold(0.0_f64, f64::max);
        widest + options.gutter_margin_px
    };

    AxisGutters {
        left: side_width(AxisSide::Left),
        right: side_width(AxisSide::Right),
    }
}

#[must_use]
pub fn build_y_axes(
    scales: &ScaleSet,
    viewport: Viewport,
    axis_offset_bottom_px: f64,
    options: &AxisLabelOptions<'_>,
) -> Vec<YAxis> {
    scales
        .iter()
        .filter_map(|(unit, scale)| {
            let side = scale.axis?;
            let ticks = y_labels(unit, *scale, options)
                .into_iter()
                .map(|(value, label)| AxisTick {
                    value,
                    pixel: project_y(value, *scale, viewport, axis_offset_bottom_px),
                    label,
                })
                .collect();
            Some(YAxis {
                unit: unit.to_owned(),
                side,
                ticks,
            })
        })
        .collect()
}

#[must_use]
pub fn build_x_axis(
    domain: XDomain,
    x_projection: Option<XProjection>,
    options: &AxisLabelOptions<'_>,
) -> XAxis {
    let (Some((min_x, max_x)), Some(x_projection)) = (domain.bounds(), x_projection) else {
        return XAxis::default();
    };
    let ticks = tick_values(min_x, max_x, options.x_tick_intervals)
        .into_iter()
        .map(|value| AxisTick {
            value,
            pixel: x_projection.project(value),
            label: format_x_label(value, options.x_label_format),
        })
        .collect();
    XAxis { ticks }
}

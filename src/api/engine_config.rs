use serde::{Deserialize, Serialize};

use crate::core::{MarkerRole, ScaleTuning, XLabelFormat};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipMode;
use crate::render::TextStyle;

/// Layout settings owned by one engine instance.
///
/// This type is serializable so host applications can persist/load chart
/// setup without inventing their own format. Missing fields fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayoutConfig {
    pub effective_height_ratio: f64,
    pub axis_offset_bottom_px: f64,
    pub y_tick_intervals: u32,
    pub x_tick_intervals: u32,
    pub gutter_margin_px: f64,
    pub edge_padding_px: f64,
    pub label_style: TextStyle,
    pub x_label_format: XLabelFormat,
    pub y_label_unit_suffix: bool,
    pub tooltip_mode: TooltipMode,
    /// One role per marker line, in line order. Empty disables shading.
    pub marker_roles: Vec<MarkerRole>,
}

impl Default for ChartLayoutConfig {
    fn default() -> Self {
        let tuning = ScaleTuning::default();
        Self {
            effective_height_ratio: tuning.effective_height_ratio,
            axis_offset_bottom_px: tuning.axis_offset_bottom_px,
            y_tick_intervals: tuning.y_tick_intervals,
            x_tick_intervals: 10,
            gutter_margin_px: 8.0,
            edge_padding_px: 10.0,
            label_style: TextStyle::default(),
            x_label_format: XLabelFormat::Integer,
            y_label_unit_suffix: false,
            tooltip_mode: TooltipMode::Drag,
            marker_roles: Vec::new(),
        }
    }
}

impl ChartLayoutConfig {
    #[must_use]
    pub fn with_effective_height_ratio(mut self, ratio: f64) -> Self {
        self.effective_height_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_axis_offset_bottom_px(mut self, offset_px: f64) -> Self {
        self.axis_offset_bottom_px = offset_px;
        self
    }

    #[must_use]
    pub fn with_tick_intervals(mut self, x_intervals: u32, y_intervals: u32) -> Self {
        self.x_tick_intervals = x_intervals;
        self.y_tick_intervals = y_intervals;
        self
    }

    #[must_use]
    pub fn with_gutter_margins(mut self, gutter_margin_px: f64, edge_padding_px: f64) -> Self {
        self.gutter_margin_px = gutter_margin_px;
        self.edge_padding_px = edge_padding_px;
        self
    }

    #[must_use]
    pub fn with_label_style(mut self, style: TextStyle) -> Self {
        self.label_style = style;
        self
    }

    #[must_use]
    pub fn with_x_label_format(mut self, format: XLabelFormat) -> Self {
        self.x_label_format = format;
        self
    }

    #[must_use]
    pub fn with_y_label_unit_suffix(mut self, enabled: bool) -> Self {
        self.y_label_unit_suffix = enabled;
        self
    }

    #[must_use]
    pub fn with_tooltip_mode(mut self, mode: TooltipMode) -> Self {
        self.tooltip_mode = mode;
        self
    }

    #[must_use]
    pub fn with_marker_roles(mut self, roles: Vec<MarkerRole>) -> Self {
        self.marker_roles = roles;
        self
    }

    #[must_use]
    pub fn scale_tuning(&self) -> ScaleTuning {
        ScaleTuning {
            effective_height_ratio: self.effective_height_ratio,
            axis_offset_bottom_px: self.axis_offset_bottom_px,
            y_tick_intervals: self.y_tick_intervals,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.scale_tuning().validate()?;
        if self.x_tick_intervals == 0 {
            return Err(ChartError::InvalidData(
                "x tick intervals must be >= 1".to_owned(),
            ));
        }
        for (name, value) in [
            ("gutter margin", self.gutter_margin_px),
            ("edge padding", self.edge_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.label_style.font_size_px.is_finite() || self.label_style.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        self.x_label_format.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|err| {
            ChartError::InvalidData(format!("failed to parse layout config: {err}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            ChartError::InvalidData(format!("failed to serialize layout config: {err}"))
        })
    }
}

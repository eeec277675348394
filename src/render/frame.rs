use serde::{Deserialize, Serialize};

use crate::core::{ChartPath, PlotArea, ShadedBand, Tooltip, Viewport, XAxis, YAxis};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Drawable geometry of one line for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub line_index: usize,
    pub color: Color,
    /// Backends typically dash marker lines and skip their point circles.
    pub is_marker_line: bool,
    pub path: ChartPath,
}

/// Backend-agnostic scene for one draw pass.
///
/// Carries positions only; stroke widths, fonts and dash patterns are the
/// backend's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutFrame {
    pub viewport: Viewport,
    pub generation: u64,
    pub progress: f64,
    pub plot_area: PlotArea,
    pub series: Vec<SeriesFrame>,
    pub bands: Vec<ShadedBand>,
    pub x_axis: XAxis,
    pub y_axes: Vec<YAxis>,
    pub tooltip: Option<Tooltip>,
}

impl LayoutFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for series in &self.series {
            series.color.validate()?;
            for command in &series.path.commands {
                let (x, y) = command.position();
                if !x.is_finite() || !y.is_finite() {
                    return Err(ChartError::InvalidData(format!(
                        "path coordinates of line {} must be finite",
                        series.line_index
                    )));
                }
            }
        }
        for band in &self.bands {
            if let Some(fill) = band.fill {
                fill.validate()?;
            }
            if !(band.height() >= 0.0) {
                return Err(ChartError::InvalidData(
                    "shaded band height must be >= 0".to_owned(),
                ));
            }
            if !(band.right - band.left >= 0.0) {
                return Err(ChartError::InvalidData(
                    "shaded band width must be >= 0".to_owned(),
                ));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|series| series.path.is_empty())
            && self.bands.is_empty()
            && self.x_axis.ticks.is_empty()
            && self.y_axes.is_empty()
    }
}

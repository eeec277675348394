use crate::error::ChartResult;
use crate::render::{LayoutFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests catch non-finite geometry that a
/// real backend would choke on.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_path_command_count: usize,
    pub last_band_count: usize,
    pub last_tooltip_entry_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &LayoutFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_path_command_count = frame.series.iter().map(|series| series.path.len()).sum();
        self.last_band_count = frame.bands.len();
        self.last_tooltip_entry_count = frame
            .tooltip
            .as_ref()
            .map_or(0, |tooltip| tooltip.entries.len());
        Ok(())
    }
}

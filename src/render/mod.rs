mod frame;
mod measure;
mod null_renderer;
mod primitives;

pub use frame::{LayoutFrame, SeriesFrame};
pub use measure::{FixedAdvanceMeasurer, SharedTextMeasurer, TextMeasurer};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, TextExtent, TextStyle};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `LayoutFrame` so drawing code stays
/// isolated from scaling, projection and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &LayoutFrame) -> ChartResult<()>;
}

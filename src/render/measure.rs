use std::sync::Arc;

use crate::render::{TextExtent, TextStyle};

/// Injected text-measurement capability.
///
/// Backends implement this with their real font stack; the engine only asks
/// for extents while sizing axis gutters.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextExtent;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, TextStyle) -> TextExtent,
{
    fn measure(&self, text: &str, style: TextStyle) -> TextExtent {
        self(text, style)
    }
}

pub type SharedTextMeasurer = Arc<dyn TextMeasurer + Send + Sync + 'static>;

/// Deterministic per-glyph advance estimate for headless use and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedAdvanceMeasurer;

impl TextMeasurer for FixedAdvanceMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextExtent {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' => 0.34,
                '-' | '+' | '%' | '/' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        TextExtent {
            width: units * style.font_size_px,
            height: style.font_size_px * 1.2,
        }
    }
}

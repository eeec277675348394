use serde::{Deserialize, Serialize};

use crate::core::projection::HighlightPoint;
use crate::core::primitives::ensure_finite;
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
}

impl PathCommand {
    #[must_use]
    pub fn position(self) -> (f64, f64) {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => (x, y),
        }
    }
}

/// Pixel-space polyline: one `MoveTo` followed by `LineTo`s.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPath {
    pub commands: Vec<PathCommand>,
}

impl ChartPath {
    #[must_use]
    pub fn from_points(points: &[HighlightPoint]) -> Self {
        let commands = points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                if index == 0 {
                    PathCommand::MoveTo {
                        x: point.x,
                        y: point.y,
                    }
                } else {
                    PathCommand::LineTo {
                        x: point.x,
                        y: point.y,
                    }
                }
            })
            .collect();
        Self { commands }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Prefix of the path covering `progress` of its horizontal extent.
    ///
    /// The segment crossing the cut is interpolated so the reveal is smooth.
    /// `progress` is clamped to `[0, 1]`.
    pub fn truncated(&self, progress: f64) -> ChartResult<Self> {
        let progress = ensure_finite(progress, "animation progress")?.clamp(0.0, 1.0);
        let (Some(first), Some(last)) = (self.commands.first(), self.commands.last()) else {
            return Ok(Self::default());
        };
        if progress >= 1.0 {
            return Ok(self.clone());
        }

        let start_x = first.position().0;
        let cut_x = start_x + (last.position().0 - start_x) * progress;
        let mut commands = vec![*first];
        for pair in self.commands.windows(2) {
            let (x0, y0) = pair[0].position();
            let (x1, y1) = pair[1].position();
            if x1 <= cut_x {
                commands.push(pair[1]);
                continue;
            }
            let span = x1 - x0;
            if span > 0.0 && cut_x > x0 {
                let ratio = (cut_x - x0) / span;
                commands.push(PathCommand::LineTo {
                    x: cut_x,
                    y: y0 + (y1 - y0) * ratio,
                });
            }
            break;
        }
        Ok(Self { commands })
    }
}

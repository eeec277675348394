use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::projection::HighlightPoint;
use crate::render::Color;

/// Finds the projected point whose pixel x is closest to `pixel_x`.
///
/// Points must be sorted by x. The scan keeps the first point of a tie and
/// stops as soon as the distance starts growing, so the cost is proportional
/// to the position of the answer rather than the series length.
#[must_use]
pub fn nearest_point(points: &[HighlightPoint], pixel_x: f64) -> Option<HighlightPoint> {
    let mut iter = points.iter();
    let first = iter.next()?;
    let mut best = *first;
    let mut best_distance = (first.x - pixel_x).abs();

    for point in iter {
        let distance = (point.x - pixel_x).abs();
        if distance < best_distance {
            best = *point;
            best_distance = distance;
        } else if distance > best_distance {
            break;
        }
    }

    Some(best)
}

/// Linear reference scan without early exit.
#[must_use]
pub fn nearest_point_exhaustive(points: &[HighlightPoint], pixel_x: f64) -> Option<HighlightPoint> {
    let mut best: Option<(f64, HighlightPoint)> = None;
    for point in points {
        let distance = (point.x - pixel_x).abs();
        match best {
            Some((current, _)) if current <= distance => {}
            _ => best = Some((distance, *point)),
        }
    }
    best.map(|(_, point)| point)
}

/// Nearest point of one line, tagged with the line it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineHighlight {
    pub line_index: usize,
    pub point: HighlightPoint,
    pub color: Color,
}

/// Synchronized vertical tooltip for one pointer position.
///
/// Marker lines are left out of `entries`; `x` is the pixel x of the closest
/// entry so the guide line snaps to real data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub pointer_x: f64,
    pub x: f64,
    pub entries: SmallVec<[LineHighlight; 4]>,
}

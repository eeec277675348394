use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::PlotArea;
use crate::core::primitives::ensure_finite;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Which side of a marker line its shaded band covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerRole {
    /// Upper threshold: shades from the line up to the previous boundary.
    Max,
    /// Lower threshold: shades from the line down to the next boundary.
    Min,
}

/// Projected position and color of one marker line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerBoundary {
    pub y: f64,
    pub color: Color,
}

/// One horizontal band of the plot area.
///
/// Bands with `fill == None` are the unshaded gaps; together all bands tile
/// the plot height from `area.top` to `area.bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadedBand {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub fill: Option<Color>,
    pub role: Option<MarkerRole>,
    /// Position of the owning marker in the caller's marker list.
    pub marker_index: Option<usize>,
}

impl ShadedBand {
    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn is_shaded(self) -> bool {
        self.fill.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct RankedMarker {
    index: usize,
    role: MarkerRole,
    y: f64,
    color: Color,
}

/// Splits the plot area into bands bounded by marker lines.
///
/// Markers are ranked by pixel y (stable, so ties keep caller order). The gap
/// between two consecutive boundaries belongs to the lower marker when it is
/// a `Max`, otherwise to the upper marker when it is a `Min`, otherwise it
/// stays unshaded. Boundaries are clamped into the plot area.
pub fn resolve_shaded_regions(
    roles: &[MarkerRole],
    markers: &[MarkerBoundary],
    area: PlotArea,
) -> ChartResult<Vec<ShadedBand>> {
    if roles.len() != markers.len() {
        return Err(ChartError::PreconditionViolation(format!(
            "marker role count {} does not match marker line count {}",
            roles.len(),
            markers.len()
        )));
    }
    if markers.is_empty() {
        return Ok(Vec::new());
    }
    for marker in markers {
        ensure_finite(marker.y, "marker y")?;
    }

    let mut ranked: Vec<RankedMarker> = roles
        .iter()
        .zip(markers)
        .enumerate()
        .map(|(index, (role, marker))| RankedMarker {
            index,
            role: *role,
            y: marker.y.clamp(area.top, area.bottom.max(area.top)),
            color: marker.color,
        })
        .collect();
    ranked.sort_by_key(|marker| OrderedFloat(marker.y));

    let mut bands = Vec::with_capacity(ranked.len() + 1);
    let mut top = area.top;
    let mut above: Option<RankedMarker> = None;
    for marker in ranked.iter().copied().map(Some).chain(std::iter::once(None)) {
        let bottom = marker.map_or(area.bottom.max(area.top), |marker| marker.y);
        let owner = match (above, marker) {
            (_, Some(below)) if below.role == MarkerRole::Max => Some(below),
            (Some(upper), _) if upper.role == MarkerRole::Min => Some(upper),
            _ => None,
        };
        bands.push(ShadedBand {
            left: area.left,
            top,
            right: area.right,
            bottom,
            fill: owner.map(|owner| owner.color),
            role: owner.map(|owner| owner.role),
            marker_index: owner.map(|owner| owner.index),
        });
        top = bottom;
        above = marker;
    }

    Ok(bands)
}

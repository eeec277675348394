use std::sync::Arc;

use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::axis::{AxisLabelOptions, build_x_axis, build_y_axes, compute_gutters};
use crate::core::projection::plot_area;
use crate::core::{
    AxisGutters, ChartPath, HighlightPoint, Line, LineHighlight, MarkerBoundary, PlotArea,
    ScaleSet, SeriesSet, ShadedBand, Tooltip, Viewport, XAxis, XDomain, XProjection, YAxis,
    compute_scale_set, nearest_point, project_lines, resolve_shaded_regions,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LayoutFrame, SeriesFrame, TextMeasurer};

use super::ChartLayoutConfig;
use super::path_cache::{PathCache, PathCacheStats};

/// Per-line attributes the layout keeps next to the projected points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineInfo {
    pub unit: String,
    pub color: Color,
    pub is_marker_line: bool,
}

/// One immutable layout generation.
///
/// Everything derived from lines and viewport (scales, gutters, projected
/// points, axes, bands, paths) lives here and is replaced as a whole, so
/// readers never see a mix of two generations. Queries take `&self` and are
/// safe to run concurrently.
#[derive(Debug, Serialize)]
pub struct ChartLayout {
    generation: u64,
    viewport: Viewport,
    domain: XDomain,
    scales: ScaleSet,
    gutters: AxisGutters,
    plot_area: PlotArea,
    x_axis: XAxis,
    y_axes: Vec<YAxis>,
    lines: Vec<LineInfo>,
    projected: Vec<Vec<HighlightPoint>>,
    bands: Vec<ShadedBand>,
    #[serde(skip)]
    paths: PathCache,
}

impl ChartLayout {
    /// Runs scale, gutter sizing, projection and shading for one viewport.
    pub fn compute(
        generation: u64,
        series: &SeriesSet,
        viewport: Viewport,
        config: &ChartLayoutConfig,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let lines = series.lines();
        let domain = series.domain();
        let axis_offset = config.axis_offset_bottom_px;
        let options = AxisLabelOptions {
            label_style: config.label_style,
            gutter_margin_px: config.gutter_margin_px,
            edge_padding_px: config.edge_padding_px,
            y_tick_intervals: config.y_tick_intervals,
            x_tick_intervals: config.x_tick_intervals,
            x_label_format: &config.x_label_format,
            y_label_unit_suffix: config.y_label_unit_suffix,
        };

        let scales = compute_scale_set(lines, f64::from(viewport.height), config.scale_tuning());
        let gutters = compute_gutters(&scales, measurer, &options);
        let projected = project_lines(lines, &scales, domain, viewport, gutters, axis_offset);
        let x_axis = build_x_axis(
            domain,
            XProjection::new(domain, viewport, gutters),
            &options,
        );
        let y_axes = build_y_axes(&scales, viewport, axis_offset, &options);
        let plot_area = plot_area(viewport, gutters, axis_offset);
        let bands = resolve_marker_bands(lines, &projected, &config.marker_roles, plot_area)?;

        debug!(
            generation,
            width = viewport.width,
            height = viewport.height,
            lines = lines.len(),
            units = scales.len(),
            left_gutter = gutters.left,
            right_gutter = gutters.right,
            bands = bands.len(),
            "layout recomputed"
        );

        Ok(Self {
            generation,
            viewport,
            domain,
            scales,
            gutters,
            plot_area,
            x_axis,
            y_axes,
            lines: lines
                .iter()
                .map(|line| LineInfo {
                    unit: line.unit.clone(),
                    color: line.color,
                    is_marker_line: line.is_marker_line,
                })
                .collect(),
            paths: PathCache::with_lines(projected.len()),
            projected,
            bands,
        })
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn domain(&self) -> XDomain {
        self.domain
    }

    #[must_use]
    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    #[must_use]
    pub fn gutters(&self) -> AxisGutters {
        self.gutters
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot_area
    }

    #[must_use]
    pub fn x_axis(&self) -> &XAxis {
        &self.x_axis
    }

    #[must_use]
    pub fn y_axes(&self) -> &[YAxis] {
        &self.y_axes
    }

    #[must_use]
    pub fn bands(&self) -> &[ShadedBand] {
        &self.bands
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.projected.len()
    }

    #[must_use]
    pub fn line_info(&self, line_index: usize) -> Option<&LineInfo> {
        self.lines.get(line_index)
    }

    pub fn projected(&self, line_index: usize) -> ChartResult<&[HighlightPoint]> {
        self.projected
            .get(line_index)
            .map(Vec::as_slice)
            .ok_or_else(|| out_of_range(line_index, self.projected.len()))
    }

    /// Drawable polyline of one line, built on first request.
    pub fn path(&self, line_index: usize) -> ChartResult<Arc<ChartPath>> {
        let points = self.projected(line_index)?;
        self.paths
            .get_or_build(line_index, points)
            .ok_or_else(|| out_of_range(line_index, self.projected.len()))
    }

    #[must_use]
    pub fn path_cache_stats(&self) -> PathCacheStats {
        self.paths.stats()
    }

    /// Closest projected point of one line; `None` for an empty line.
    pub fn nearest(&self, line_index: usize, pixel_x: f64) -> ChartResult<Option<HighlightPoint>> {
        Ok(nearest_point(self.projected(line_index)?, pixel_x))
    }

    /// Closest point of every non-empty line, marker lines included.
    #[must_use]
    pub fn nearest_all(&self, pixel_x: f64) -> Vec<LineHighlight> {
        self.highlights(pixel_x, true).into_vec()
    }

    /// Tooltip for a pointer position; `None` when no data line has points.
    #[must_use]
    pub fn tooltip(&self, pointer_x: f64) -> Option<Tooltip> {
        let entries = self.highlights(pointer_x, false);
        let x = entries
            .iter()
            .map(|entry| entry.point.x)
            .min_by(|left, right| {
                (left - pointer_x)
                    .abs()
                    .total_cmp(&(right - pointer_x).abs())
            })?;
        Some(Tooltip {
            pointer_x,
            x,
            entries,
        })
    }

    /// Materializes the scene for one animation step.
    pub fn frame(&self, progress: f64, tooltip: Option<Tooltip>) -> ChartResult<LayoutFrame> {
        let mut series = Vec::with_capacity(self.lines.len());
        for (line_index, info) in self.lines.iter().enumerate() {
            series.push(SeriesFrame {
                line_index,
                color: info.color,
                is_marker_line: info.is_marker_line,
                path: self.path(line_index)?.truncated(progress)?,
            });
        }

        Ok(LayoutFrame {
            viewport: self.viewport,
            generation: self.generation,
            progress: progress.clamp(0.0, 1.0),
            plot_area: self.plot_area,
            series,
            bands: self.bands.clone(),
            x_axis: self.x_axis.clone(),
            y_axes: self.y_axes.clone(),
            tooltip,
        })
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|err| {
            ChartError::InvalidData(format!("failed to serialize layout: {err}"))
        })
    }

    fn highlights(&self, pixel_x: f64, include_markers: bool) -> SmallVec<[LineHighlight; 4]> {
        self.projected
            .iter()
            .zip(&self.lines)
            .enumerate()
            .filter(|(_, (_, info))| include_markers || !info.is_marker_line)
            .filter_map(|(line_index, (points, info))| {
                nearest_point(points, pixel_x).map(|point| LineHighlight {
                    line_index,
                    point,
                    color: info.color,
                })
            })
            .collect()
    }
}

fn out_of_range(line_index: usize, line_count: usize) -> ChartError {
    ChartError::PreconditionViolation(format!(
        "line index {line_index} out of range for {line_count} lines"
    ))
}

/// Pairs configured roles with the projected y of each marker line.
///
/// Empty marker lines have no y to bound a band, so they are dropped together
/// with their role after the role count has been checked.
fn resolve_marker_bands(
    lines: &[Line],
    projected: &[Vec<HighlightPoint>],
    roles: &[crate::core::MarkerRole],
    area: PlotArea,
) -> ChartResult<Vec<ShadedBand>> {
    if roles.is_empty() {
        return Ok(Vec::new());
    }

    let marker_lines: Vec<(usize, &Line)> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.is_marker_line)
        .collect();
    if marker_lines.len() != roles.len() {
        return Err(ChartError::PreconditionViolation(format!(
            "marker role count {} does not match marker line count {}",
            roles.len(),
            marker_lines.len()
        )));
    }

    let mut kept_roles = Vec::with_capacity(roles.len());
    let mut boundaries = Vec::with_capacity(roles.len());
    for ((line_index, line), role) in marker_lines.into_iter().zip(roles) {
        let Some(first) = projected.get(line_index).and_then(|points| points.first()) else {
            warn!(line_index, "skipping empty marker line in shaded regions");
            continue;
        };
        kept_roles.push(*role);
        boundaries.push(MarkerBoundary {
            y: first.y,
            color: line.color,
        });
    }

    resolve_shaded_regions(&kept_roles, &boundaries, area)
}

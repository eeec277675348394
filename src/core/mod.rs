pub mod axis;
pub mod ingestion;
pub mod nearest;
pub mod path;
pub mod primitives;
pub mod projection;
pub mod scale_set;
pub mod shading;
pub mod types;

pub use axis::{AxisTick, XAxis, XLabelFormat, YAxis, format_x_label, format_y_label};
pub use ingestion::{SeriesKey, SeriesSet, SeriesValue, compute_x_domain, ingest_series};
pub use nearest::{LineHighlight, Tooltip, nearest_point, nearest_point_exhaustive};
pub use path::{ChartPath, PathCommand};
pub use projection::{AxisGutters, HighlightPoint, XProjection, project_lines, project_y};
pub use scale_set::{AxisSide, ScaleSet, ScaleTuning, UnitScale, compute_scale_set};
pub use shading::{MarkerBoundary, MarkerRole, ShadedBand, resolve_shaded_regions};
pub use types::{DataPoint, Line, PlotArea, Viewport, XDomain};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::primitives::{
    date_to_datetime, datetime_to_unix_seconds, decimal_to_f64, ensure_finite,
};
use crate::core::{DataPoint, Line, XDomain};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Ordinal key of a raw series entry.
pub trait SeriesKey {
    fn to_x(&self) -> ChartResult<f64>;

    /// Timestamp carried by date-like keys.
    fn origin(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Numeric value of a raw series entry.
pub trait SeriesValue {
    fn to_y(&self) -> ChartResult<f64>;
}

macro_rules! integer_series_key {
    ($($ty:ty),*) => {
        $(impl SeriesKey for $ty {
            fn to_x(&self) -> ChartResult<f64> {
                Ok(*self as f64)
            }
        })*
    };
}

integer_series_key!(i32, i64, u32, u64, usize);

impl SeriesKey for DateTime<Utc> {
    fn to_x(&self) -> ChartResult<f64> {
        Ok(datetime_to_unix_seconds(*self))
    }

    fn origin(&self) -> Option<DateTime<Utc>> {
        Some(*self)
    }
}

impl SeriesKey for NaiveDate {
    fn to_x(&self) -> ChartResult<f64> {
        Ok(datetime_to_unix_seconds(date_to_datetime(*self)))
    }

    fn origin(&self) -> Option<DateTime<Utc>> {
        Some(date_to_datetime(*self))
    }
}

impl SeriesValue for f64 {
    fn to_y(&self) -> ChartResult<f64> {
        ensure_finite(*self, "series value")
    }
}

impl SeriesValue for f32 {
    fn to_y(&self) -> ChartResult<f64> {
        ensure_finite(f64::from(*self), "series value")
    }
}

impl SeriesValue for i32 {
    fn to_y(&self) -> ChartResult<f64> {
        Ok(f64::from(*self))
    }
}

impl SeriesValue for i64 {
    fn to_y(&self) -> ChartResult<f64> {
        Ok(*self as f64)
    }
}

impl SeriesValue for Decimal {
    fn to_y(&self) -> ChartResult<f64> {
        decimal_to_f64(*self, "series value")
    }
}

impl<T: SeriesKey + ?Sized> SeriesKey for &T {
    fn to_x(&self) -> ChartResult<f64> {
        (**self).to_x()
    }

    fn origin(&self) -> Option<DateTime<Utc>> {
        (**self).origin()
    }
}

impl<T: SeriesValue + ?Sized> SeriesValue for &T {
    fn to_y(&self) -> ChartResult<f64> {
        (**self).to_y()
    }
}

/// Ingested lines plus the global x-domain across all of them.
///
/// Every line is x-sorted and the domain always matches the lines, so
/// downstream consumers can rely on both.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeriesSet {
    lines: Vec<Line>,
    domain: XDomain,
}

impl SeriesSet {
    /// Builds a set from caller-made lines, sorting each one by x.
    #[must_use]
    pub fn from_lines(mut lines: Vec<Line>) -> Self {
        for line in &mut lines {
            sort_points_by_x(&mut line.points);
        }
        let domain = compute_x_domain(&lines);
        Self { lines, domain }
    }

    /// Flags every line after the first as a marker line.
    #[must_use]
    pub fn with_marker_lines(mut self) -> Self {
        for (index, line) in self.lines.iter_mut().enumerate() {
            line.is_marker_line = index > 0;
        }
        self
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn domain(&self) -> XDomain {
        self.domain
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(Line::is_empty)
    }
}

/// Normalizes raw keyed series into x-sorted lines and computes the x-domain.
///
/// `series`, `colors` and `units` are parallel lists and must have equal
/// length. Map iteration order is irrelevant: each line is sorted by x.
pub fn ingest_series<S, K, V>(
    series: Vec<S>,
    colors: &[Color],
    units: &[String],
) -> ChartResult<SeriesSet>
where
    S: IntoIterator<Item = (K, V)>,
    K: SeriesKey,
    V: SeriesValue,
{
    if series.len() != colors.len() || series.len() != units.len() {
        return Err(ChartError::PreconditionViolation(format!(
            "series/colors/units length mismatch: {}/{}/{}",
            series.len(),
            colors.len(),
            units.len()
        )));
    }

    let mut lines = Vec::with_capacity(series.len());
    for ((raw, color), unit) in series.into_iter().zip(colors).zip(units) {
        let mut points = Vec::new();
        for (key, value) in raw {
            let x = ensure_finite(key.to_x()?, "series key")?;
            points.push(DataPoint {
                x,
                y: value.to_y()?,
                origin: key.origin(),
            });
        }
        sort_points_by_x(&mut points);
        lines.push(Line::new(points, unit.clone(), *color));
    }

    Ok(SeriesSet::from_lines(lines))
}

/// Stable sort by x so equal keys keep their arrival order.
pub fn sort_points_by_x(points: &mut [DataPoint]) {
    points.sort_by(|left, right| left.x.total_cmp(&right.x));
}

#[must_use]
pub fn compute_x_domain(lines: &[Line]) -> XDomain {
    let mut domain = XDomain::empty();
    for point in lines.iter().flat_map(|line| line.points.iter()) {
        domain.include(point.x);
    }
    domain
}

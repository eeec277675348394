use chrono::{NaiveDate, TimeZone, Utc};
use indexmap::IndexMap;
use linechart_rs::ChartError;
use linechart_rs::core::{DataPoint, Line, SeriesSet, ingest_series};
use linechart_rs::render::Color;
use rust_decimal::Decimal;

fn units(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

#[test]
fn integer_keyed_maps_are_sorted_by_x() {
    let mut raw = IndexMap::new();
    raw.insert(20_i64, 5.0_f64);
    raw.insert(0, 0.0);
    raw.insert(10, 10.0);

    let set = ingest_series(vec![raw], &[Color::rgb(1.0, 0.0, 0.0)], &units(&["C"]))
        .expect("ingest");

    let xs: Vec<f64> = set.lines()[0].points.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![0.0, 10.0, 20.0]);
    assert_eq!(set.lines()[0].points[1].y, 10.0);
    assert_eq!(set.domain().bounds(), Some((0.0, 20.0)));
    assert!(!set.lines()[0].is_marker_line);
}

#[test]
fn domain_spans_all_series() {
    let first: IndexMap<i32, i32> = [(5, 1), (7, 2)].into_iter().collect();
    let second: IndexMap<i32, i32> = [(-3, 4), (2, 8)].into_iter().collect();
    let colors = [Color::rgb(0.0, 0.0, 1.0), Color::rgb(0.0, 1.0, 0.0)];

    let set = ingest_series(vec![first, second], &colors, &units(&["a", "b"])).expect("ingest");

    assert_eq!(set.domain().from, Some(-3.0));
    assert_eq!(set.domain().to, Some(7.0));
}

#[test]
fn all_empty_series_leave_domain_absent() {
    let empty: Vec<IndexMap<i64, f64>> = vec![IndexMap::new(), IndexMap::new()];
    let colors = [Color::rgb(0.0, 0.0, 0.0); 2];

    let set = ingest_series(empty, &colors, &units(&["a", "a"])).expect("ingest");

    assert!(set.domain().is_empty());
    assert_eq!(set.domain().from, None);
    assert_eq!(set.domain().to, None);
    assert!(set.lines().iter().all(|line| line.points.is_empty()));
    assert!(set.is_empty());
}

#[test]
fn empty_series_list_is_valid() {
    let set = ingest_series::<IndexMap<i64, f64>, i64, f64>(Vec::new(), &[], &[]).expect("ingest");
    assert!(set.lines().is_empty());
    assert!(set.domain().is_empty());
}

#[test]
fn mismatched_parallel_lists_fail_fast() {
    let raw: IndexMap<i64, f64> = [(0, 1.0)].into_iter().collect();
    let result = ingest_series(vec![raw], &[], &units(&["C"]));

    assert!(matches!(result, Err(ChartError::PreconditionViolation(_))));
}

#[test]
fn date_keys_carry_origin_timestamp() {
    let later = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single().expect("valid date");
    let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");
    let raw: IndexMap<_, _> = [(later, 2.0_f64), (earlier, 1.0)].into_iter().collect();

    let set = ingest_series(vec![raw], &[Color::rgb(0.0, 0.0, 0.0)], &units(&["kWh"]))
        .expect("ingest");
    let points = &set.lines()[0].points;

    assert_eq!(points[0].origin, Some(earlier));
    assert_eq!(points[1].origin, Some(later));
    assert_eq!(points[1].x - points[0].x, 86_400.0);
}

#[test]
fn naive_dates_map_to_utc_midnight() {
    let day = NaiveDate::from_ymd_opt(1970, 1, 2).expect("valid date");
    let raw: IndexMap<_, _> = [(day, Decimal::new(125, 2))].into_iter().collect();

    let set = ingest_series(vec![raw], &[Color::rgb(0.0, 0.0, 0.0)], &units(&["%"]))
        .expect("ingest");

    assert_eq!(set.lines()[0].points[0].x, 86_400.0);
    assert!((set.lines()[0].points[0].y - 1.25).abs() <= 1e-12);
}

#[test]
fn non_finite_values_are_rejected() {
    let raw: IndexMap<i64, f64> = [(0, f64::NAN)].into_iter().collect();
    let result = ingest_series(vec![raw], &[Color::rgb(0.0, 0.0, 0.0)], &units(&["C"]));

    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn marker_chart_flags_every_line_after_the_first() {
    let series: Vec<IndexMap<i64, f64>> = vec![
        [(0, 1.0), (1, 2.0)].into_iter().collect(),
        [(0, 5.0), (1, 5.0)].into_iter().collect(),
        [(0, -5.0), (1, -5.0)].into_iter().collect(),
    ];
    let colors = [Color::rgb(0.0, 0.0, 0.0); 3];

    let set: SeriesSet = ingest_series(series, &colors, &units(&["C", "C", "C"]))
        .expect("ingest")
        .with_marker_lines();

    let flags: Vec<bool> = set.lines().iter().map(|line| line.is_marker_line).collect();
    assert_eq!(flags, vec![false, true, true]);
}

#[test]
fn hand_built_lines_are_sorted_and_domain_follows_them() {
    let line = Line::new(
        vec![
            DataPoint::new(10.0, 1.0),
            DataPoint::new(0.0, 2.0),
            DataPoint::new(20.0, 3.0),
        ],
        "C",
        Color::rgb(0.0, 0.0, 0.0),
    );

    let set = SeriesSet::from_lines(vec![line]);

    let xs: Vec<f64> = set.lines()[0].points.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![0.0, 10.0, 20.0]);
    assert_eq!(set.domain().bounds(), Some((0.0, 20.0)));
}

use approx::assert_relative_eq;
use linechart_rs::core::{
    AxisSide, DataPoint, Line, ScaleTuning, compute_scale_set, format_y_label,
};
use linechart_rs::render::Color;

fn line(unit: &str, points: &[(f64, f64)]) -> Line {
    Line::new(
        points.iter().map(|(x, y)| DataPoint::new(*x, *y)).collect(),
        unit,
        Color::rgb(0.2, 0.4, 0.6),
    )
}

#[test]
fn single_unit_scale_follows_height_ratio() {
    let lines = vec![line("C", &[(0.0, 0.0), (10.0, 10.0), (20.0, 5.0)])];

    let scales = compute_scale_set(&lines, 200.0, ScaleTuning::default());
    let scale = scales.get("C").expect("unit C");

    assert_eq!(scale.min_y, 0.0);
    assert_eq!(scale.max_y, 10.0);
    // (200 - 20) / 10 * 5/6
    assert_relative_eq!(scale.y_scale, 15.0, epsilon = 1e-9);
    assert_relative_eq!(scale.y_tick, 2.0, epsilon = 1e-12);
    assert_eq!(scale.axis, Some(AxisSide::Left));
}

#[test]
fn lines_sharing_a_unit_use_the_union_range() {
    let lines = vec![
        line("C", &[(0.0, 0.0), (1.0, 10.0)]),
        line("C", &[(0.0, 5.0), (1.0, 20.0)]),
    ];

    let scales = compute_scale_set(&lines, 300.0, ScaleTuning::default());
    let scale = scales.get("C").expect("unit C");

    assert_eq!(scales.len(), 1);
    assert_eq!(scale.min_y, 0.0);
    assert_eq!(scale.max_y, 20.0);
}

#[test]
fn units_get_left_then_right_axis_and_later_units_none() {
    let lines = vec![
        line("C", &[(0.0, 1.0), (1.0, 2.0)]),
        line("%", &[(0.0, 40.0), (1.0, 60.0)]),
        line("hPa", &[(0.0, 1000.0), (1.0, 1020.0)]),
    ];

    let scales = compute_scale_set(&lines, 300.0, ScaleTuning::default());

    assert_eq!(scales.get("C").and_then(|scale| scale.axis), Some(AxisSide::Left));
    assert_eq!(scales.get("%").and_then(|scale| scale.axis), Some(AxisSide::Right));
    assert_eq!(scales.get("hPa").and_then(|scale| scale.axis), None);
    assert_eq!(scales.unit_on(AxisSide::Right).map(|(unit, _)| unit), Some("%"));
}

#[test]
fn constant_series_yields_degenerate_scale() {
    let lines = vec![line("C", &[(0.0, 3.0), (1.0, 3.0)])];

    let scales = compute_scale_set(&lines, 200.0, ScaleTuning::default());
    let scale = scales.get("C").expect("unit C");

    assert!(scale.is_degenerate());
    assert!(!scale.y_scale.is_finite());
    assert_eq!(scale.y_tick, 0.0);
}

#[test]
fn empty_lines_contribute_no_unit() {
    let lines = vec![line("C", &[]), line("%", &[(0.0, 1.0)])];

    let scales = compute_scale_set(&lines, 200.0, ScaleTuning::default());

    assert!(scales.get("C").is_none());
    assert_eq!(scales.get("%").and_then(|scale| scale.axis), Some(AxisSide::Left));
}

#[test]
fn custom_height_ratio_is_applied() {
    let lines = vec![line("C", &[(0.0, 0.0), (1.0, 100.0)])];
    let tuning = ScaleTuning {
        effective_height_ratio: 1.0,
        axis_offset_bottom_px: 0.0,
        y_tick_intervals: 4,
    };

    let scales = compute_scale_set(&lines, 400.0, tuning);
    let scale = scales.get("C").expect("unit C");

    assert_relative_eq!(scale.y_scale, 4.0, epsilon = 1e-12);
    assert_relative_eq!(scale.y_tick, 25.0, epsilon = 1e-12);
}

#[test]
fn invalid_tuning_is_rejected() {
    let tuning = ScaleTuning {
        effective_height_ratio: 1.5,
        ..ScaleTuning::default()
    };
    assert!(tuning.validate().is_err());

    let tuning = ScaleTuning {
        y_tick_intervals: 0,
        ..ScaleTuning::default()
    };
    assert!(tuning.validate().is_err());
}

#[test]
fn y_labels_pick_precision_from_tick_step() {
    assert_eq!(format_y_label(0.2, 0.1), "0.2");
    assert_eq!(format_y_label(0.15, 0.05), "0.15");
    assert_eq!(format_y_label(7.5, 2.5), "7.5");
    assert_eq!(format_y_label(240.0, 60.0), "240");
    assert_eq!(format_y_label(249.6, 60.0), "250");
}

use approx::assert_relative_eq;
use linechart_rs::ChartError;
use linechart_rs::core::{MarkerBoundary, MarkerRole, PlotArea, resolve_shaded_regions};
use linechart_rs::render::Color;
use proptest::prelude::*;

const CRITICAL: Color = Color::rgb(1.0, 0.0, 0.0);
const WARNING: Color = Color::rgb(1.0, 0.6, 0.0);

fn area() -> PlotArea {
    PlotArea {
        left: 40.0,
        top: 0.0,
        right: 290.0,
        bottom: 180.0,
    }
}

fn boundary(y: f64, color: Color) -> MarkerBoundary {
    MarkerBoundary { y, color }
}

#[test]
fn critical_and_warning_bands_around_normal_zone() {
    // Caller order is not pixel order.
    let roles = [MarkerRole::Min, MarkerRole::Max, MarkerRole::Max, MarkerRole::Min];
    let markers = [
        boundary(150.0, WARNING),
        boundary(20.0, CRITICAL),
        boundary(50.0, WARNING),
        boundary(170.0, CRITICAL),
    ];

    let bands = resolve_shaded_regions(&roles, &markers, area()).expect("bands");

    let extents: Vec<(f64, f64)> = bands.iter().map(|band| (band.top, band.bottom)).collect();
    assert_eq!(
        extents,
        vec![(0.0, 20.0), (20.0, 50.0), (50.0, 150.0), (150.0, 170.0), (170.0, 180.0)]
    );
    let fills: Vec<Option<Color>> = bands.iter().map(|band| band.fill).collect();
    assert_eq!(
        fills,
        vec![Some(CRITICAL), Some(WARNING), None, Some(WARNING), Some(CRITICAL)]
    );
    assert_eq!(bands[0].marker_index, Some(1));
    assert_eq!(bands[4].marker_index, Some(3));
    assert_eq!(bands[0].role, Some(MarkerRole::Max));
    assert_eq!(bands[4].role, Some(MarkerRole::Min));
    assert!(bands.iter().all(|band| band.left == 40.0 && band.right == 290.0));
}

#[test]
fn max_below_min_gives_the_gap_to_the_max_marker() {
    let roles = [MarkerRole::Min, MarkerRole::Max];
    let markers = [boundary(60.0, WARNING), boundary(120.0, CRITICAL)];

    let bands = resolve_shaded_regions(&roles, &markers, area()).expect("bands");

    assert_eq!(bands.len(), 3);
    assert_eq!(bands[1].marker_index, Some(1));
    assert_eq!(bands[1].fill, Some(CRITICAL));
}

#[test]
fn off_chart_markers_are_clamped() {
    let roles = [MarkerRole::Max];
    let markers = [boundary(-40.0, CRITICAL)];

    let bands = resolve_shaded_regions(&roles, &markers, area()).expect("bands");

    assert_eq!(bands.len(), 2);
    assert_relative_eq!(bands[0].height(), 0.0);
    assert_relative_eq!(bands[1].height(), 180.0);
    assert!(!bands[1].is_shaded());
}

#[test]
fn no_markers_produce_no_bands() {
    let bands = resolve_shaded_regions(&[], &[], area()).expect("bands");
    assert!(bands.is_empty());
}

#[test]
fn role_count_mismatch_fails_fast() {
    let result = resolve_shaded_regions(&[MarkerRole::Max], &[], area());
    assert!(matches!(result, Err(ChartError::PreconditionViolation(_))));
}

proptest! {
    #[test]
    fn bands_tile_plot_height_without_gaps(
        ys in proptest::collection::vec(-50.0f64..250.0, 1..8),
        max_mask in proptest::collection::vec(any::<bool>(), 8)
    ) {
        let roles: Vec<MarkerRole> = ys
            .iter()
            .zip(&max_mask)
            .map(|(_, is_max)| if *is_max { MarkerRole::Max } else { MarkerRole::Min })
            .collect();
        let markers: Vec<MarkerBoundary> = ys.iter().map(|y| boundary(*y, WARNING)).collect();
        let area = area();

        let bands = resolve_shaded_regions(&roles, &markers, area).expect("bands");

        prop_assert_eq!(bands.len(), markers.len() + 1);
        prop_assert_eq!(bands[0].top, area.top);
        prop_assert_eq!(bands[bands.len() - 1].bottom, area.bottom);
        for pair in bands.windows(2) {
            prop_assert_eq!(pair[0].bottom, pair[1].top);
        }
        for band in &bands {
            prop_assert!(band.height() >= 0.0);
        }
        let total: f64 = bands.iter().map(|band| band.height()).sum();
        prop_assert!((total - area.height()).abs() <= 1e-9);
    }
}

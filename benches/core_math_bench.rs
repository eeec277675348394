use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use linechart_rs::api::{ChartLayout, ChartLayoutConfig};
use linechart_rs::core::{SeriesSet, Viewport, ingest_series, nearest_point};
use linechart_rs::render::{Color, FixedAdvanceMeasurer};
use std::hint::black_box;

fn generated_series(lines: usize, points: i64) -> SeriesSet {
    let raw: Vec<IndexMap<i64, f64>> = (0..lines)
        .map(|line| {
            (0..points)
                .map(|i| {
                    let t = i as f64;
                    let wave = (t * 0.01 + line as f64).sin() * 25.0;
                    (i, 100.0 + wave + t * 0.002)
                })
                .collect()
        })
        .collect();
    let colors = vec![Color::rgb(0.2, 0.4, 0.8); lines];
    let units: Vec<String> = (0..lines)
        .map(|line| if line % 2 == 0 { "C" } else { "%" }.to_owned())
        .collect();
    ingest_series(raw, &colors, &units).expect("valid generated series")
}

fn compute(series: &SeriesSet, viewport: Viewport) -> ChartLayout {
    ChartLayout::compute(
        0,
        series,
        viewport,
        &ChartLayoutConfig::default(),
        &FixedAdvanceMeasurer,
    )
    .expect("layout should succeed")
}

fn bench_layout_compute_4x10k(c: &mut Criterion) {
    let series = generated_series(4, 10_000);
    let viewport = Viewport::new(1920, 1080);

    c.bench_function("layout_compute_4x10k", |b| {
        b.iter(|| {
            let _ = compute(black_box(&series), black_box(viewport));
        })
    });
}

fn bench_nearest_point_10k(c: &mut Criterion) {
    let series = generated_series(1, 10_000);
    let layout = compute(&series, Viewport::new(1920, 1080));
    let points = layout.projected(0).expect("line 0");

    c.bench_function("nearest_point_10k", |b| {
        b.iter(|| {
            let _ = nearest_point(black_box(points), black_box(1_234.5));
        })
    });
}

fn bench_tooltip_and_frame_2k(c: &mut Criterion) {
    let series = generated_series(3, 2_000);
    let layout = compute(&series, Viewport::new(1600, 900));

    c.bench_function("tooltip_and_frame_2k", |b| {
        b.iter(|| {
            let tooltip = layout.tooltip(black_box(800.0));
            let _ = layout
                .frame(black_box(0.75), tooltip)
                .expect("frame should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_layout_compute_4x10k,
    bench_nearest_point_10k,
    bench_tooltip_and_frame_2k
);
criterion_main!(benches);

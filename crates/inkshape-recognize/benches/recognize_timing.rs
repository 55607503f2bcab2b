//! Per-stroke cost of feature extraction, recognition and smoothing.

use std::f64::consts::TAU;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use inkshape_core::{simplify_path, Point, SequentialIds};
use inkshape_recognize::{extract_features, ShapeRecognizer};
use inkshape_smooth::{smooth_stroke, SmoothingConfig};

fn circle(n: usize) -> Vec<Point> {
    (0..n)
        .map(|k| {
            let t = k as f64 * TAU / n as f64;
            let r = 80.0 + 1.5 * (7.0 * t).sin();
            Point::new(200.0 + r * t.cos(), 200.0 + r * t.sin())
        })
        .collect()
}

fn bench_extract_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_features");
    for n in [32usize, 128, 512] {
        let points = circle(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, pts| {
            b.iter(|| extract_features(black_box(pts)));
        });
    }
    group.finish();
}

fn bench_recognize(c: &mut Criterion) {
    let recognizer = ShapeRecognizer::default();
    let mut group = c.benchmark_group("recognize");
    for n in [32usize, 128, 512] {
        let points = circle(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, pts| {
            b.iter(|| recognizer.recognize(black_box(pts), &mut SequentialIds::default()));
        });
    }
    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let points = circle(256);
    let config = SmoothingConfig::default();
    c.bench_function("smooth_stroke_256", |b| {
        b.iter(|| smooth_stroke(black_box(&points), &config));
    });
    c.bench_function("simplify_path_256", |b| {
        b.iter(|| simplify_path(black_box(&points), 1.5));
    });
}

criterion_group!(benches, bench_extract_features, bench_recognize, bench_smoothing);
criterion_main!(benches);

//! Criterion micro-benchmarks for spatial partitioning.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gridspan_bench::{geographic_cloud, reference_cloud};
use gridspan_split::{
    block_split, expanding_window, rolling_window, rolling_window_spherical, BlockOptions,
    RollingWindowOptions,
};

/// Benchmark: label 100K points into 5 km blocks (20 x 20 layout).
fn bench_block_split_100k(c: &mut Criterion) {
    let points = reference_cloud(100_000, 42);
    let options = BlockOptions::default().size(5_000.0);

    c.bench_function("block_split_100k", |b| {
        b.iter(|| {
            let split = block_split(black_box(&points), &options).unwrap();
            black_box(split.nblocks());
        });
    });
}

/// Benchmark: 10 km rolling windows with 50% overlap over 20K points.
fn bench_rolling_window_20k(c: &mut Criterion) {
    let points = reference_cloud(20_000, 42);
    let options = RollingWindowOptions::new(10_000.0).overlap(0.5);

    c.bench_function("rolling_window_20k", |b| {
        b.iter(|| {
            let windows = rolling_window(black_box(&points), &options).unwrap();
            black_box(windows.len());
        });
    });
}

/// Benchmark: 10 degree spherical windows over 20K global points.
fn bench_rolling_window_spherical_20k(c: &mut Criterion) {
    let points = geographic_cloud(20_000, 42);
    let options = RollingWindowOptions::new(10.0).spacing(10.0);

    c.bench_function("rolling_window_spherical_20k", |b| {
        b.iter(|| {
            let windows = rolling_window_spherical(black_box(&points), &options).unwrap();
            black_box(windows.len());
        });
    });
}

/// Benchmark: eight growing windows around the centre of 100K points.
fn bench_expanding_window_100k(c: &mut Criterion) {
    let points = reference_cloud(100_000, 42);
    let sizes: Vec<f64> = (1..=8).map(|k| k as f64 * 10_000.0).collect();

    c.bench_function("expanding_window_100k", |b| {
        b.iter(|| black_box(expanding_window(&points, &[50_000.0, 50_000.0], &sizes).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_block_split_100k,
    bench_rolling_window_20k,
    bench_rolling_window_spherical_20k,
    bench_expanding_window_100k
);
criterion_main!(benches);

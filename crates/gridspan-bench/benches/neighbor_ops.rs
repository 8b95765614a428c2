//! Criterion micro-benchmarks for nearest-neighbor queries.
//!
//! The brute-force index is only run on the small cloud; it exists to
//! show where the k-d tree starts paying for its build.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gridspan_bench::reference_cloud;
use gridspan_neighbors::{
    neighbor_distance_statistics, neighbor_distances_with, BruteForce, KdTree, Statistic,
};

/// Benchmark: build a k-d tree over 100K points.
fn bench_kdtree_build_100k(c: &mut Criterion) {
    let points = reference_cloud(100_000, 7);

    c.bench_function("kdtree_build_100k", |b| {
        b.iter(|| black_box(KdTree::new(black_box(&points))));
    });
}

/// Benchmark: first-neighbor distances for 2K points, tree vs brute force.
fn bench_distances_2k(c: &mut Criterion) {
    let points = reference_cloud(2_000, 7);
    let tree = KdTree::new(&points);
    let brute = BruteForce::new(&points);

    c.bench_function("neighbor_distances_kdtree_2k", |b| {
        b.iter(|| black_box(neighbor_distances_with(&tree, &points, 1).unwrap()));
    });
    c.bench_function("neighbor_distances_brute_2k", |b| {
        b.iter(|| black_box(neighbor_distances_with(&brute, &points, 1).unwrap()));
    });
}

/// Benchmark: mean and median spacing of 100K points with k = 5.
fn bench_statistics_100k(c: &mut Criterion) {
    let points = reference_cloud(100_000, 7);

    c.bench_function("neighbor_statistics_100k_k5", |b| {
        b.iter(|| {
            black_box(
                neighbor_distance_statistics(&points, 5, &[Statistic::Mean, Statistic::Median])
                    .unwrap(),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_kdtree_build_100k,
    bench_distances_2k,
    bench_statistics_100k
);
criterion_main!(benches);

//! Benchmark k-d tree construction and queries.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use kaksha::{KdTree2D, KdTree3D, Point2D, Point3D};

fn cloud(n: usize) -> Vec<Point3D> {
    let mut rng = SmallRng::seed_from_u64(99);
    (0..n)
        .map(|_| {
            Point3D::new(
                rng.random_range(-3.0..3.0),
                rng.random_range(-3.0..3.0),
                rng.random_range(-1.0..1.8),
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_build");

    for n in [1_000usize, 10_000, 100_000] {
        let points = cloud(n);
        let projections: Vec<Point2D> = points.iter().map(Point3D::to_2d).collect();

        group.bench_with_input(BenchmarkId::new("3d", n), &n, |b, _| {
            b.iter(|| black_box(KdTree3D::build(points.clone())))
        });
        group.bench_with_input(BenchmarkId::new("2d", n), &n, |b, _| {
            b.iter(|| black_box(KdTree2D::build(projections.clone())))
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let tree = KdTree3D::build(cloud(100_000));
    let queries = cloud(256);
    let mut i = 0usize;

    c.bench_function("kdtree3d_nearest_100k", |b| {
        b.iter(|| {
            i = (i + 1) % queries.len();
            black_box(tree.nearest(black_box(&queries[i])))
        })
    });

    c.bench_function("kdtree3d_k_nearest_8_100k", |b| {
        b.iter(|| {
            i = (i + 1) % queries.len();
            black_box(tree.k_nearest(black_box(&queries[i]), 8))
        })
    });

    c.bench_function("kdtree3d_radius_0.1_100k", |b| {
        b.iter(|| {
            i = (i + 1) % queries.len();
            black_box(tree.within_radius(black_box(&queries[i]), 0.1))
        })
    });
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);

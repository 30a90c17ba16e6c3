//! Benchmarks for parallel isosurface extraction
//!
//! Author: Moroya Sakamoto

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use iso_march::prelude::*;

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_sphere");
    let field = |p: Vec3| sdf_sphere(p, 0.8);

    for resolution in [16usize, 32, 48] {
        let config = GridConfig::for_bounds(Vec3::splat(-1.0), Vec3::splat(1.0), resolution, 0.1);
        group.throughput(Throughput::Elements(config.cell_count() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &config,
            |b, config| b.iter(|| extract_mesh(black_box(&field), config).unwrap()),
        );
    }

    group.finish();
}

fn bench_normal_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("normal_policy");
    let field = |p: Vec3| sdf_torus(p, 0.7, 0.25);
    let base = GridConfig::for_bounds(Vec3::splat(-1.0), Vec3::splat(1.0), 32, 0.1);

    group.bench_function("smooth", |b| {
        let config = GridConfig {
            smooth_normals: true,
            ..base
        };
        b.iter(|| extract_mesh(black_box(&field), &config).unwrap())
    });

    group.bench_function("flat", |b| {
        let config = GridConfig {
            smooth_normals: false,
            ..base
        };
        b.iter(|| extract_mesh(black_box(&field), &config).unwrap())
    });

    group.finish();
}

fn bench_append_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_buffer");
    let triangle = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);

    group.throughput(Throughput::Elements(100_000));
    group.bench_function("append_100k", |b| {
        b.iter(|| {
            let buffer = TriangleBuffer::with_capacity(100_000);
            for _ in 0..100_000 {
                buffer.append(black_box(triangle));
            }
            buffer.len()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_extraction,
    bench_normal_policies,
    bench_append_buffer
);
criterion_main!(benches);

//! Benchmarks for outline generation and per-frame flush.
//!
//! Performance budgets:
//! - morph_path: < 1µs (runs once per animation frame per toast)
//! - compute_constraints: < 1.5µs
//! - svg serialization: < 3µs
//!
//! Run with: cargo bench -p goey-render --bench shape_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use goey_core::geometry::Dimensions;
use goey_render::{compute_constraints, morph_path};
use std::hint::black_box;

fn bench_morph_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shape/morph_path");
    for t in [0.0, 0.5, 1.0] {
        group.bench_with_input(BenchmarkId::from_parameter(t), &t, |b, &t| {
            b.iter(|| black_box(morph_path(black_box(140.0), 320.0, 118.0, t)))
        });
    }
    group.finish();
}

fn bench_flush(c: &mut Criterion) {
    let dims = Dimensions::new(140.0, 320.0, 118.0);
    c.bench_function("shape/compute_constraints", |b| {
        b.iter(|| black_box(compute_constraints(&dims, &dims, black_box(0.42), true)))
    });
}

fn bench_svg(c: &mut Criterion) {
    let path = morph_path(140.0, 320.0, 118.0, 0.42);
    c.bench_function("shape/svg", |b| b.iter(|| black_box(path.to_string())));
}

criterion_group!(benches, bench_morph_path, bench_flush, bench_svg);
criterion_main!(benches);

//! Criterion benchmarks for the merged growth traversal.
//!
//! Each benchmark grows the same site year after year, which is the
//! steady-state workload: the species set stays fixed while every
//! cohort ages through the k-way merge once per iteration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sylva_bench::{populated_site, reference_site, stress_site};

/// Benchmark: one year of growth on a typical 6-species stand.
fn bench_grow_reference(c: &mut Criterion) {
    let mut site = reference_site(42);
    c.bench_function("grow_reference_6x20", |b| {
        b.iter(|| {
            let stats = site.grow(false, true).unwrap();
            black_box(stats);
        });
    });
}

/// Benchmark: one year of growth on a 30-species stress stand.
fn bench_grow_stress(c: &mut Criterion) {
    let mut site = stress_site(42);
    c.bench_function("grow_stress_30x50", |b| {
        b.iter(|| {
            let stats = site.grow(false, true).unwrap();
            black_box(stats);
        });
    });
}

/// Benchmark: succession-boundary years, including the combine-young
/// scan, on the reference stand.
fn bench_grow_succession_boundary(c: &mut Criterion) {
    let mut site = populated_site(6, 20, 7);
    c.bench_function("grow_succession_boundary_6x20", |b| {
        b.iter(|| {
            let stats = site.grow(true, false).unwrap();
            black_box(stats);
        });
    });
}

criterion_group!(
    benches,
    bench_grow_reference,
    bench_grow_stress,
    bench_grow_succession_boundary
);
criterion_main!(benches);

//! Benchmarks for pipe units.
//!
//! Compares pipelines built from units against the equivalent hand-written
//! iterator chains, and measures the materializing units on their own.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pipette::prelude::*;
use pipette::value::Value;

// =============================================================================
// Lazy Chain Benchmark
// =============================================================================

fn benchmark_lazy_chain(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("lazy_chain");

    for size in [100, 1_000, 10_000] {
        let data: Vec<u64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("units", size), &data, |bencher, data| {
            bencher.iter(|| {
                let total = data
                    .iter()
                    .copied()
                    .pipe(select(|value: u64| value * 3))
                    .pipe(where_(|value: &u64| value % 2 == 0))
                    .pipe(sum());
                black_box(total)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("iterator", size),
            &data,
            |bencher, data| {
                bencher.iter(|| {
                    let total: u64 = data
                        .iter()
                        .map(|value| value * 3)
                        .filter(|value| value % 2 == 0)
                        .sum();
                    black_box(total)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Take From Infinite Source Benchmark
// =============================================================================

fn benchmark_take_infinite(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("take_infinite");

    for count in [10, 1_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("units", count), &count, |bencher, &count| {
            bencher.iter(|| {
                let head = (0_u64..)
                    .pipe(take(count))
                    .pipe(concat().separator(""));
                black_box(head.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Materializing Units Benchmark
// =============================================================================

fn benchmark_materializing(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("materializing");

    for size in [100, 1_000, 10_000] {
        let data: Vec<u32> = (0..size).map(|value| value.wrapping_mul(2_654_435_761) % 1_000).collect();

        group.bench_with_input(BenchmarkId::new("sort", size), &data, |bencher, data| {
            bencher.iter(|| black_box(data.clone().pipe(sort()).pipe(count())));
        });

        group.bench_with_input(BenchmarkId::new("groupby", size), &data, |bencher, data| {
            bencher.iter(|| {
                black_box(
                    data.clone()
                        .pipe(groupby(|value: &u32| value % 10))
                        .pipe(count()),
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("tail", size), &data, |bencher, data| {
            bencher.iter(|| black_box(data.iter().pipe(tail(10))));
        });
    }

    group.finish();
}

// =============================================================================
// Traverse Benchmark
// =============================================================================

fn nested(depth: usize, width: usize) -> Value {
    if depth == 0 {
        return Value::from(1);
    }
    (0..width).map(|_| nested(depth - 1, width)).collect()
}

fn benchmark_traverse(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("traverse");

    for depth in [2, 4, 6] {
        let value = nested(depth, 4);
        group.bench_with_input(BenchmarkId::new("leaves", depth), &value, |bencher, value| {
            bencher.iter(|| black_box(value.clone().pipe(traverse()).pipe(count())));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_lazy_chain,
    benchmark_take_infinite,
    benchmark_materializing,
    benchmark_traverse
);

criterion_main!(benches);

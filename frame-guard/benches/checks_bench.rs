//! Benchmarks for representative checks over mid-sized tables.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use frame_guard::prelude::*;
use rand::Rng;

fn random_table(rows: usize) -> Table {
    let mut rng = rand::rng();
    let values: Vec<f64> = (0..rows).map(|_| rng.random_range(0.0..1.0)).collect();
    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let labels: Vec<&str> = (0..rows).map(|i| if i % 2 == 0 { "even" } else { "odd" }).collect();

    Table::try_new(vec![
        ("value", Arc::new(Float64Array::from(values)) as ArrayRef),
        ("sorted", Arc::new(Float64Array::from(sorted)) as ArrayRef),
        ("parity", Arc::new(StringArray::from(labels)) as ArrayRef),
    ])
    .unwrap()
}

fn bench_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("checks");
    for rows in [1_000usize, 100_000] {
        let table = random_table(rows);
        let range_items = vec![("value".to_string(), Bounds::new(0.0, 1.0))];
        let set_items = vec![(
            "parity".to_string(),
            vec![CellValue::from("even"), CellValue::from("odd")],
        )];

        group.bench_with_input(BenchmarkId::new("none_missing", rows), &table, |b, t| {
            b.iter(|| none_missing(t, None).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("within_range", rows), &table, |b, t| {
            b.iter(|| within_range(t, &range_items).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("within_set", rows), &table, |b, t| {
            b.iter(|| within_set(t, &set_items).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("is_monotonic", rows), &table, |b, t| {
            b.iter(|| {
                let items = vec![("sorted".to_string(), MonotonicOptions::increasing())];
                is_monotonic(t, Some(&items), MonotonicOptions::default()).unwrap()
            });
        });
        group.bench_with_input(BenchmarkId::new("within_n_std", rows), &table, |b, t| {
            b.iter(|| within_n_std(t, 6.0).unwrap());
        });
    }
    group.finish();
}

fn bench_guard_overhead(c: &mut Criterion) {
    let table = random_table(10_000);
    let guard = CheckSpec::shape((10_000usize, 3usize)).guard();
    let stage = guard.wrap_fn(|table: Table| table);

    c.bench_function("guard_wrap_shape_10k", |b| {
        b.iter(|| stage(table.clone()).unwrap());
    });
}

criterion_group!(benches, bench_checks, bench_guard_overhead);
criterion_main!(benches);

//! Criterion micro-benchmarks for the element-wise operators.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use varray_bench::{float8_workload, int4_matrix_workload};
use varray_core::Datum;
use varray_ops::{array_dot, array_scalar_div, array_scalar_mult};

/// Benchmark: dot product of two 10K float8 vectors.
fn bench_dot_10k(c: &mut Criterion) {
    let a = float8_workload(10_000).unwrap();
    let b = float8_workload(10_000).unwrap();

    c.bench_function("dot_float8_10k", |bench| {
        bench.iter(|| black_box(array_dot(&a, &b).unwrap()));
    });
}

/// Benchmark: scale a 10K float8 vector.
fn bench_scalar_mult_10k(c: &mut Criterion) {
    let a = float8_workload(10_000).unwrap();
    let k = Datum::from_f64(1.5);

    c.bench_function("scalar_mult_float8_10k", |bench| {
        bench.iter(|| black_box(array_scalar_mult(&a, &k).unwrap()));
    });
}

/// Benchmark: integer division over a 100x100 int4 matrix.
fn bench_scalar_div_int4(c: &mut Criterion) {
    let a = int4_matrix_workload(100, 100).unwrap();
    let k = Datum::from_i32(3);

    c.bench_function("scalar_div_int4_100x100", |bench| {
        bench.iter(|| black_box(array_scalar_div(&a, &k).unwrap()));
    });
}

criterion_group!(benches, bench_dot_10k, bench_scalar_mult_10k, bench_scalar_div_int4);
criterion_main!(benches);

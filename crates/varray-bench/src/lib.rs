//! Benchmark workloads for the varray codec and operators.
//!
//! - [`float8_workload`]: a one-dimensional float8 array of `n` items
//! - [`int4_matrix_workload`]: a `rows x cols` int4 array
//! - [`sparse_workload`]: float8 with every `stride`-th item null
//!
//! Values are a deterministic function of the item index so repeated runs
//! pack identical bytes.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use varray_array::{construct_md_array, ArrayType, ArrayError, Source};
use varray_core::{type_traits, Datum, Oid};

/// Value stored at item `i`.
pub fn value_at(i: usize) -> f64 {
    ((i % 97) as f64 - 48.0) * 0.25
}

fn build(elems: Vec<Datum>, nulls: Option<&[bool]>, dims: &[i32], oid: Oid) -> Result<ArrayType, ArrayError> {
    let traits = type_traits(oid).map_err(|_| ArrayError::UnsupportedType { oid })?;
    let lbs = vec![1; dims.len()];
    construct_md_array(Source::Consume(elems), nulls, dims, &lbs, oid, traits)
}

fn extent(n: usize) -> Result<i32, ArrayError> {
    i32::try_from(n).map_err(|_| ArrayError::SizeExceeded {
        max: i32::MAX as usize,
    })
}

/// Float8 elements for `n` items.
pub fn float8_elems(n: usize) -> Vec<Datum> {
    (0..n).map(|i| Datum::from_f64(value_at(i))).collect()
}

/// One-dimensional float8 array of `n` items.
pub fn float8_workload(n: usize) -> Result<ArrayType, ArrayError> {
    build(float8_elems(n), None, &[extent(n)?], Oid::FLOAT8)
}

/// Two-dimensional int4 array.
pub fn int4_matrix_workload(rows: usize, cols: usize) -> Result<ArrayType, ArrayError> {
    let elems = (0..rows * cols)
        .map(|i| Datum::from_i32(value_at(i) as i32))
        .collect();
    build(elems, None, &[extent(rows)?, extent(cols)?], Oid::INT4)
}

/// One-dimensional float8 array with every `stride`-th item null.
pub fn sparse_workload(n: usize, stride: usize) -> Result<ArrayType, ArrayError> {
    let nulls: Vec<bool> = (0..n).map(|i| stride > 0 && i % stride == 0).collect();
    build(float8_elems(n), Some(&nulls), &[extent(n)?], Oid::FLOAT8)
}

//! Typed array builders.
//!
//! Each builder packs its input with the element type's own traits and
//! panics on failure, which is what a test wants.

use varray_array::{construct_array, construct_md_array, ArrayType, Source};
use varray_core::{type_traits, Datum, Oid};

fn build(elems: Vec<Datum>, nulls: Option<&[bool]>, dims: &[i32], oid: Oid) -> ArrayType {
    let traits = type_traits(oid).expect("fixture uses a numeric type");
    let lbs = vec![1; dims.len()];
    construct_md_array(Source::Consume(elems), nulls, dims, &lbs, oid, traits)
        .expect("fixture array must construct")
}

/// One-dimensional float8 array, lower bound 1.
pub fn float8_vector(values: &[f64]) -> ArrayType {
    let elems: Vec<Datum> = values.iter().map(|&v| Datum::from_f64(v)).collect();
    let traits = type_traits(Oid::FLOAT8).expect("float8 is numeric");
    construct_array(Source::Consume(elems), values.len(), Oid::FLOAT8, traits)
        .expect("fixture array must construct")
}

/// One-dimensional float8 array where `None` entries are null.
pub fn float8_vector_with_nulls(values: &[Option<f64>]) -> ArrayType {
    let elems: Vec<Datum> = values
        .iter()
        .map(|v| v.map_or(Datum::zero(), Datum::from_f64))
        .collect();
    let nulls: Vec<bool> = values.iter().map(Option::is_none).collect();
    build(elems, Some(&nulls), &[values.len() as i32], Oid::FLOAT8)
}

/// One-dimensional float4 array.
pub fn float4_vector(values: &[f32]) -> ArrayType {
    let elems = values.iter().map(|&v| Datum::from_f32(v)).collect();
    build(elems, None, &[values.len() as i32], Oid::FLOAT4)
}

/// One-dimensional int2 array.
pub fn int2_vector(values: &[i16]) -> ArrayType {
    let elems = values.iter().map(|&v| Datum::from_i16(v)).collect();
    build(elems, None, &[values.len() as i32], Oid::INT2)
}

/// One-dimensional int4 array.
pub fn int4_vector(values: &[i32]) -> ArrayType {
    let elems = values.iter().map(|&v| Datum::from_i32(v)).collect();
    build(elems, None, &[values.len() as i32], Oid::INT4)
}

/// One-dimensional int8 array.
pub fn int8_vector(values: &[i64]) -> ArrayType {
    let elems = values.iter().map(|&v| Datum::from_i64(v)).collect();
    build(elems, None, &[values.len() as i32], Oid::INT8)
}

/// Row-major `rows x cols` float8 matrix.
pub fn float8_matrix(rows: i32, cols: i32, values: &[f64]) -> ArrayType {
    let elems = values.iter().map(|&v| Datum::from_f64(v)).collect();
    build(elems, None, &[rows, cols], Oid::FLOAT8)
}

/// Row-major `rows x cols` int4 matrix.
pub fn int4_matrix(rows: i32, cols: i32, values: &[i32]) -> ArrayType {
    let elems = values.iter().map(|&v| Datum::from_i32(v)).collect();
    build(elems, None, &[rows, cols], Oid::INT4)
}

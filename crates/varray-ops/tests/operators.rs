//! Integration test: the generic operators against real containers.
//!
//! Covers shape checking, the degenerate zero-dimension paths and their
//! warnings, null rejection, and the arithmetic of the ready-made
//! operators across element types.

use std::cell::Cell;

use proptest::prelude::*;

use varray_array::{construct_empty_array, deconstruct_array, deconstruct_array_strict};
use varray_core::{type_traits, Datum, DatumError, Oid};
use varray_ops::{
    array_dot, array_scalar_div, array_scalar_mult, average_finalize, average_root_finalize,
    element_dot, map_array_with_scalar, noop_finalize, reduce_two_arrays, OpError,
};
use varray_test_utils::{
    capture_logs, float4_vector, float8_matrix, float8_vector, float8_vector_with_nulls,
    int2_vector, int4_matrix, int4_vector, int8_vector,
};

fn f64s(a: &varray_array::ArrayType) -> Vec<f64> {
    let t = type_traits(Oid::FLOAT8).unwrap();
    deconstruct_array_strict(a, Oid::FLOAT8, t)
        .unwrap()
        .iter()
        .map(Datum::as_f64)
        .collect()
}

// ── Reduction ────────────────────────────────────────────────────────

#[test]
fn dot_of_small_vectors() {
    let a = float8_vector(&[1.0, 2.0, 3.0]);
    let b = float8_vector(&[4.0, 5.0, 6.0]);
    assert_eq!(array_dot(&a, &b), Ok(32.0));
}

#[test]
fn dot_over_integer_elements_widens_to_float8() {
    let a = int4_vector(&[1, 2, 3]);
    let b = int4_vector(&[4, 5, 6]);
    assert_eq!(array_dot(&a, &b), Ok(32.0));
    let a = int2_vector(&[-1, 2]);
    let b = int2_vector(&[3, 4]);
    assert_eq!(array_dot(&a, &b), Ok(5.0));
    let a = int8_vector(&[1 << 40, 1]);
    let b = int8_vector(&[2, 3]);
    assert_eq!(array_dot(&a, &b), Ok((1u64 << 41) as f64 + 3.0));
}

#[test]
fn transposed_shapes_do_not_match() {
    let a = float8_matrix(2, 3, &[0.0; 6]);
    let b = float8_matrix(3, 2, &[0.0; 6]);
    assert_eq!(
        array_dot(&a, &b),
        Err(OpError::RangeMismatch {
            dim: 0,
            left: (1, 3),
            right: (1, 4)
        })
    );
}

#[test]
fn dimension_counts_must_match() {
    let a = float8_vector(&[1.0]);
    let b = float8_matrix(1, 1, &[1.0]);
    assert_eq!(
        array_dot(&a, &b),
        Err(OpError::DimensionCountMismatch { left: 1, right: 2 })
    );
}

#[test]
fn empty_pair_returns_zero_without_combining() {
    let calls = Cell::new(0);
    let counting = |e: &Datum, t: Oid, r: &Datum, rt: Oid, o: &Datum, ot: Oid| {
        calls.set(calls.get() + 1);
        element_dot(e, t, r, rt, o, ot)
    };
    let a = construct_empty_array(Oid::FLOAT8);
    let b = construct_empty_array(Oid::FLOAT8);
    let (r, logs) = capture_logs(|| reduce_two_arrays(&a, &b, counting, noop_finalize));
    assert_eq!(r.unwrap().as_f64(), 0.0);
    assert_eq!(calls.get(), 0);
    assert!(logs.contains("input are empty arrays"));
}

#[test]
fn nulls_are_rejected() {
    let a = float8_vector_with_nulls(&[Some(1.0), None]);
    let b = float8_vector(&[1.0, 2.0]);
    assert_eq!(array_dot(&a, &b), Err(OpError::NullElement));
    assert_eq!(array_dot(&b, &a), Err(OpError::NullElement));
}

#[test]
fn element_types_must_match() {
    let a = int4_vector(&[1, 2]);
    let b = float8_vector(&[1.0, 2.0]);
    assert_eq!(
        array_dot(&a, &b),
        Err(OpError::ElementTypeMismatch {
            left: Oid::INT4,
            right: Oid::FLOAT8
        })
    );
}

#[test]
fn finalizers_see_item_count() {
    let a = float8_vector(&[1.0, 2.0, 3.0, 4.0]);
    let ones = float8_vector(&[1.0; 4]);
    let mean = reduce_two_arrays(&a, &ones, element_dot, average_finalize).unwrap();
    assert_eq!(mean.as_f64(), 2.5);
    let sq = reduce_two_arrays(&a, &a, element_dot, average_root_finalize).unwrap();
    assert_eq!(sq.as_f64(), 10.0f64.sqrt());
}

#[test]
fn mean_of_nothing_warns() {
    let (r, logs) = capture_logs(|| average_finalize(Datum::from_f64(3.0), 0, Oid::FLOAT8));
    assert_eq!(r.unwrap().as_f64(), 0.0);
    assert!(logs.contains("returning 0"));
}

// ── Map ──────────────────────────────────────────────────────────────

#[test]
fn scalar_mult_preserves_shape() {
    let a = float8_vector(&[1.0, 2.0, 3.0]);
    let r = array_scalar_mult(&a, &Datum::from_f64(2.0)).unwrap();
    assert_eq!(f64s(&r), vec![2.0, 4.0, 6.0]);
    assert_eq!(r.ndim(), a.ndim());
    assert_eq!(r.dims(), a.dims());
    assert_eq!(r.lbounds(), a.lbounds());
    assert_eq!(r.elemtype(), Oid::FLOAT8);
}

#[test]
fn scalar_mult_on_matrix_and_int_elements() {
    let m = int4_matrix(2, 2, &[1, -2, 3, -4]);
    let r = array_scalar_mult(&m, &Datum::from_i32(3)).unwrap();
    let t = type_traits(Oid::INT4).unwrap();
    let vals: Vec<i32> = deconstruct_array_strict(&r, Oid::INT4, t)
        .unwrap()
        .iter()
        .map(Datum::as_i32)
        .collect();
    assert_eq!(vals, vec![3, -6, 9, -12]);
    assert_eq!(r.dims(), &[2, 2]);
}

#[test]
fn scalar_mult_on_float4() {
    let a = float4_vector(&[0.5, -1.5]);
    let r = array_scalar_mult(&a, &Datum::from_f32(2.0)).unwrap();
    let t = type_traits(Oid::FLOAT4).unwrap();
    let vals: Vec<f32> = deconstruct_array_strict(&r, Oid::FLOAT4, t)
        .unwrap()
        .iter()
        .map(Datum::as_f32)
        .collect();
    assert_eq!(vals, vec![1.0, -3.0]);
}

#[test]
fn empty_map_returns_input() {
    let a = construct_empty_array(Oid::FLOAT8);
    let (r, logs) = capture_logs(|| array_scalar_mult(&a, &Datum::from_f64(5.0)));
    let r = r.unwrap();
    assert_eq!(r, a);
    assert_eq!(r.ndim(), 0);
    assert!(logs.contains("WARN"));
}

#[test]
fn map_keeps_null_positions() {
    let a = float8_vector_with_nulls(&[Some(1.0), None, Some(3.0)]);
    let r = array_scalar_mult(&a, &Datum::from_f64(10.0)).unwrap();
    let t = type_traits(Oid::FLOAT8).unwrap();
    let d = deconstruct_array(&r, Oid::FLOAT8, t).unwrap();
    assert_eq!(d.nulls, vec![false, true, false]);
    assert_eq!(d.elems[0].as_f64(), 10.0);
    assert_eq!(d.elems[2].as_f64(), 30.0);
}

#[test]
fn map_rejects_non_numeric() {
    let t = varray_core::TypeTraits::TEXT;
    let elems = [Datum::from_text("a")];
    let a = varray_array::construct_array(varray_array::Source::Borrow(&elems), 1, Oid::TEXT, t).unwrap();
    assert_eq!(
        map_array_with_scalar(&a, &Datum::from_text("b"), element_dot),
        Err(OpError::UnsupportedType { oid: Oid::TEXT })
    );
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "scalar storage does not match element type")]
fn scalar_with_foreign_storage_is_caught() {
    let a = int4_vector(&[1, 2]);
    let _ = array_scalar_mult(&a, &Datum::from_bytes(&[0u8; 8]));
}

#[test]
fn narrowed_scalar_scales_integer_array() {
    let a = int4_vector(&[2, 5]);
    let k = varray_core::float8_datum_cast(3.0, a.elemtype()).unwrap();
    let r = array_scalar_mult(&a, &k).unwrap();
    let t = type_traits(Oid::INT4).unwrap();
    let vals: Vec<i32> = deconstruct_array_strict(&r, Oid::INT4, t)
        .unwrap()
        .iter()
        .map(Datum::as_i32)
        .collect();
    assert_eq!(vals, vec![6, 15]);
}

#[test]
fn division_by_zero_scalar() {
    let a = float8_vector(&[1.0]);
    assert_eq!(
        array_scalar_div(&a, &Datum::from_f64(0.0)),
        Err(OpError::DivisionByZero)
    );
    let a = int4_vector(&[1]);
    assert_eq!(
        array_scalar_div(&a, &Datum::from_i32(0)),
        Err(OpError::DivisionByZero)
    );
}

#[test]
fn integer_division_stays_integer() {
    let a = int4_vector(&[7, -7, 9]);
    let r = array_scalar_div(&a, &Datum::from_i32(2)).unwrap();
    let t = type_traits(Oid::INT4).unwrap();
    let vals: Vec<i32> = deconstruct_array_strict(&r, Oid::INT4, t)
        .unwrap()
        .iter()
        .map(Datum::as_i32)
        .collect();
    assert_eq!(vals, vec![3, -3, 4]);
}

#[test]
fn int2_narrowing_is_range_checked() {
    let a = int2_vector(&[16_000, 2]);
    assert_eq!(
        array_scalar_mult(&a, &Datum::from_i16(3)),
        Err(OpError::Datum(DatumError::OutOfRange { target: "smallint" }))
    );
    let r = array_scalar_mult(&a, &Datum::from_i16(2)).unwrap();
    let t = type_traits(Oid::INT2).unwrap();
    let vals: Vec<i16> = deconstruct_array_strict(&r, Oid::INT2, t)
        .unwrap()
        .iter()
        .map(Datum::as_i16)
        .collect();
    assert_eq!(vals, vec![32_000, 4]);
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dot_matches_naive_sum(pairs in prop::collection::vec((-1000i32..1000, -1000i32..1000), 1..64)) {
        let xs: Vec<f64> = pairs.iter().map(|p| f64::from(p.0)).collect();
        let ys: Vec<f64> = pairs.iter().map(|p| f64::from(p.1)).collect();
        let expected: f64 = xs.iter().zip(&ys).map(|(x, y)| x * y).sum();
        prop_assert_eq!(array_dot(&float8_vector(&xs), &float8_vector(&ys)).unwrap(), expected);
    }

    #[test]
    fn mult_then_div_restores_integers(values in prop::collection::vec(-10_000i32..10_000, 1..32), k in 1i32..50) {
        let a = int4_vector(&values);
        let scaled = array_scalar_mult(&a, &Datum::from_i32(k)).unwrap();
        let back = array_scalar_div(&scaled, &Datum::from_i32(k)).unwrap();
        prop_assert_eq!(back, a);
    }
}

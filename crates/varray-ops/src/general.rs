//! The two generic array algorithms.

use varray_array::{array_get_n_items, construct_md_array, ArrayType, Source};
use varray_core::{type_traits, Datum, Oid};

use crate::element::ElementFn;
use crate::error::OpError;
use crate::finalize::FinalizeFn;

/// Fold two arrays of identical shape into one scalar.
///
/// Both arrays must have the same dimension count, the same extent and
/// lower bound in every dimension, the same numeric element type and no
/// nulls. The running result starts as float8 zero and is folded with
/// `f(a_i, type, result, FLOAT8, b_i, type)` in storage order; `fin` then
/// receives the result and the item count.
///
/// Two zero-dimension arrays are a degenerate but valid input: the
/// combinator is never called and the result is float8 zero.
pub fn reduce_two_arrays<F, G>(a: &ArrayType, b: &ArrayType, f: F, fin: G) -> Result<Datum, OpError>
where
    F: ElementFn,
    G: FinalizeFn,
{
    if a.ndim() != b.ndim() {
        return Err(OpError::DimensionCountMismatch {
            left: a.ndim(),
            right: b.ndim(),
        });
    }
    if a.ndim() == 0 {
        tracing::warn!("input are empty arrays");
        return Ok(Datum::from_f64(0.0));
    }
    let ranges = a.dims().iter().zip(a.lbounds()).zip(b.dims().iter().zip(b.lbounds()));
    for (dim, ((&d1, &l1), (&d2, &l2))) in ranges.enumerate() {
        if d1 != d2 || l1 != l2 {
            return Err(OpError::RangeMismatch {
                dim,
                left: (l1, l1.wrapping_add(d1)),
                right: (l2, l2.wrapping_add(d2)),
            });
        }
    }
    let nitems = array_get_n_items(a.dims())?;
    if a.has_nulls() || b.has_nulls() {
        return Err(OpError::NullElement);
    }
    if a.elemtype() != b.elemtype() {
        return Err(OpError::ElementTypeMismatch {
            left: a.elemtype(),
            right: b.elemtype(),
        });
    }
    let elt_type = a.elemtype();
    let traits = type_traits(elt_type)?;

    let mut result = Datum::from_f64(0.0);
    for (x, y) in a.elements(traits).zip(b.elements(traits)) {
        let x = x?.ok_or(OpError::NullElement)?;
        let y = y?.ok_or(OpError::NullElement)?;
        result = f.apply(&x, elt_type, &result, Oid::FLOAT8, &y, elt_type)?;
    }
    tracing::trace!(nitems, elemtype = %elt_type, "reduced two arrays");
    fin.finalize(result, nitems, Oid::FLOAT8)
}

/// Apply `f` to every element of `a` with `scalar` as the second operand.
///
/// Each present element `e` becomes `f(e, type, e, type, scalar, type)`;
/// the running-result slot carries the element itself since a map has no
/// accumulator. Nulls stay null. The result has the shape and element
/// type of `a`. A zero-dimension input is returned unchanged.
pub fn map_array_with_scalar<F>(a: &ArrayType, scalar: &Datum, f: F) -> Result<ArrayType, OpError>
where
    F: ElementFn,
{
    if a.ndim() == 0 {
        tracing::warn!("input are empty arrays");
        return Ok(a.clone());
    }
    let elt_type = a.elemtype();
    if !elt_type.is_numeric() {
        return Err(OpError::UnsupportedType { oid: elt_type });
    }
    let traits = type_traits(elt_type)?;
    debug_assert_eq!(
        scalar.is_by_ref(),
        !traits.by_val,
        "scalar storage does not match element type {elt_type}"
    );

    let nitems = a.nitems();
    let mut out = Vec::with_capacity(nitems);
    let mut nulls = Vec::with_capacity(if a.has_nulls() { nitems } else { 0 });
    for item in a.elements(traits) {
        match item? {
            Some(e) => {
                out.push(f.apply(&e, elt_type, &e, elt_type, scalar, elt_type)?);
                if a.has_nulls() {
                    nulls.push(false);
                }
            }
            None => {
                out.push(Datum::zero());
                nulls.push(true);
            }
        }
    }
    let nulls = a.has_nulls().then_some(nulls.as_slice());
    Ok(construct_md_array(
        Source::Consume(out),
        nulls,
        a.dims(),
        a.lbounds(),
        elt_type,
        traits,
    )?)
}

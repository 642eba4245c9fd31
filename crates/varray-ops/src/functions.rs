//! Ready-made operators built from the generic algorithms.

use varray_array::ArrayType;
use varray_core::Datum;

use crate::element::{element_div, element_dot, element_mult};
use crate::error::OpError;
use crate::finalize::noop_finalize;
use crate::general::{map_array_with_scalar, reduce_two_arrays};

/// Sum of the element-wise products of two equally shaped arrays.
pub fn array_dot(a: &ArrayType, b: &ArrayType) -> Result<f64, OpError> {
    reduce_two_arrays(a, b, element_dot, noop_finalize).map(|d| d.as_f64())
}

/// Multiply every element by `scalar`, which must be of the array's
/// element type.
///
/// The scalar is read through the element type's storage, so narrow a
/// wider value first:
///
/// ```rust
/// use varray_array::{construct_array, Source};
/// use varray_core::{float8_datum_cast, type_traits, Datum, Oid};
/// use varray_ops::array_scalar_mult;
///
/// let t = type_traits(Oid::INT4).unwrap();
/// let elems = [Datum::from_i32(2), Datum::from_i32(5)];
/// let a = construct_array(Source::Borrow(&elems), 2, Oid::INT4, t).unwrap();
/// let k = float8_datum_cast(3.0, a.elemtype()).unwrap();
/// let r = array_scalar_mult(&a, &k).unwrap();
/// assert_eq!(r.nitems(), 2);
/// ```
pub fn array_scalar_mult(a: &ArrayType, scalar: &Datum) -> Result<ArrayType, OpError> {
    map_array_with_scalar(a, scalar, element_mult)
}

/// Divide every element by `scalar`, which must be of the array's element
/// type. Integer arrays use truncating integer division.
pub fn array_scalar_div(a: &ArrayType, scalar: &Datum) -> Result<ArrayType, OpError> {
    map_array_with_scalar(a, scalar, element_div)
}

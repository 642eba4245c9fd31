//! Reduction finalizers.

use varray_core::{datum_float8_cast, Datum, Oid};

use crate::error::OpError;

/// Post-processes a reduction's running result and item count.
pub trait FinalizeFn {
    /// Produce the returned scalar.
    fn finalize(&self, value: Datum, nitems: usize, elt_type: Oid) -> Result<Datum, OpError>;
}

impl<F> FinalizeFn for F
where
    F: Fn(Datum, usize, Oid) -> Result<Datum, OpError>,
{
    fn finalize(&self, value: Datum, nitems: usize, elt_type: Oid) -> Result<Datum, OpError> {
        self(value, nitems, elt_type)
    }
}

/// Return the running result unchanged.
pub fn noop_finalize(value: Datum, _nitems: usize, _elt_type: Oid) -> Result<Datum, OpError> {
    Ok(value)
}

/// Divide the running result by the item count.
///
/// An empty reduction warns and yields 0 instead of dividing.
pub fn average_finalize(value: Datum, nitems: usize, elt_type: Oid) -> Result<Datum, OpError> {
    let v = datum_float8_cast(&value, elt_type)?;
    if nitems == 0 {
        tracing::warn!("input array only contains NULL or NaN, returning 0");
        return Ok(Datum::from_f64(0.0));
    }
    Ok(Datum::from_f64(v / nitems as f64))
}

/// Square root of the running result over `nitems - 1`.
///
/// Fewer than two items yield 0.
pub fn average_root_finalize(value: Datum, nitems: usize, elt_type: Oid) -> Result<Datum, OpError> {
    let v = datum_float8_cast(&value, elt_type)?;
    if nitems <= 1 {
        return Ok(Datum::from_f64(0.0));
    }
    Ok(Datum::from_f64((v / (nitems as f64 - 1.0)).sqrt()))
}

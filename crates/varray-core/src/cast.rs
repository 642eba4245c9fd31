//! Numeric widening and checked narrowing between datums.
//!
//! Operators fold in a common `f64` (or `i64` for integer division)
//! intermediate and narrow back to the result element type. Every narrowing
//! is range checked; nothing here saturates or wraps silently.

use crate::datum::Datum;
use crate::error::DatumError;
use crate::oid::Oid;

/// Validate a narrowed float against an overflow/underflow policy.
///
/// `inf_is_valid` permits an infinite `val` (typically because an input was
/// already infinite); `zero_is_valid` permits a zero `val` (typically
/// because the exact result is zero).
pub fn check_float_val(val: f64, inf_is_valid: bool, zero_is_valid: bool) -> Result<(), DatumError> {
    if val.is_infinite() && !inf_is_valid {
        return Err(DatumError::FloatOverflow);
    }
    if val == 0.0 && !zero_is_valid {
        return Err(DatumError::FloatUnderflow);
    }
    Ok(())
}

/// Widen any numeric datum to `f64`.
pub fn datum_float8_cast(elt: &Datum, oid: Oid) -> Result<f64, DatumError> {
    match oid {
        Oid::INT2 => Ok(f64::from(elt.as_i16())),
        Oid::INT4 => Ok(f64::from(elt.as_i32())),
        Oid::INT8 => Ok(elt.as_i64() as f64),
        Oid::FLOAT4 => Ok(f64::from(elt.as_f32())),
        Oid::FLOAT8 => Ok(elt.as_f64()),
        _ => Err(DatumError::UnsupportedType { oid }),
    }
}

/// Widen any integer datum to `i64`. Floats are unsupported.
pub fn datum_int64_cast(elt: &Datum, oid: Oid) -> Result<i64, DatumError> {
    match oid {
        Oid::INT2 => Ok(i64::from(elt.as_i16())),
        Oid::INT4 => Ok(i64::from(elt.as_i32())),
        Oid::INT8 => Ok(elt.as_i64()),
        _ => Err(DatumError::UnsupportedType { oid }),
    }
}

/// Narrow an `i64` to an integer datum of type `oid`.
pub fn int64_datum_cast(v: i64, oid: Oid) -> Result<Datum, DatumError> {
    match oid {
        Oid::INT2 => i16::try_from(v)
            .map(Datum::from_i16)
            .map_err(|_| DatumError::OutOfRange { target: "smallint" }),
        Oid::INT4 => i32::try_from(v)
            .map(Datum::from_i32)
            .map_err(|_| DatumError::OutOfRange { target: "integer" }),
        Oid::INT8 => Ok(Datum::from_i64(v)),
        _ => Err(DatumError::UnsupportedType { oid }),
    }
}

/// Narrow an `f64` to a numeric datum of type `oid`.
pub fn float8_datum_cast(v: f64, oid: Oid) -> Result<Datum, DatumError> {
    match oid {
        Oid::INT2 => dtoi2(v),
        Oid::INT4 => dtoi4(v),
        Oid::INT8 => dtoi8(v),
        Oid::FLOAT4 => dtof(v),
        Oid::FLOAT8 => Ok(Datum::from_f64(v)),
        _ => Err(DatumError::UnsupportedType { oid }),
    }
}

/// Round half-to-even, rejecting NaN and values outside `[min, max]`.
fn round_in_range(num: f64, min: f64, max: f64, target: &'static str) -> Result<f64, DatumError> {
    let r = num.round_ties_even();
    if r.is_nan() || r < min || r > max {
        return Err(DatumError::OutOfRange { target });
    }
    Ok(r)
}

/// `f64` to int2.
pub fn dtoi2(num: f64) -> Result<Datum, DatumError> {
    let r = round_in_range(num, f64::from(i16::MIN), f64::from(i16::MAX), "smallint")?;
    Ok(Datum::from_i16(r as i16))
}

/// `f64` to int4.
pub fn dtoi4(num: f64) -> Result<Datum, DatumError> {
    let r = round_in_range(num, f64::from(i32::MIN), f64::from(i32::MAX), "integer")?;
    Ok(Datum::from_i32(r as i32))
}

/// `f64` to int8.
pub fn dtoi8(num: f64) -> Result<Datum, DatumError> {
    let r = num.round_ties_even();
    // i64::MAX is not representable; 2^63 is the first value past the end.
    if r.is_nan() || r < i64::MIN as f64 || r >= 9_223_372_036_854_775_808.0 {
        return Err(DatumError::OutOfRange { target: "bigint" });
    }
    Ok(Datum::from_i64(r as i64))
}

/// `f64` to float4.
pub fn dtof(num: f64) -> Result<Datum, DatumError> {
    let narrowed = num as f32;
    check_float_val(f64::from(narrowed), num.is_infinite(), num == 0.0)?;
    Ok(Datum::from_f32(narrowed))
}

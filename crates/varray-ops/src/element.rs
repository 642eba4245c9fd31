//! Element combinators.
//!
//! A combinator folds one element (and optionally a second operand) into a
//! running result. Every argument carries its own type tag, so the same
//! combinator serves any mix of numeric element and result types.

use varray_core::{
    check_float_val, datum_float8_cast, datum_int64_cast, float8_datum_cast, int64_datum_cast,
    Datum, DatumError, Oid,
};

use crate::error::OpError;

/// A type-erased fold step.
///
/// `apply(element, elt_type, result, result_type, opt, opt_type)` returns
/// the new running result, which is of `result_type`.
pub trait ElementFn {
    /// Combine one step.
    fn apply(
        &self,
        element: &Datum,
        elt_type: Oid,
        result: &Datum,
        result_type: Oid,
        opt: &Datum,
        opt_type: Oid,
    ) -> Result<Datum, OpError>;
}

impl<F> ElementFn for F
where
    F: Fn(&Datum, Oid, &Datum, Oid, &Datum, Oid) -> Result<Datum, OpError>,
{
    fn apply(
        &self,
        element: &Datum,
        elt_type: Oid,
        result: &Datum,
        result_type: Oid,
        opt: &Datum,
        opt_type: Oid,
    ) -> Result<Datum, OpError> {
        self(element, elt_type, result, result_type, opt, opt_type)
    }
}

/// The built-in arithmetic folds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericOp {
    /// `result + element * opt`.
    Dot,
    /// `element * opt`; the running result is ignored.
    Mult,
    /// `element / opt`; the running result is ignored.
    Div,
}

impl NumericOp {
    /// Evaluate in `f64` and apply the operation's overflow policy.
    pub fn eval(self, elt: f64, res: f64, opt: f64) -> Result<f64, OpError> {
        let (v, inf_ok, zero_ok) = match self {
            Self::Dot => (
                res + elt * opt,
                elt.is_infinite() || res.is_infinite() || opt.is_infinite(),
                true,
            ),
            Self::Mult => (
                elt * opt,
                elt.is_infinite() || opt.is_infinite(),
                elt == 0.0 || opt == 0.0,
            ),
            Self::Div => {
                if opt == 0.0 {
                    return Err(OpError::DivisionByZero);
                }
                (
                    elt / opt,
                    elt.is_infinite() || opt.is_infinite(),
                    elt == 0.0,
                )
            }
        };
        check_float_val(v, inf_ok, zero_ok)?;
        Ok(v)
    }
}

/// Shared body of the built-in combinators.
///
/// Division into an integer result type is exact integer division on the
/// widened `i64` operands; everything else goes through `f64`.
pub fn element_op(
    element: &Datum,
    elt_type: Oid,
    result: &Datum,
    result_type: Oid,
    opt: &Datum,
    opt_type: Oid,
    op: NumericOp,
) -> Result<Datum, OpError> {
    if op == NumericOp::Div && result_type.is_integer() {
        let num = datum_int64_cast(element, elt_type)?;
        let denom = datum_int64_cast(opt, opt_type)?;
        if denom == 0 {
            return Err(OpError::DivisionByZero);
        }
        let q = num
            .checked_div(denom)
            .ok_or(DatumError::OutOfRange { target: "bigint" })?;
        return Ok(int64_datum_cast(q, result_type)?);
    }
    let elt = datum_float8_cast(element, elt_type)?;
    let res = datum_float8_cast(result, result_type)?;
    let opt = datum_float8_cast(opt, opt_type)?;
    Ok(float8_datum_cast(op.eval(elt, res, opt)?, result_type)?)
}

/// Add `element * opt` to the running result.
pub fn element_dot(
    element: &Datum,
    elt_type: Oid,
    result: &Datum,
    result_type: Oid,
    opt: &Datum,
    opt_type: Oid,
) -> Result<Datum, OpError> {
    element_op(element, elt_type, result, result_type, opt, opt_type, NumericOp::Dot)
}

/// Multiply `element` by `opt`.
pub fn element_mult(
    element: &Datum,
    elt_type: Oid,
    result: &Datum,
    result_type: Oid,
    opt: &Datum,
    opt_type: Oid,
) -> Result<Datum, OpError> {
    element_op(element, elt_type, result, result_type, opt, opt_type, NumericOp::Mult)
}

/// Divide `element` by `opt`.
pub fn element_div(
    element: &Datum,
    elt_type: Oid,
    result: &Datum,
    result_type: Oid,
    opt: &Datum,
    opt_type: Oid,
) -> Result<Datum, OpError> {
    element_op(element, elt_type, result, result_type, opt, opt_type, NumericOp::Div)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn f8(v: f64) -> Datum {
        Datum::from_f64(v)
    }

    #[test]
    fn dot_accumulates() {
        let r = element_dot(&f8(2.0), Oid::FLOAT8, &f8(10.0), Oid::FLOAT8, &f8(3.0), Oid::FLOAT8).unwrap();
        assert_eq!(r.as_f64(), 16.0);
    }

    #[test]
    fn mult_ignores_running_result() {
        let r = element_mult(
            &Datum::from_i32(4),
            Oid::INT4,
            &Datum::from_i32(99),
            Oid::INT4,
            &Datum::from_i32(-3),
            Oid::INT4,
        )
        .unwrap();
        assert_eq!(r.as_i32(), -12);
    }

    #[test]
    fn integer_division_truncates() {
        let r = element_div(
            &Datum::from_i32(7),
            Oid::INT4,
            &Datum::from_i32(7),
            Oid::INT4,
            &Datum::from_i32(2),
            Oid::INT4,
        )
        .unwrap();
        assert_eq!(r.as_i32(), 3);
    }

    #[test]
    fn division_by_zero_for_both_result_kinds() {
        let zero_i = Datum::from_i16(0);
        assert_eq!(
            element_div(&Datum::from_i16(5), Oid::INT2, &zero_i, Oid::INT2, &zero_i, Oid::INT2),
            Err(OpError::DivisionByZero)
        );
        assert_eq!(
            element_div(&f8(5.0), Oid::FLOAT8, &f8(0.0), Oid::FLOAT8, &f8(0.0), Oid::FLOAT8),
            Err(OpError::DivisionByZero)
        );
    }

    #[test]
    fn int64_min_over_minus_one_is_out_of_range() {
        let r = element_div(
            &Datum::from_i64(i64::MIN),
            Oid::INT8,
            &Datum::zero(),
            Oid::INT8,
            &Datum::from_i64(-1),
            Oid::INT8,
        );
        assert_eq!(r, Err(OpError::Datum(DatumError::OutOfRange { target: "bigint" })));
    }

    #[test]
    fn narrowing_to_int2_is_range_checked() {
        let big = Datum::from_i16(20_000);
        let r = element_mult(&big, Oid::INT2, &big, Oid::INT2, &Datum::from_i16(2), Oid::INT2);
        assert_eq!(r, Err(OpError::Datum(DatumError::OutOfRange { target: "smallint" })));
        let r = element_mult(&big, Oid::INT2, &big, Oid::INT2, &Datum::from_i16(1), Oid::INT2).unwrap();
        assert_eq!(r.as_i16(), 20_000);
    }

    #[test]
    fn mult_policy() {
        assert_eq!(NumericOp::Mult.eval(1e200, 0.0, 1e200), Err(OpError::Datum(DatumError::FloatOverflow)));
        assert_eq!(NumericOp::Mult.eval(1e-200, 0.0, 1e-200), Err(OpError::Datum(DatumError::FloatUnderflow)));
        assert_eq!(NumericOp::Mult.eval(0.0, 0.0, 5.0), Ok(0.0));
        assert!(NumericOp::Mult.eval(f64::INFINITY, 0.0, 2.0).unwrap().is_infinite());
    }

    #[test]
    fn dot_allows_zero_sum() {
        assert_eq!(NumericOp::Dot.eval(1.0, -2.0, 2.0), Ok(0.0));
    }

    #[test]
    fn div_zero_result_needs_zero_numerator() {
        assert_eq!(NumericOp::Div.eval(0.0, 0.0, 3.0), Ok(0.0));
        assert_eq!(
            NumericOp::Div.eval(1e-300, 0.0, 1e300),
            Err(OpError::Datum(DatumError::FloatUnderflow))
        );
    }

    #[test]
    fn closures_are_combinators() {
        let add_one = |e: &Datum, t: Oid, _: &Datum, rt: Oid, _: &Datum, _: Oid| -> Result<Datum, OpError> {
            let v = datum_float8_cast(e, t)? + 1.0;
            Ok(float8_datum_cast(v, rt)?)
        };
        let r = add_one.apply(&f8(1.0), Oid::FLOAT8, &f8(0.0), Oid::FLOAT8, &f8(0.0), Oid::FLOAT8);
        assert_eq!(r.unwrap().as_f64(), 2.0);
    }

    proptest! {
        #[test]
        fn float_mult_matches_f64(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            prop_assume!(a != 0.0 && b != 0.0);
            let r = element_mult(&f8(a), Oid::FLOAT8, &f8(0.0), Oid::FLOAT8, &f8(b), Oid::FLOAT8).unwrap();
            prop_assert_eq!(r.as_f64(), a * b);
        }

        #[test]
        fn int_division_matches_i64(a in any::<i32>(), b in any::<i32>()) {
            prop_assume!(b != 0);
            let r = element_div(
                &Datum::from_i32(a), Oid::INT4, &Datum::zero(), Oid::INT4, &Datum::from_i32(b), Oid::INT4,
            );
            let expected = i64::from(a) / i64::from(b);
            match i32::try_from(expected) {
                Ok(v) => prop_assert_eq!(r.unwrap().as_i32(), v),
                Err(_) => prop_assert!(r.is_err()),
            }
        }
    }
}

//! Errors raised by datum conversions and trait lookups.

use std::error::Error;
use std::fmt;

use crate::oid::Oid;

/// Errors from the scalar layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatumError {
    /// The element type has no entry in the trait table.
    UnsupportedType {
        /// The rejected tag.
        oid: Oid,
    },
    /// A narrowing cast lost information.
    OutOfRange {
        /// Display name of the target width, e.g. `smallint`.
        target: &'static str,
    },
    /// A finite input produced an infinite result.
    FloatOverflow,
    /// A non-zero input produced a zero result.
    FloatUnderflow,
}

impl fmt::Display for DatumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType { oid } => {
                write!(
                    f,
                    "arrays with element type {} are not supported",
                    oid.type_name()
                )
            }
            Self::OutOfRange { target } => write!(f, "{target} out of range"),
            Self::FloatOverflow => write!(f, "value out of range: overflow"),
            Self::FloatUnderflow => write!(f, "value out of range: underflow"),
        }
    }
}

impl Error for DatumError {}

//! Operator error types.

use std::error::Error;
use std::fmt;

use varray_array::ArrayError;
use varray_core::{DatumError, Oid};

/// Errors that can occur while combining arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpError {
    /// The two arrays have different dimension counts.
    DimensionCountMismatch {
        /// Dimensions of the left array.
        left: i32,
        /// Dimensions of the right array.
        right: i32,
    },
    /// Extents or lower bounds differ in one dimension.
    RangeMismatch {
        /// Zero-based dimension index.
        dim: usize,
        /// `(lower, lower + extent)` of the left array.
        left: (i32, i32),
        /// `(lower, lower + extent)` of the right array.
        right: (i32, i32),
    },
    /// An input array contains a null element.
    NullElement,
    /// The two arrays have different element types.
    ElementTypeMismatch {
        /// Element type of the left array.
        left: Oid,
        /// Element type of the right array.
        right: Oid,
    },
    /// The element type is outside the supported numeric set.
    UnsupportedType {
        /// The rejected tag.
        oid: Oid,
    },
    /// A zero denominator.
    DivisionByZero,
    /// A numeric conversion failed.
    Datum(DatumError),
    /// Reading or repacking an array failed.
    Array(ArrayError),
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionCountMismatch { left, right } => {
                write!(
                    f,
                    "arrays with {left} and {right} dimensions are not compatible for this operation"
                )
            }
            Self::RangeMismatch { dim, left, right } => {
                write!(
                    f,
                    "arrays with range [{},{}] and [{},{}] for dimension {dim} are not compatible for operations",
                    left.0, left.1, right.0, right.1
                )
            }
            Self::NullElement => write!(f, "arrays with element value NULL are not allowed"),
            Self::ElementTypeMismatch { left, right } => {
                write!(
                    f,
                    "arrays with element types {} and {} are not compatible for this operation",
                    left.type_name(),
                    right.type_name()
                )
            }
            Self::UnsupportedType { oid } => {
                write!(
                    f,
                    "arrays with element type {} are not supported",
                    oid.type_name()
                )
            }
            Self::DivisionByZero => {
                write!(f, "arrays with element 0 can not be used in the denominator")
            }
            Self::Datum(e) => write!(f, "{e}"),
            Self::Array(e) => write!(f, "{e}"),
        }
    }
}

impl Error for OpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Datum(e) => Some(e),
            Self::Array(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DatumError> for OpError {
    fn from(e: DatumError) -> Self {
        match e {
            DatumError::UnsupportedType { oid } => Self::UnsupportedType { oid },
            other => Self::Datum(other),
        }
    }
}

impl From<ArrayError> for OpError {
    fn from(e: ArrayError) -> Self {
        match e {
            ArrayError::NullNotAllowed => Self::NullElement,
            ArrayError::UnsupportedType { oid } => Self::UnsupportedType { oid },
            other => Self::Array(other),
        }
    }
}

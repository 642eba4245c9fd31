//! Array codec error types.

use std::error::Error;
use std::fmt;

use varray_alloc::AllocError;
use varray_core::Oid;

/// Errors that can occur while building, reading or decoding arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// Extents and lower bounds have different lengths.
    InvalidDimensions {
        /// Number of extents supplied.
        dims: usize,
        /// Number of lower bounds supplied.
        lbounds: usize,
    },
    /// More dimensions than the container supports.
    TooManyDimensions {
        /// Number of dimensions requested.
        ndim: usize,
        /// Supported maximum.
        max: usize,
    },
    /// The item count or byte size exceeds the allowed maximum.
    SizeExceeded {
        /// The bound that was crossed.
        max: usize,
    },
    /// Fewer elements or null flags than the dimensions require.
    ElementCountMismatch {
        /// Items implied by the dimensions.
        expected: usize,
        /// Items actually supplied.
        found: usize,
    },
    /// A raw element buffer is shorter than the array it should fill.
    BufferTooShort {
        /// Bytes required.
        needed: usize,
        /// Bytes supplied.
        found: usize,
    },
    /// A null element where the caller cannot accept one.
    NullNotAllowed,
    /// The element type is outside the supported numeric set.
    UnsupportedType {
        /// The rejected tag.
        oid: Oid,
    },
    /// The caller's element type differs from the container's.
    ElementTypeMismatch {
        /// Type the caller asked for.
        expected: Oid,
        /// Type stored in the container.
        found: Oid,
    },
    /// By-value storage width other than 1, 2, 4 or 8 bytes.
    InvalidTypeLength {
        /// The rejected width.
        len: i16,
    },
    /// A variable-length element supplied as an inline word.
    VarlenaByValue,
    /// Packed bytes are inconsistent with the header.
    Malformed {
        /// What was wrong.
        detail: &'static str,
    },
    /// The data buffer could not be allocated.
    Alloc(AllocError),
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { dims, lbounds } => {
                write!(
                    f,
                    "invalid number of dimensions: {dims} extents but {lbounds} lower bounds"
                )
            }
            Self::TooManyDimensions { ndim, max } => {
                write!(
                    f,
                    "number of array dimensions ({ndim}) exceeds the maximum allowed ({max})"
                )
            }
            Self::SizeExceeded { max } => {
                write!(f, "array size exceeds the maximum allowed ({max})")
            }
            Self::ElementCountMismatch { expected, found } => {
                write!(f, "array needs {expected} elements, got {found}")
            }
            Self::BufferTooShort { needed, found } => {
                write!(f, "element buffer needs {needed} bytes, got {found}")
            }
            Self::NullNotAllowed => {
                write!(f, "null array element not allowed in this context")
            }
            Self::UnsupportedType { oid } => {
                write!(
                    f,
                    "arrays with element type {} are not supported",
                    oid.type_name()
                )
            }
            Self::ElementTypeMismatch { expected, found } => {
                write!(
                    f,
                    "array element type {} does not match expected type {}",
                    found.type_name(),
                    expected.type_name()
                )
            }
            Self::InvalidTypeLength { len } => {
                write!(f, "unsupported byval length: {len}")
            }
            Self::VarlenaByValue => {
                write!(f, "variable-length element must be passed by reference")
            }
            Self::Malformed { detail } => write!(f, "malformed array: {detail}"),
            Self::Alloc(e) => write!(f, "array allocation failed: {e}"),
        }
    }
}

impl Error for ArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Alloc(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AllocError> for ArrayError {
    fn from(e: AllocError) -> Self {
        Self::Alloc(e)
    }
}

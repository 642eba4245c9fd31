//! C-compatible status codes.
//!
//! [`VarrayStatus`] is a `repr(i32)` enum covering every error the codec
//! and operators can report, plus the boundary's own failures (bad
//! handles, bad pointers, short buffers, caught panics).

use varray_alloc::AllocError;
use varray_array::ArrayError;
use varray_core::DatumError;
use varray_ops::OpError;

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarrayStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// An argument is null, out of range, or otherwise invalid.
    InvalidArgument = -2,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -3,
    /// Dimension counts, extents or lower bounds do not match.
    ShapeMismatch = -4,
    /// Element type outside the supported numeric set.
    UnsupportedType = -5,
    /// A null element where none is allowed.
    NullNotAllowed = -6,
    /// A numeric conversion overflowed or underflowed.
    OutOfRange = -7,
    /// A zero denominator.
    DivisionByZero = -8,
    /// Item count or byte size above the allowed maximum.
    CapacityExceeded = -9,
    /// The heap could not satisfy an allocation.
    AllocationFailed = -10,
    /// An encoded array failed validation.
    Malformed = -11,
    /// Two arrays have different element types.
    TypeMismatch = -12,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -20,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&DatumError> for VarrayStatus {
    fn from(e: &DatumError) -> Self {
        match e {
            DatumError::UnsupportedType { .. } => VarrayStatus::UnsupportedType,
            DatumError::OutOfRange { .. }
            | DatumError::FloatOverflow
            | DatumError::FloatUnderflow => VarrayStatus::OutOfRange,
        }
    }
}

impl From<&AllocError> for VarrayStatus {
    fn from(e: &AllocError) -> Self {
        match e {
            AllocError::InvalidSize { .. } => VarrayStatus::CapacityExceeded,
            AllocError::OutOfMemory { .. } => VarrayStatus::AllocationFailed,
        }
    }
}

impl From<&ArrayError> for VarrayStatus {
    fn from(e: &ArrayError) -> Self {
        match e {
            ArrayError::InvalidDimensions { .. }
            | ArrayError::TooManyDimensions { .. }
            | ArrayError::ElementCountMismatch { .. }
            | ArrayError::BufferTooShort { .. }
            | ArrayError::InvalidTypeLength { .. }
            | ArrayError::VarlenaByValue => VarrayStatus::InvalidArgument,
            ArrayError::SizeExceeded { .. } => VarrayStatus::CapacityExceeded,
            ArrayError::NullNotAllowed => VarrayStatus::NullNotAllowed,
            ArrayError::UnsupportedType { .. } => VarrayStatus::UnsupportedType,
            ArrayError::ElementTypeMismatch { .. } => VarrayStatus::TypeMismatch,
            ArrayError::Malformed { .. } => VarrayStatus::Malformed,
            ArrayError::Alloc(e) => VarrayStatus::from(e),
        }
    }
}

impl From<&OpError> for VarrayStatus {
    fn from(e: &OpError) -> Self {
        match e {
            OpError::DimensionCountMismatch { .. } | OpError::RangeMismatch { .. } => {
                VarrayStatus::ShapeMismatch
            }
            OpError::NullElement => VarrayStatus::NullNotAllowed,
            OpError::ElementTypeMismatch { .. } => VarrayStatus::TypeMismatch,
            OpError::UnsupportedType { .. } => VarrayStatus::UnsupportedType,
            OpError::DivisionByZero => VarrayStatus::DivisionByZero,
            OpError::Datum(e) => VarrayStatus::from(e),
            OpError::Array(e) => VarrayStatus::from(e),
        }
    }
}

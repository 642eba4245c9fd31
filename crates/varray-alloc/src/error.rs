//! Allocation error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while allocating a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The request exceeds the configured ceiling.
    InvalidSize {
        /// Number of bytes requested.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },
    /// The heap could not satisfy the request.
    OutOfMemory {
        /// Number of bytes requested.
        requested: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { requested, max } => {
                write!(f, "invalid memory alloc request size {requested} (max {max})")
            }
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: failed on request of size {requested}")
            }
        }
    }
}

impl Error for AllocError {}

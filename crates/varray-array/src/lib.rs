//! Array container codec for varray.
//!
//! An [`ArrayType`] holds up to [`MAXDIM`] dimensions of packed elements
//! together with per-dimension extents and lower bounds and an optional
//! [`NullBitmap`]. Elements are packed and unpacked purely through the
//! [`TypeTraits`](varray_core::TypeTraits) supplied by the caller, so the
//! same codec serves every fixed-width and variable-length element type.
//!
//! # Construction
//!
//! ```text
//! construct_md_array      elements (+ null flags) -> container
//! construct_array         one dimension, lower bound 1
//! construct_empty_array   zero dimensions
//! construct_*_zero        zero-filled numeric accumulator state
//! construct_*_direct      already packed, null-free bytes
//! ```
//!
//! Ownership of the source elements is explicit through [`Source`].
//!
//! # Limits
//!
//! Item counts and byte sizes are bounded by the default
//! [`AllocConfig`](varray_alloc::AllocConfig); crossing a bound is the
//! recoverable [`ArrayError::SizeExceeded`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod bitmap;
pub mod construct;
pub mod deconstruct;
pub mod dims;
pub mod error;
pub mod pack;
pub mod wire;

pub use array::{ArrayType, Elements};
pub use bitmap::NullBitmap;
pub use construct::{
    construct_array, construct_array_direct, construct_array_or_zero, construct_array_zero,
    construct_empty_array, construct_md_array, construct_md_array_direct,
    construct_md_array_or_zero, construct_md_array_zero, Source,
};
pub use deconstruct::{deconstruct_array, deconstruct_array_strict, Deconstructed};
pub use dims::{array_get_n_items, Dims, MAXDIM};
pub use error::ArrayError;

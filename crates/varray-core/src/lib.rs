//! Core types for the varray array codec.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the varray workspace:
//! the tagged scalar [`Datum`], element type tags ([`Oid`]), the type
//! trait table, numeric casts, and the conversion error type.
//!
//! # Passing convention
//!
//! A [`Datum`] is either stored inline in a 64-bit word or owns an
//! out-of-line byte block. Which numeric types travel inline is fixed at
//! compile time by the `float4-byval` and `float8-byval` features and
//! reported by [`FLOAT4_PASS_BY_VAL`] / [`FLOAT8_PASS_BY_VAL`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cast;
pub mod datum;
pub mod error;
pub mod oid;
pub mod types;

pub use cast::{
    check_float_val, datum_float8_cast, datum_int64_cast, dtof, dtoi2, dtoi4, dtoi8,
    float8_datum_cast, int64_datum_cast,
};
pub use datum::Datum;
pub use error::DatumError;
pub use oid::Oid;
pub use types::{max_align, type_traits, Align, TypeTraits, MAXIMUM_ALIGNOF};

/// Whether float4 values are stored inline in the datum word.
pub const FLOAT4_PASS_BY_VAL: bool = cfg!(feature = "float4-byval");

/// Whether int8 and float8 values are stored inline in the datum word.
pub const FLOAT8_PASS_BY_VAL: bool = cfg!(feature = "float8-byval");

/// Width in bytes of the datum word.
pub const SIZEOF_DATUM: usize = std::mem::size_of::<u64>();

//! varray: a variable-length multi-dimensional array codec with generic
//! element-wise numeric operators.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all varray sub-crates. For most users, adding `varray` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use varray::prelude::*;
//!
//! let traits = type_traits(Oid::FLOAT8).unwrap();
//! let elems: Vec<Datum> = [1.0, 2.0, 3.0].into_iter().map(Datum::from_f64).collect();
//! let a = construct_array(Source::Borrow(&elems), 3, Oid::FLOAT8, traits).unwrap();
//!
//! assert_eq!(array_dot(&a, &a).unwrap(), 14.0);
//!
//! let doubled = array_scalar_mult(&a, &Datum::from_f64(2.0)).unwrap();
//! let back = deconstruct_array(&doubled, Oid::FLOAT8, traits).unwrap();
//! assert_eq!(back.elems[2].as_f64(), 6.0);
//!
//! let bytes = varray::array::wire::encode(&doubled).unwrap();
//! assert_eq!(varray::array::wire::decode(&bytes).unwrap(), doubled);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `varray-core` | `Datum`, `Oid`, type traits, numeric casts |
//! | [`alloc`] | `varray-alloc` | Size-checked allocation of data blocks |
//! | [`array`] | `varray-array` | Container, construction, deconstruction, wire codec |
//! | [`ops`] | `varray-ops` | Generic reduce and map operators |
//!
//! # Features
//!
//! `float4-byval` and `float8-byval` store the corresponding numeric types
//! inline in the datum word instead of in an owned block.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Scalar datums, element type tags, type traits and casts (`varray-core`).
pub use varray_core as types;

/// Size-checked allocation (`varray-alloc`).
///
/// [`alloc::Allocator`] enforces the configured maximum request size and
/// reports exhaustion as a recoverable error.
pub use varray_alloc as alloc;

/// The array container and its codec (`varray-array`).
///
/// Build containers with the `construct_*` family, unpack them with
/// [`array::deconstruct_array`], and serialize them with
/// [`array::wire::encode`].
pub use varray_array as array;

/// Element-wise operators (`varray-ops`).
///
/// [`ops::reduce_two_arrays`] and [`ops::map_array_with_scalar`] accept any
/// combinator implementing [`ops::ElementFn`].
pub use varray_ops as ops;

/// Common imports for typical varray usage.
///
/// ```rust
/// use varray::prelude::*;
/// ```
pub mod prelude {
    // Scalars
    pub use varray_core::{type_traits, Datum, DatumError, Oid, TypeTraits};

    // Containers
    pub use varray_array::{
        construct_array, construct_array_zero, construct_empty_array, construct_md_array,
        deconstruct_array, deconstruct_array_strict, ArrayError, ArrayType, NullBitmap, Source,
    };

    // Operators
    pub use varray_ops::{
        array_dot, array_scalar_div, array_scalar_mult, map_array_with_scalar, reduce_two_arrays,
        ElementFn, FinalizeFn, OpError,
    };
}

//! Generic element-wise operators over varray containers.
//!
//! Two algorithms do all the work:
//!
//! - [`reduce_two_arrays`] folds two equally shaped arrays into a scalar
//!   with an [`ElementFn`] and post-processes it with a [`FinalizeFn`].
//! - [`map_array_with_scalar`] applies an [`ElementFn`] to every element of
//!   one array against a scalar operand and repacks the result.
//!
//! Combinators and finalizers are ordinary functions or closures. The
//! built-in ones ([`element_dot`], [`element_mult`], [`element_div`],
//! [`noop_finalize`], [`average_finalize`], [`average_root_finalize`])
//! widen through `f64` (or `i64` for integer division) and narrow back
//! with range checks.
//!
//! Degenerate inputs (zero-dimension arrays, empty averages) are not
//! errors; they return a default value and emit a `tracing` warning.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod finalize;
pub mod functions;
pub mod general;

pub use element::{element_div, element_dot, element_mult, element_op, ElementFn, NumericOp};
pub use error::OpError;
pub use finalize::{average_finalize, average_root_finalize, noop_finalize, FinalizeFn};
pub use functions::{array_dot, array_scalar_div, array_scalar_mult};
pub use general::{map_array_with_scalar, reduce_two_arrays};

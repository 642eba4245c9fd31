//! C ABI for the varray codec and operators.
//!
//! Arrays live in a process-wide handle table and are referred to from C
//! by opaque `u64` handles. Every entry point returns an `i32` status code
//! from [`VarrayStatus`]; results are written through caller-provided out
//! pointers. Panics never unwind into C: they are caught at the boundary
//! and reported as [`VarrayStatus::Panicked`].
//!
//! The generated header lands in `include/varray.h`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, converting a caught panic into `Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(code) => code,
            Err(_) => $crate::status::VarrayStatus::Panicked as i32,
        }
    };
}

/// Lock a table mutex, returning `InternalError` from the enclosing
/// function if it is poisoned.
macro_rules! ffi_lock {
    ($m:expr) => {
        match $m.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::VarrayStatus::InternalError as i32,
        }
    };
}

mod array;
mod handle;
pub mod status;

pub use array::{
    varray_array_create_f64, varray_array_create_md_f64,
    varray_array_decode, varray_array_destroy, varray_array_dot, varray_array_encode,
    varray_array_item_count, varray_array_ndim, varray_array_read_f64,
    varray_array_scalar_div, varray_array_scalar_mult,
};
pub use status::VarrayStatus;

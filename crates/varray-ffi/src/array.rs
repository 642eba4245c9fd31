//! Array lifecycle FFI: create, inspect, read back, combine, encode, decode.
//!
//! Arrays are immutable once created. Operators that produce a new array
//! insert it into the table and hand back a fresh handle; the inputs stay
//! valid until the caller destroys them.

use std::sync::Mutex;

use varray_array::{construct_md_array, deconstruct_array_strict, wire, ArrayType, Source};
use varray_core::{datum_float8_cast, float8_datum_cast, type_traits, Datum, Oid};
use varray_ops::{array_dot, array_scalar_div, array_scalar_mult, OpError};

use crate::handle::HandleTable;
use crate::status::VarrayStatus;

static ARRAYS: Mutex<HandleTable<ArrayType>> = Mutex::new(HandleTable::new());

/// Borrow `len` elements at `ptr`. A zero length never dereferences.
///
/// Returns `None` for a null pointer with a non-zero length.
#[allow(unsafe_code)]
fn borrow_slice<'a, T>(ptr: *const T, len: usize) -> Option<&'a [T]> {
    if len == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    // SAFETY: ptr is non-null and the caller guarantees `len` readable
    // elements that outlive this call.
    Some(unsafe { std::slice::from_raw_parts(ptr, len) })
}

/// Insert a finished array and write its handle to `out`.
#[allow(unsafe_code)]
fn publish(array: ArrayType, out: *mut u64) -> i32 {
    let handle = ffi_lock!(ARRAYS).insert(array);
    // SAFETY: out is non-null (checked by every caller before building).
    unsafe { *out = handle };
    VarrayStatus::Ok as i32
}

fn op_status(e: &OpError) -> i32 {
    VarrayStatus::from(e) as i32
}

/// Create a one-dimensional float8 array with lower bound 1.
///
/// `values` may be null when `n` is 0. Writes the new handle to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_create_f64(values: *const f64, n: usize, out: *mut u64) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        let values = match borrow_slice(values, n) {
            Some(v) => v,
            None => return VarrayStatus::InvalidArgument as i32,
        };
        let extent = match i32::try_from(n) {
            Ok(e) => e,
            Err(_) => return VarrayStatus::CapacityExceeded as i32,
        };
        let elems: Vec<Datum> = values.iter().copied().map(Datum::from_f64).collect();
        let traits = match type_traits(Oid::FLOAT8) {
            Ok(t) => t,
            Err(e) => return VarrayStatus::from(&e) as i32,
        };
        match construct_md_array(Source::Consume(elems), None, &[extent], &[1], Oid::FLOAT8, traits) {
            Ok(array) => publish(array, out),
            Err(e) => VarrayStatus::from(&e) as i32,
        }
    })
}

/// Create a float8 array of `ndim` dimensions, optionally with nulls.
///
/// `values` and `nulls` hold `n_values` entries each, one per item in
/// row-major order. A non-zero byte in `nulls` marks that item null and its
/// value is ignored; `nulls` may be null for a null-free array. `lbs` may
/// be null, in which case every lower bound is 1. `ndim` 0 yields the empty
/// array.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_create_md_f64(
    values: *const f64,
    nulls: *const u8,
    n_values: usize,
    dims: *const i32,
    lbs: *const i32,
    ndim: usize,
    out: *mut u64,
) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        let (values, dims) = match (borrow_slice(values, n_values), borrow_slice(dims, ndim)) {
            (Some(v), Some(d)) => (v, d),
            _ => return VarrayStatus::InvalidArgument as i32,
        };
        let lbs: Vec<i32> = if lbs.is_null() {
            vec![1; ndim]
        } else {
            match borrow_slice(lbs, ndim) {
                Some(l) => l.to_vec(),
                None => return VarrayStatus::InvalidArgument as i32,
            }
        };
        let nulls: Option<Vec<bool>> = if nulls.is_null() {
            None
        } else {
            match borrow_slice(nulls, n_values) {
                Some(n) => Some(n.iter().map(|&b| b != 0).collect()),
                None => return VarrayStatus::InvalidArgument as i32,
            }
        };
        let elems: Vec<Datum> = values.iter().copied().map(Datum::from_f64).collect();
        let traits = match type_traits(Oid::FLOAT8) {
            Ok(t) => t,
            Err(e) => return VarrayStatus::from(&e) as i32,
        };
        match construct_md_array(
            Source::Consume(elems),
            nulls.as_deref(),
            dims,
            &lbs,
            Oid::FLOAT8,
            traits,
        ) {
            Ok(array) => publish(array, out),
            Err(e) => VarrayStatus::from(&e) as i32,
        }
    })
}

/// Destroy an array, invalidating its handle.
///
/// Destroying an already destroyed handle returns `InvalidHandle`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_destroy(handle: u64) -> i32 {
    ffi_guard!({
        match ffi_lock!(ARRAYS).remove(handle) {
            Some(_) => VarrayStatus::Ok as i32,
            None => VarrayStatus::InvalidHandle as i32,
        }
    })
}

/// Write the dimension count of an array to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_ndim(handle: u64, out: *mut i32) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(ARRAYS);
        let Some(array) = table.get(handle) else {
            return VarrayStatus::InvalidHandle as i32;
        };
        // SAFETY: out is non-null (checked above).
        unsafe { *out = array.ndim() };
        VarrayStatus::Ok as i32
    })
}

/// Write the total item count (nulls included) of an array to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_item_count(handle: u64, out: *mut usize) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(ARRAYS);
        let Some(array) = table.get(handle) else {
            return VarrayStatus::InvalidHandle as i32;
        };
        // SAFETY: out is non-null (checked above).
        unsafe { *out = array.nitems() };
        VarrayStatus::Ok as i32
    })
}

/// Read every element of a numeric array, widened to `f64`.
///
/// The item count is always written to `n_out`. If it exceeds `cap`,
/// nothing is copied and `BufferTooSmall` is returned. Arrays containing
/// nulls are rejected with `NullNotAllowed`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_read_f64(
    handle: u64,
    buf: *mut f64,
    cap: usize,
    n_out: *mut usize,
) -> i32 {
    ffi_guard!({
        if n_out.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(ARRAYS);
        let Some(array) = table.get(handle) else {
            return VarrayStatus::InvalidHandle as i32;
        };
        let n = array.nitems();
        // SAFETY: n_out is non-null (checked above).
        unsafe { *n_out = n };
        if n > cap {
            return VarrayStatus::BufferTooSmall as i32;
        }
        let elemtype = array.elemtype();
        let traits = match type_traits(elemtype) {
            Ok(t) => t,
            Err(e) => return VarrayStatus::from(&e) as i32,
        };
        let elems = match deconstruct_array_strict(array, elemtype, traits) {
            Ok(e) => e,
            Err(e) => return VarrayStatus::from(&e) as i32,
        };
        drop(table);
        if n == 0 {
            return VarrayStatus::Ok as i32;
        }
        if buf.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        // SAFETY: buf is non-null and the caller guarantees `cap >= n`
        // writable f64 slots.
        let dst = unsafe { std::slice::from_raw_parts_mut(buf, n) };
        for (slot, elem) in dst.iter_mut().zip(&elems) {
            *slot = match datum_float8_cast(elem, elemtype) {
                Ok(v) => v,
                Err(e) => return VarrayStatus::from(&e) as i32,
            };
        }
        VarrayStatus::Ok as i32
    })
}

/// Dot product of two equally shaped numeric arrays, written to `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_dot(a: u64, b: u64, out: *mut f64) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        let table = ffi_lock!(ARRAYS);
        let (Some(left), Some(right)) = (table.get(a), table.get(b)) else {
            return VarrayStatus::InvalidHandle as i32;
        };
        match array_dot(left, right) {
            Ok(v) => {
                // SAFETY: out is non-null (checked above).
                unsafe { *out = v };
                VarrayStatus::Ok as i32
            }
            Err(e) => op_status(&e),
        }
    })
}

type ScalarOp = fn(&ArrayType, &Datum) -> Result<ArrayType, OpError>;

/// Apply a scalar operator to the array behind `handle`.
///
/// `scalar` is narrowed to the array's element type before the operator
/// runs, so an out-of-range scalar fails the same way an out-of-range
/// result would.
fn scalar_op(handle: u64, scalar: f64, out: *mut u64, op: ScalarOp) -> i32 {
    if out.is_null() {
        return VarrayStatus::InvalidArgument as i32;
    }
    let result = {
        let table = ffi_lock!(ARRAYS);
        let Some(array) = table.get(handle) else {
            return VarrayStatus::InvalidHandle as i32;
        };
        float8_datum_cast(scalar, array.elemtype())
            .map_err(OpError::from)
            .and_then(|s| op(array, &s))
    };
    match result {
        Ok(array) => publish(array, out),
        Err(e) => op_status(&e),
    }
}

/// Multiply every element by `scalar`. Writes the new array's handle to
/// `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_scalar_mult(handle: u64, scalar: f64, out: *mut u64) -> i32 {
    ffi_guard!({ scalar_op(handle, scalar, out, array_scalar_mult) })
}

/// Divide every element by `scalar`. Writes the new array's handle to
/// `out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_scalar_div(handle: u64, scalar: f64, out: *mut u64) -> i32 {
    ffi_guard!({ scalar_op(handle, scalar, out, array_scalar_div) })
}

/// Serialize an array into `buf`.
///
/// The encoded length is always written to `len_out`. If it exceeds `cap`,
/// nothing is copied and `BufferTooSmall` is returned; passing `cap` 0
/// queries the size.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_encode(
    handle: u64,
    buf: *mut u8,
    cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        if len_out.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        let bytes = {
            let table = ffi_lock!(ARRAYS);
            let Some(array) = table.get(handle) else {
                return VarrayStatus::InvalidHandle as i32;
            };
            match wire::encode(array) {
                Ok(b) => b,
                Err(e) => return VarrayStatus::from(&e) as i32,
            }
        };
        // SAFETY: len_out is non-null (checked above).
        unsafe { *len_out = bytes.len() };
        if bytes.len() > cap {
            return VarrayStatus::BufferTooSmall as i32;
        }
        if buf.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        // SAFETY: buf is non-null and the caller guarantees `cap` writable
        // bytes; bytes.len() <= cap.
        unsafe { std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf, bytes.len()) };
        VarrayStatus::Ok as i32
    })
}

/// Deserialize `len` bytes at `buf` into a new array.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn varray_array_decode(buf: *const u8, len: usize, out: *mut u64) -> i32 {
    ffi_guard!({
        if out.is_null() {
            return VarrayStatus::InvalidArgument as i32;
        }
        let bytes = match borrow_slice(buf, len) {
            Some(b) => b,
            None => return VarrayStatus::InvalidArgument as i32,
        };
        match wire::decode(bytes) {
            Ok(array) => {
                tracing::debug!(ndim = array.ndim(), nitems = array.nitems(), "decoded array");
                publish(array, out)
            }
            Err(e) => VarrayStatus::from(&e) as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(values: &[f64]) -> u64 {
        let mut h = 0;
        assert_eq!(
            varray_array_create_f64(values.as_ptr(), values.len(), &mut h),
            VarrayStatus::Ok as i32
        );
        h
    }

    fn read(h: u64) -> Vec<f64> {
        let mut buf = vec![0.0; 16];
        let mut n = 0;
        assert_eq!(
            varray_array_read_f64(h, buf.as_mut_ptr(), buf.len(), &mut n),
            VarrayStatus::Ok as i32
        );
        buf.truncate(n);
        buf
    }

    #[test]
    fn create_read_destroy() {
        let h = create(&[1.0, 2.5, -3.0]);
        assert_eq!(read(h), vec![1.0, 2.5, -3.0]);
        let mut ndim = 0;
        assert_eq!(varray_array_ndim(h, &mut ndim), 0);
        assert_eq!(ndim, 1);
        assert_eq!(varray_array_destroy(h), VarrayStatus::Ok as i32);
        assert_eq!(varray_array_destroy(h), VarrayStatus::InvalidHandle as i32);
        assert_eq!(varray_array_ndim(h, &mut ndim), VarrayStatus::InvalidHandle as i32);
    }

    #[test]
    fn null_out_pointers_are_rejected() {
        let v = [1.0];
        assert_eq!(
            varray_array_create_f64(v.as_ptr(), 1, std::ptr::null_mut()),
            VarrayStatus::InvalidArgument as i32
        );
        let mut h = 0;
        assert_eq!(
            varray_array_create_f64(std::ptr::null(), 1, &mut h),
            VarrayStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn short_read_buffer_reports_size() {
        let h = create(&[1.0, 2.0, 3.0]);
        let mut buf = [0.0; 2];
        let mut n = 0;
        assert_eq!(
            varray_array_read_f64(h, buf.as_mut_ptr(), buf.len(), &mut n),
            VarrayStatus::BufferTooSmall as i32
        );
        assert_eq!(n, 3);
        varray_array_destroy(h);
    }

    #[test]
    fn scalar_mult_makes_a_new_array() {
        let h = create(&[1.0, 2.0]);
        let mut m = 0;
        assert_eq!(varray_array_scalar_mult(h, 3.0, &mut m), 0);
        assert_ne!(h, m);
        assert_eq!(read(m), vec![3.0, 6.0]);
        assert_eq!(read(h), vec![1.0, 2.0]);
        varray_array_destroy(h);
        varray_array_destroy(m);
    }

    #[test]
    fn division_by_zero_status() {
        let h = create(&[1.0]);
        let mut m = 0;
        assert_eq!(
            varray_array_scalar_div(h, 0.0, &mut m),
            VarrayStatus::DivisionByZero as i32
        );
        varray_array_destroy(h);
    }
}

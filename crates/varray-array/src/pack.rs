//! Element packing and unpacking.
//!
//! Elements are dispatched purely on their [`TypeTraits`]: fixed-width
//! values are copied at their storage width, variable-length values are
//! written as a 4-byte length word followed by the payload. Every element
//! is followed by padding up to the type's alignment boundary.

use std::borrow::Cow;

use varray_alloc::Block;
use varray_core::{Datum, TypeTraits};

use crate::error::ArrayError;

/// Size of the variable-length header word.
pub const VARHDRSZ: usize = 4;

/// Largest payload a variable-length header can describe.
const VARSIZE_MASK: u32 = 0x3FFF_FFFF;

/// The unpadded packed representation of one element.
fn element_bytes<'a>(datum: &'a Datum, traits: TypeTraits) -> Result<Cow<'a, [u8]>, ArrayError> {
    if traits.is_varlena() {
        let payload = match datum {
            Datum::Ref(b) => b,
            Datum::Word(_) => return Err(ArrayError::VarlenaByValue),
        };
        let total = payload.len() + VARHDRSZ;
        let header = u32::try_from(total)
            .ok()
            .filter(|&t| t <= VARSIZE_MASK)
            .ok_or(ArrayError::Malformed {
                detail: "variable-length element too large",
            })?;
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&(header << 2).to_ne_bytes());
        out.extend_from_slice(payload);
        return Ok(Cow::Owned(out));
    }
    let len = usize::try_from(traits.len).map_err(|_| ArrayError::InvalidTypeLength { len: traits.len })?;
    if len == 0 {
        return Err(ArrayError::InvalidTypeLength { len: traits.len });
    }
    match datum {
        Datum::Ref(b) if !traits.by_val => {
            if b.len() >= len {
                Ok(Cow::Borrowed(&b[..len]))
            } else {
                let mut out = vec![0u8; len];
                out[..b.len()].copy_from_slice(b);
                Ok(Cow::Owned(out))
            }
        }
        _ => datum
            .fixed_bytes(len)
            .map(Cow::Owned)
            .ok_or(ArrayError::InvalidTypeLength { len: traits.len }),
    }
}

/// Space one element occupies in the data buffer, alignment padding included.
pub fn element_stride(datum: &Datum, traits: TypeTraits) -> Result<usize, ArrayError> {
    let raw = if traits.is_varlena() {
        match datum {
            Datum::Ref(b) => b.len() + VARHDRSZ,
            Datum::Word(_) => return Err(ArrayError::VarlenaByValue),
        }
    } else {
        element_bytes(datum, traits)?.len()
    };
    Ok(traits.align.align_offset(raw))
}

/// Copy one element into `dest` at its cursor and pad to alignment.
///
/// Returns the number of bytes consumed. The caller handles nulls; they
/// never reach the data buffer.
pub fn store_element(dest: &mut Block, datum: &Datum, traits: TypeTraits) -> Result<usize, ArrayError> {
    let start = dest.used();
    let bytes = element_bytes(datum, traits)?;
    dest.bump(bytes.len())
        .ok_or(ArrayError::Malformed {
            detail: "element overruns data buffer",
        })?
        .copy_from_slice(&bytes);
    let end = dest.align_cursor(traits.align).ok_or(ArrayError::Malformed {
        detail: "element padding overruns data buffer",
    })?;
    Ok(end - start)
}

/// Read the element at `*offset` and advance past it and its padding.
pub fn fetch_element(data: &[u8], offset: &mut usize, traits: TypeTraits) -> Result<Datum, ArrayError> {
    let overrun = ArrayError::Malformed {
        detail: "element overruns data buffer",
    };
    let start = *offset;
    let (datum, consumed) = if traits.is_varlena() {
        let hdr = data
            .get(start..start + VARHDRSZ)
            .ok_or(overrun.clone())?;
        let word = u32::from_ne_bytes([hdr[0], hdr[1], hdr[2], hdr[3]]);
        let total = ((word >> 2) & VARSIZE_MASK) as usize;
        if total < VARHDRSZ {
            return Err(ArrayError::Malformed {
                detail: "variable-length header shorter than itself",
            });
        }
        let payload = data.get(start + VARHDRSZ..start + total).ok_or(overrun)?;
        (Datum::from_bytes(payload), total)
    } else {
        let len = usize::try_from(traits.len)
            .ok()
            .filter(|&l| l > 0)
            .ok_or(ArrayError::InvalidTypeLength { len: traits.len })?;
        let bytes = data.get(start..start + len).ok_or(overrun)?;
        let datum = if traits.by_val {
            match len {
                1 => Datum::Word(u64::from(bytes[0])),
                2 => Datum::Word(u64::from(u16::from_ne_bytes([bytes[0], bytes[1]]))),
                4 => Datum::Word(u64::from(u32::from_ne_bytes([
                    bytes[0], bytes[1], bytes[2], bytes[3],
                ]))),
                8 => {
                    let mut w = [0u8; 8];
                    w.copy_from_slice(bytes);
                    Datum::Word(u64::from_ne_bytes(w))
                }
                _ => return Err(ArrayError::InvalidTypeLength { len: traits.len }),
            }
        } else {
            Datum::from_bytes(bytes)
        };
        (datum, len)
    };
    *offset = traits.align.align_offset(start + consumed);
    Ok(datum)
}

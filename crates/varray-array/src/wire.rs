//! Flat, length-prefixed encoding of a container.
//!
//! ```text
//! [vl_len u32 = total << 2][ndim i32][dataoffset i32][elemtype u32]
//! [dims i32 x ndim][lbounds i32 x ndim]
//! [null bitmap, (nitems + 7) / 8 bytes, only if dataoffset != 0]
//! [zero padding to an 8-byte boundary]
//! [packed element data]
//! ```
//!
//! All integers are native-endian. When `dataoffset` is non-zero it is the
//! byte offset of the element data; otherwise the data starts right after
//! the padded extents and bounds.

use varray_alloc::{Allocator, Block};
use varray_core::{type_traits, Oid};

use crate::array::ArrayType;
use crate::bitmap::NullBitmap;
use crate::dims::{array_get_n_items, overhead_nonulls, overhead_withnulls, Dims, ARRAY_HEADER_SIZE, MAXDIM};
use crate::error::ArrayError;

/// Largest total size the length word can describe.
const MAX_VARSIZE: usize = 0x3FFF_FFFF;

fn data_start(array: &ArrayType) -> usize {
    if array.has_nulls() {
        array.dataoffset() as usize
    } else {
        overhead_nonulls(array.dims().len())
    }
}

/// Encode a container into its flat representation.
///
/// Fails with [`ArrayError::SizeExceeded`] if the total does not fit the
/// 30-bit length word.
pub fn encode(array: &ArrayType) -> Result<Vec<u8>, ArrayError> {
    let start = data_start(array);
    let total = start + array.data().len();
    if total > MAX_VARSIZE {
        return Err(ArrayError::SizeExceeded { max: MAX_VARSIZE });
    }
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&((total as u32) << 2).to_ne_bytes());
    out.extend_from_slice(&array.ndim().to_ne_bytes());
    out.extend_from_slice(&array.dataoffset().to_ne_bytes());
    out.extend_from_slice(&array.elemtype().0.to_ne_bytes());
    for d in array.dims() {
        out.extend_from_slice(&d.to_ne_bytes());
    }
    for lb in array.lbounds() {
        out.extend_from_slice(&lb.to_ne_bytes());
    }
    if let Some(bitmap) = array.null_bitmap() {
        out.extend_from_slice(bitmap.as_bytes());
    }
    out.resize(start, 0);
    out.extend_from_slice(array.data());
    tracing::trace!(total, ndim = array.ndim(), "encoded array");
    Ok(out)
}

/// Cursor over the header words.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn word(&mut self) -> Result<[u8; 4], ArrayError> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + 4)
            .ok_or(ArrayError::Malformed {
                detail: "header truncated",
            })?;
        self.pos += 4;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    fn i32(&mut self) -> Result<i32, ArrayError> {
        self.word().map(i32::from_ne_bytes)
    }

    fn u32(&mut self) -> Result<u32, ArrayError> {
        self.word().map(u32::from_ne_bytes)
    }
}

/// Decode a flat representation produced by [`encode`].
///
/// Validates the length word against the buffer, the dimension count, the
/// item count and the null bitmap placement. For element types in the
/// trait table the data length must match the present items exactly;
/// other tags are checked lazily when the array is read.
pub fn decode(buf: &[u8]) -> Result<ArrayType, ArrayError> {
    if buf.len() < ARRAY_HEADER_SIZE {
        return Err(ArrayError::Malformed {
            detail: "header truncated",
        });
    }
    let mut r = Reader { buf, pos: 0 };
    let total = ((r.u32()? >> 2) as usize) & MAX_VARSIZE;
    if total != buf.len() {
        return Err(ArrayError::Malformed {
            detail: "length word does not match buffer",
        });
    }
    let ndim = r.i32()?;
    let dataoffset = r.i32()?;
    let elemtype = Oid(r.u32()?);
    let ndim = usize::try_from(ndim)
        .ok()
        .filter(|&n| n <= MAXDIM)
        .ok_or(ArrayError::Malformed {
            detail: "dimension count out of range",
        })?;

    let mut dims = Dims::new();
    for _ in 0..ndim {
        dims.push(r.i32()?);
    }
    let mut lbounds = Dims::new();
    for _ in 0..ndim {
        lbounds.push(r.i32()?);
    }
    let nitems = array_get_n_items(&dims)?;

    let (nulls, start) = if dataoffset != 0 {
        if ndim == 0 || dataoffset as usize != overhead_withnulls(ndim, nitems) {
            return Err(ArrayError::Malformed {
                detail: "dataoffset inconsistent with dimensions",
            });
        }
        let bitmap = buf
            .get(r.pos..)
            .and_then(|rest| NullBitmap::from_bytes(rest, nitems))
            .ok_or(ArrayError::Malformed {
                detail: "null bitmap truncated",
            })?;
        (Some(bitmap), dataoffset as usize)
    } else {
        (None, overhead_nonulls(ndim))
    };
    if start > total {
        return Err(ArrayError::Malformed {
            detail: "data offset past end of buffer",
        });
    }
    if ndim == 0 && start != total {
        return Err(ArrayError::Malformed {
            detail: "empty array carries data",
        });
    }

    if let Ok(traits) = type_traits(elemtype) {
        let present = nitems - nulls.as_ref().map_or(0, NullBitmap::count_nulls);
        let stride = traits.align.align_offset(traits.len as usize);
        if present.checked_mul(stride) != Some(total - start) {
            return Err(ArrayError::Malformed {
                detail: "data length inconsistent with item count",
            });
        }
    }

    let data = if ndim == 0 {
        Block::empty()
    } else {
        let mut block = Allocator::DEFAULT.alloc(total - start)?;
        block.as_mut_slice().copy_from_slice(&buf[start..]);
        block
    };
    tracing::debug!(ndim, nitems, total, elemtype = %elemtype, "decoded array");
    Ok(ArrayType {
        ndim: ndim as i32,
        dataoffset,
        elemtype,
        dims,
        lbounds,
        nulls,
        data,
    })
}

//! Building containers from element sequences.

use std::borrow::Borrow;

use varray_alloc::{AllocError, AllocFlags, Allocator, Block};
use varray_core::{Datum, Oid, TypeTraits};

use crate::array::ArrayType;
use crate::bitmap::NullBitmap;
use crate::dims::{array_get_n_items, check_dims, overhead_withnulls, Dims};
use crate::error::ArrayError;
use crate::pack::{element_stride, store_element};

/// Elements handed to a constructor, with the ownership mode made explicit.
///
/// `Borrow` copies from the caller's slice. `Consume` takes the elements
/// and releases each one as soon as it has been packed.
#[derive(Debug)]
pub enum Source<'a> {
    /// Copy from a borrowed slice.
    Borrow(&'a [Datum]),
    /// Take ownership; elements are dropped after copying.
    Consume(Vec<Datum>),
}

impl Source<'_> {
    /// Number of elements supplied.
    pub fn len(&self) -> usize {
        match self {
            Self::Borrow(s) => s.len(),
            Self::Consume(v) => v.len(),
        }
    }

    /// Returns `true` if no elements were supplied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_slice(&self) -> &[Datum] {
        match self {
            Self::Borrow(s) => s,
            Self::Consume(v) => v,
        }
    }
}

impl<'a> From<&'a [Datum]> for Source<'a> {
    fn from(s: &'a [Datum]) -> Self {
        Self::Borrow(s)
    }
}

impl From<Vec<Datum>> for Source<'_> {
    fn from(v: Vec<Datum>) -> Self {
        Self::Consume(v)
    }
}

/// The canonical zero-dimension array.
pub fn construct_empty_array(elmtype: Oid) -> ArrayType {
    ArrayType {
        ndim: 0,
        dataoffset: 0,
        elemtype: elmtype,
        dims: Dims::new(),
        lbounds: Dims::new(),
        nulls: None,
        data: Block::empty(),
    }
}

/// Pack the non-null items of `items` into `dest` in order.
fn copy_array_els<I>(
    dest: &mut Block,
    items: I,
    nulls: Option<&[bool]>,
    traits: TypeTraits,
) -> Result<(), ArrayError>
where
    I: IntoIterator,
    I::Item: Borrow<Datum>,
{
    for (i, item) in items.into_iter().enumerate() {
        if nulls.is_some_and(|n| n[i]) {
            continue;
        }
        store_element(dest, item.borrow(), traits)?;
    }
    Ok(())
}

/// Build a multi-dimensional array from elements and optional null flags.
///
/// `nulls[i] == true` marks item `i` null; its element slot is ignored and
/// takes no data bytes. Both sequences must cover every item implied by
/// `dims`; extra entries are ignored. Zero dimensions yields the empty
/// array.
pub fn construct_md_array(
    source: Source<'_>,
    nulls: Option<&[bool]>,
    dims: &[i32],
    lbs: &[i32],
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<ArrayType, ArrayError> {
    check_dims(dims, lbs)?;
    if dims.is_empty() {
        return Ok(construct_empty_array(elmtype));
    }

    let nitems = array_get_n_items(dims)?;
    if source.len() < nitems {
        return Err(ArrayError::ElementCountMismatch {
            expected: nitems,
            found: source.len(),
        });
    }
    let nulls = match nulls {
        Some(n) if n.len() < nitems => {
            return Err(ArrayError::ElementCountMismatch {
                expected: nitems,
                found: n.len(),
            })
        }
        Some(n) => Some(&n[..nitems]),
        None => None,
    };

    let config = Allocator::DEFAULT.config();
    let max = config.max_alloc_size;
    if traits.len > 0 {
        let nominal = (traits.len as usize)
            .checked_mul(nitems)
            .ok_or(ArrayError::SizeExceeded { max })?;
        if !config.is_valid_size(nominal) {
            return Err(ArrayError::SizeExceeded { max });
        }
    }

    let has_nulls = nulls.is_some_and(|n| n.iter().any(|&x| x));
    let mut nbytes = 0usize;
    for (i, elem) in source.as_slice()[..nitems].iter().enumerate() {
        if nulls.is_some_and(|n| n[i]) {
            continue;
        }
        nbytes = nbytes
            .checked_add(element_stride(elem, traits)?)
            .filter(|&n| config.is_valid_size(n))
            .ok_or(ArrayError::SizeExceeded { max })?;
    }

    let dataoffset = if has_nulls {
        overhead_withnulls(dims.len(), nitems) as i32
    } else {
        0
    };
    let mut data = Allocator::DEFAULT.alloc_zeroed(nbytes)?;
    match source {
        Source::Borrow(s) => copy_array_els(&mut data, &s[..nitems], nulls, traits)?,
        Source::Consume(mut v) => {
            v.truncate(nitems);
            copy_array_els(&mut data, v, nulls, traits)?;
        }
    }
    data.reset();

    tracing::debug!(
        ndim = dims.len(),
        nitems,
        nbytes,
        has_nulls,
        elemtype = %elmtype,
        "constructed array"
    );
    Ok(ArrayType {
        ndim: dims.len() as i32,
        dataoffset,
        elemtype: elmtype,
        dims: Dims::from_slice(dims),
        lbounds: Dims::from_slice(lbs),
        nulls: if has_nulls { nulls.map(NullBitmap::from_nulls) } else { None },
        data,
    })
}

/// Extent of a one-dimensional array of `nelems` items.
fn vector_extent(nelems: usize) -> Result<i32, ArrayError> {
    i32::try_from(nelems).map_err(|_| ArrayError::SizeExceeded {
        max: crate::dims::max_array_size(),
    })
}

/// Build a one-dimensional array with lower bound 1 and no nulls.
pub fn construct_array(
    source: Source<'_>,
    nelems: usize,
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<ArrayType, ArrayError> {
    let dims = [vector_extent(nelems)?];
    construct_md_array(source, None, &dims, &[1], elmtype, traits)
}

/// Build an array of zeros for accumulator state.
///
/// Only int2, int4, int8, float4 and float8 are accepted. The data buffer
/// is `max(len, 2) * nitems` zeroed bytes; no elements are packed.
pub fn construct_md_array_zero(
    dims: &[i32],
    lbs: &[i32],
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<ArrayType, ArrayError> {
    check_dims(dims, lbs)?;
    if dims.is_empty() {
        return Ok(construct_empty_array(elmtype));
    }
    let nitems = array_get_n_items(dims)?;
    if !elmtype.is_numeric() {
        return Err(ArrayError::UnsupportedType { oid: elmtype });
    }
    let max = Allocator::DEFAULT.config().max_alloc_size;
    let width = traits.len.max(2) as usize;
    let nbytes = width
        .checked_mul(nitems)
        .ok_or(ArrayError::SizeExceeded { max })?;
    let data = match Allocator::DEFAULT.try_alloc(nbytes, AllocFlags::ZERO) {
        Ok(Some(block)) => block,
        Ok(None) => return Err(AllocError::OutOfMemory { requested: nbytes }.into()),
        Err(AllocError::InvalidSize { .. }) => return Err(ArrayError::SizeExceeded { max }),
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(ndim = dims.len(), nitems, nbytes, elemtype = %elmtype, "constructed zero array");
    Ok(ArrayType {
        ndim: dims.len() as i32,
        dataoffset: 0,
        elemtype: elmtype,
        dims: Dims::from_slice(dims),
        lbounds: Dims::from_slice(lbs),
        nulls: None,
        data,
    })
}

/// One-dimensional form of [`construct_md_array_zero`], lower bound 1.
pub fn construct_array_zero(nelems: usize, elmtype: Oid, traits: TypeTraits) -> Result<ArrayType, ArrayError> {
    let dims = [vector_extent(nelems)?];
    construct_md_array_zero(&dims, &[1], elmtype, traits)
}

/// Build from elements when given, otherwise zero-filled.
pub fn construct_md_array_or_zero(
    source: Option<Source<'_>>,
    nulls: Option<&[bool]>,
    dims: &[i32],
    lbs: &[i32],
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<ArrayType, ArrayError> {
    match source {
        Some(source) => construct_md_array(source, nulls, dims, lbs, elmtype, traits),
        None => construct_md_array_zero(dims, lbs, elmtype, traits),
    }
}

/// One-dimensional form of [`construct_md_array_or_zero`].
pub fn construct_array_or_zero(
    source: Option<Source<'_>>,
    nelems: usize,
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<ArrayType, ArrayError> {
    match source {
        Some(source) => construct_array(source, nelems, elmtype, traits),
        None => construct_array_zero(nelems, elmtype, traits),
    }
}

/// Build from an already packed, null-free element buffer.
///
/// The first `len * nitems` bytes of `raw` are copied verbatim. Only
/// fixed-width types can be laid out this way.
pub fn construct_md_array_direct(
    raw: &[u8],
    dims: &[i32],
    lbs: &[i32],
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<ArrayType, ArrayError> {
    check_dims(dims, lbs)?;
    if dims.is_empty() {
        return Ok(construct_empty_array(elmtype));
    }
    if traits.len <= 0 {
        return Err(ArrayError::InvalidTypeLength { len: traits.len });
    }
    let nitems = array_get_n_items(dims)?;
    let max = Allocator::DEFAULT.config().max_alloc_size;
    let nbytes = (traits.len as usize)
        .checked_mul(nitems)
        .ok_or(ArrayError::SizeExceeded { max })?;
    if raw.len() < nbytes {
        return Err(ArrayError::BufferTooShort {
            needed: nbytes,
            found: raw.len(),
        });
    }
    let mut data = Allocator::DEFAULT.alloc(nbytes)?;
    data.as_mut_slice().copy_from_slice(&raw[..nbytes]);
    Ok(ArrayType {
        ndim: dims.len() as i32,
        dataoffset: 0,
        elemtype: elmtype,
        dims: Dims::from_slice(dims),
        lbounds: Dims::from_slice(lbs),
        nulls: None,
        data,
    })
}

/// One-dimensional form of [`construct_md_array_direct`], lower bound 1.
pub fn construct_array_direct(
    raw: &[u8],
    nelems: usize,
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<ArrayType, ArrayError> {
    let dims = [vector_extent(nelems)?];
    construct_md_array_direct(raw, &dims, &[1], elmtype, traits)
}

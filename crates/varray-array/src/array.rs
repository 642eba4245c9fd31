//! The array container.

use varray_alloc::Block;
use varray_core::{Datum, Oid, TypeTraits};

use crate::bitmap::NullBitmap;
use crate::dims::Dims;
use crate::error::ArrayError;
use crate::pack::fetch_element;

/// A multi-dimensional array of packed elements.
///
/// The container owns its extents, lower bounds, optional null bitmap and
/// packed data buffer. A zero-dimension container is the canonical empty
/// array: it has no extents, no bounds and no data.
///
/// `dataoffset` is zero exactly when there is no null bitmap; otherwise it
/// is the header size (bitmap included) of the flat encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayType {
    pub(crate) ndim: i32,
    pub(crate) dataoffset: i32,
    pub(crate) elemtype: Oid,
    pub(crate) dims: Dims,
    pub(crate) lbounds: Dims,
    pub(crate) nulls: Option<NullBitmap>,
    pub(crate) data: Block,
}

impl ArrayType {
    /// Number of dimensions.
    pub fn ndim(&self) -> i32 {
        self.ndim
    }

    /// Extent of each dimension.
    pub fn dims(&self) -> &[i32] {
        &self.dims
    }

    /// Lower bound of each dimension.
    pub fn lbounds(&self) -> &[i32] {
        &self.lbounds
    }

    /// Element type tag.
    pub fn elemtype(&self) -> Oid {
        self.elemtype
    }

    /// Header size of the flat encoding when a null bitmap is present, else 0.
    pub fn dataoffset(&self) -> i32 {
        self.dataoffset
    }

    /// Whether any element is null.
    pub fn has_nulls(&self) -> bool {
        self.dataoffset != 0
    }

    /// The null bitmap, if any element is null.
    pub fn null_bitmap(&self) -> Option<&NullBitmap> {
        self.nulls.as_ref()
    }

    /// Packed element bytes.
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Total element count (product of the extents; 0 when `ndim == 0`).
    pub fn nitems(&self) -> usize {
        if self.ndim == 0 {
            0
        } else {
            self.dims.iter().map(|&d| d as usize).product()
        }
    }

    /// Returns `true` for the zero-dimension array.
    pub fn is_empty(&self) -> bool {
        self.ndim == 0
    }

    /// Walk the elements in storage order using `traits` to unpack them.
    ///
    /// Yields `Ok(None)` for null elements. The first unpacking error ends
    /// the walk.
    pub fn elements(&self, traits: TypeTraits) -> Elements<'_> {
        Elements {
            array: self,
            traits,
            index: 0,
            offset: 0,
            nitems: self.nitems(),
        }
    }
}

/// Iterator over the elements of an [`ArrayType`].
///
/// Created by [`ArrayType::elements`].
#[derive(Debug)]
pub struct Elements<'a> {
    array: &'a ArrayType,
    traits: TypeTraits,
    index: usize,
    offset: usize,
    nitems: usize,
}

impl Iterator for Elements<'_> {
    type Item = Result<Option<Datum>, ArrayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.nitems {
            return None;
        }
        let i = self.index;
        self.index += 1;
        if let Some(bitmap) = &self.array.nulls {
            if bitmap.is_null(i) {
                return Some(Ok(None));
            }
        }
        match fetch_element(self.array.data(), &mut self.offset, self.traits) {
            Ok(d) => Some(Ok(Some(d))),
            Err(e) => {
                self.index = self.nitems;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.nitems - self.index))
    }
}

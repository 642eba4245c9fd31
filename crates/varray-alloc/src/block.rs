//! Owned byte blocks with bump-style packing.
//!
//! A [`Block`] is the unit every allocation returns. It is a contiguous,
//! zero-initialised `Vec<u8>` with a cursor that advances as the codec
//! packs elements into it.

use varray_core::Align;

/// A contiguous owned byte block with a bump cursor.
///
/// The logical length is fixed at allocation time. A zero-length block
/// still owns one backing byte so that every successful allocation is
/// backed by real storage.
#[derive(Clone, Debug)]
pub struct Block {
    /// Backing storage, at least one byte.
    data: Vec<u8>,
    /// Logical length in bytes.
    len: usize,
    /// Next free position.
    cursor: usize,
}

impl Block {
    /// Wrap zeroed backing storage of at least `len` bytes.
    pub(crate) fn from_backing(data: Vec<u8>, len: usize) -> Self {
        debug_assert!(data.len() >= len.max(1));
        Self {
            data,
            len,
            cursor: 0,
        }
    }

    /// An unallocated zero-length block, used where no data buffer exists.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            len: 0,
            cursor: 0,
        }
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes actually held by the backing storage.
    pub fn backing_len(&self) -> usize {
        self.data.len()
    }

    /// The logical contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// The logical contents, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[..self.len]
    }

    /// Hand out the next `len` bytes and advance the cursor.
    ///
    /// Returns `None` if fewer than `len` bytes remain.
    pub fn bump(&mut self, len: usize) -> Option<&mut [u8]> {
        let end = self.cursor.checked_add(len)?;
        if end > self.len {
            return None;
        }
        let slice = &mut self.data[self.cursor..end];
        self.cursor = end;
        Some(slice)
    }

    /// Advance the cursor to the next `align` boundary.
    ///
    /// Returns `None`, leaving the cursor untouched, if the boundary lies
    /// past the end of the block.
    pub fn align_cursor(&mut self, align: Align) -> Option<usize> {
        let aligned = align.align_offset(self.cursor);
        if aligned > self.len {
            return None;
        }
        self.cursor = aligned;
        Some(aligned)
    }

    /// Reset the cursor without touching the contents.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Bytes handed out so far.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Bytes still available to [`bump`](Self::bump).
    pub fn remaining(&self) -> usize {
        self.len - self.cursor
    }
}

/// Blocks compare by logical contents; the cursor is packing state.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Block {}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(len: usize) -> Block {
        Block::from_backing(vec![0; len.max(1)], len)
    }

    #[test]
    fn bump_advances_and_stops_at_end() {
        let mut b = block(8);
        assert_eq!(b.bump(3).map(|s| s.len()), Some(3));
        assert_eq!(b.used(), 3);
        assert_eq!(b.remaining(), 5);
        assert!(b.bump(6).is_none());
        assert_eq!(b.used(), 3);
        assert!(b.bump(5).is_some());
        assert_eq!(b.remaining(), 0);
    }

    #[test]
    fn align_cursor_pads_to_boundary() {
        let mut b = block(16);
        b.bump(3);
        assert_eq!(b.align_cursor(Align::Int), Some(4));
        b.bump(1);
        assert_eq!(b.align_cursor(Align::Double), Some(8));
        assert_eq!(b.align_cursor(Align::Double), Some(8));
    }

    #[test]
    fn align_past_end_is_refused() {
        let mut b = block(6);
        b.bump(5);
        assert_eq!(b.align_cursor(Align::Double), None);
        assert_eq!(b.used(), 5);
    }

    #[test]
    fn reset_keeps_contents() {
        let mut b = block(4);
        b.bump(4).unwrap().copy_from_slice(&[1, 2, 3, 4]);
        b.reset();
        assert_eq!(b.used(), 0);
        assert_eq!(b.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn equality_ignores_cursor() {
        let mut a = block(2);
        let b = block(2);
        a.bump(1);
        assert_eq!(a, b);
        assert_eq!(Block::empty(), block(0));
    }
}

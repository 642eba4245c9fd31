//! The null bitmap.

/// Per-element presence bits, LSB first within each byte.
///
/// A set bit means the element is present; a clear bit means it is null.
/// The bitmap for `n` elements occupies `(n + 7) / 8` bytes and any bits
/// past `n` in the final byte are zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NullBitmap {
    bytes: Vec<u8>,
    len: usize,
}

impl NullBitmap {
    /// Bytes needed for `n` elements.
    pub const fn byte_len(n: usize) -> usize {
        n.div_ceil(8)
    }

    /// Bitmap with every element present.
    pub fn all_present(n: usize) -> Self {
        let mut bytes = vec![0xFFu8; Self::byte_len(n)];
        if n % 8 != 0 {
            if let Some(last) = bytes.last_mut() {
                *last = (1u8 << (n % 8)) - 1;
            }
        }
        Self { bytes, len: n }
    }

    /// Bitmap from per-element null flags (`true` = null).
    pub fn from_nulls(nulls: &[bool]) -> Self {
        let mut bytes = vec![0u8; Self::byte_len(nulls.len())];
        for (i, &is_null) in nulls.iter().enumerate() {
            if !is_null {
                bytes[i / 8] |= 1u8 << (i % 8);
            }
        }
        Self {
            bytes,
            len: nulls.len(),
        }
    }

    /// Rebuild from packed bytes. `None` if `bytes` is too short for `n`.
    pub fn from_bytes(bytes: &[u8], n: usize) -> Option<Self> {
        let need = Self::byte_len(n);
        if bytes.len() < need {
            return None;
        }
        let mut bytes = bytes[..need].to_vec();
        if n % 8 != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= (1u8 << (n % 8)) - 1;
            }
        }
        Some(Self { bytes, len: n })
    }

    /// Number of elements covered.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the bitmap covers no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether element `i` is present. Out-of-range indices are absent.
    pub fn is_present(&self, i: usize) -> bool {
        i < self.len && self.bytes[i / 8] & (1u8 << (i % 8)) != 0
    }

    /// Whether element `i` is null.
    pub fn is_null(&self, i: usize) -> bool {
        !self.is_present(i)
    }

    /// Mark element `i` null. Out-of-range indices are ignored.
    pub fn set_null(&mut self, i: usize) {
        if i < self.len {
            self.bytes[i / 8] &= !(1u8 << (i % 8));
        }
    }

    /// Number of null elements.
    pub fn count_nulls(&self) -> usize {
        let present: u32 = self.bytes.iter().map(|b| b.count_ones()).sum();
        self.len - present as usize
    }

    /// Per-element null flags.
    pub fn to_nulls(&self) -> Vec<bool> {
        (0..self.len).map(|i| self.is_null(i)).collect()
    }
}

//! The tagged scalar word.

use crate::oid::Oid;
use crate::{FLOAT4_PASS_BY_VAL, FLOAT8_PASS_BY_VAL};

/// An opaque scalar whose element type is supplied out of band.
///
/// `Word` holds a small value zero-extended into the low bits of a 64-bit
/// word. `Ref` owns an out-of-line block holding the value's native-endian
/// bytes (or a variable-length payload). The variant only says where the
/// bytes live; what they mean always comes from a parallel [`Oid`].
///
/// Dropping a `Ref` datum releases its block, so out-of-line storage is
/// freed exactly once by whoever owns the datum last.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Datum {
    /// Value stored directly in the word.
    Word(u64),
    /// Value stored in an owned block.
    Ref(Box<[u8]>),
}

impl Default for Datum {
    fn default() -> Self {
        Self::Word(0)
    }
}

/// Copy up to `N` leading bytes of `block`, zero-padding the rest.
fn leading<const N: usize>(block: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let n = block.len().min(N);
    out[..n].copy_from_slice(&block[..n]);
    out
}

impl Datum {
    /// The all-zero inline datum.
    pub const fn zero() -> Self {
        Self::Word(0)
    }

    /// Wrap a boolean (always inline).
    pub fn from_bool(v: bool) -> Self {
        Self::Word(u64::from(v))
    }

    /// Wrap an int2 (always inline).
    pub fn from_i16(v: i16) -> Self {
        Self::Word(u64::from(v as u16))
    }

    /// Wrap an int4 (always inline).
    pub fn from_i32(v: i32) -> Self {
        Self::Word(u64::from(v as u32))
    }

    /// Wrap a type tag (always inline).
    pub fn from_oid(v: Oid) -> Self {
        Self::Word(u64::from(v.0))
    }

    /// Wrap an int8. Inline only with the `float8-byval` feature.
    pub fn from_i64(v: i64) -> Self {
        if FLOAT8_PASS_BY_VAL {
            Self::Word(v as u64)
        } else {
            Self::Ref(Box::new(v.to_ne_bytes()))
        }
    }

    /// Wrap a float4. Inline only with the `float4-byval` feature.
    pub fn from_f32(v: f32) -> Self {
        if FLOAT4_PASS_BY_VAL {
            Self::Word(u64::from(v.to_bits()))
        } else {
            Self::Ref(Box::new(v.to_ne_bytes()))
        }
    }

    /// Wrap a float8. Inline only with the `float8-byval` feature.
    pub fn from_f64(v: f64) -> Self {
        if FLOAT8_PASS_BY_VAL {
            Self::Word(v.to_bits())
        } else {
            Self::Ref(Box::new(v.to_ne_bytes()))
        }
    }

    /// Wrap a variable-length payload (always out of line).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::Ref(bytes.into())
    }

    /// Wrap a text payload (always out of line).
    pub fn from_text(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Returns `true` if the value lives in an owned block.
    pub fn is_by_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }

    /// Raw `len`-byte native-endian representation of the value.
    ///
    /// For `Word` this is the low `len` bytes of the value as an integer of
    /// that width; for `Ref` it is the first `len` bytes of the block. Only
    /// widths 1, 2, 4 and 8 are meaningful; `None` for anything else.
    pub fn fixed_bytes(&self, len: usize) -> Option<Vec<u8>> {
        match (self, len) {
            (Self::Word(w), 1) => Some(vec![*w as u8]),
            (Self::Word(w), 2) => Some((*w as u16).to_ne_bytes().to_vec()),
            (Self::Word(w), 4) => Some((*w as u32).to_ne_bytes().to_vec()),
            (Self::Word(w), 8) => Some(w.to_ne_bytes().to_vec()),
            (Self::Ref(b), 1 | 2 | 4 | 8) => {
                let mut out = vec![0u8; len];
                let n = b.len().min(len);
                out[..n].copy_from_slice(&b[..n]);
                Some(out)
            }
            _ => None,
        }
    }

    /// Unwrap a boolean.
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Word(w) => (*w as u8) != 0,
            Self::Ref(b) => leading::<1>(b)[0] != 0,
        }
    }

    /// Unwrap an int2.
    pub fn as_i16(&self) -> i16 {
        match self {
            Self::Word(w) => *w as u16 as i16,
            Self::Ref(b) => i16::from_ne_bytes(leading(b)),
        }
    }

    /// Unwrap an int4.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Word(w) => *w as u32 as i32,
            Self::Ref(b) => i32::from_ne_bytes(leading(b)),
        }
    }

    /// Unwrap an int8.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Word(w) => *w as i64,
            Self::Ref(b) => i64::from_ne_bytes(leading(b)),
        }
    }

    /// Unwrap a float4.
    pub fn as_f32(&self) -> f32 {
        match self {
            Self::Word(w) => f32::from_bits(*w as u32),
            Self::Ref(b) => f32::from_ne_bytes(leading(b)),
        }
    }

    /// Unwrap a float8.
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Word(w) => f64::from_bits(*w),
            Self::Ref(b) => f64::from_ne_bytes(leading(b)),
        }
    }

    /// Unwrap a type tag.
    pub fn as_oid(&self) -> Oid {
        Oid(self.as_i32() as u32)
    }

    /// Borrow the out-of-line payload, if any.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Word(_) => None,
            Self::Ref(b) => Some(b),
        }
    }

    /// Borrow the payload as UTF-8 text.
    pub fn as_text(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn small_integers_are_inline_and_zero_extended() {
        assert_eq!(Datum::from_i16(-1), Datum::Word(0xFFFF));
        assert_eq!(Datum::from_i32(-1), Datum::Word(0xFFFF_FFFF));
        assert_eq!(Datum::from_bool(true), Datum::Word(1));
    }

    #[test]
    fn float8_passing_follows_feature() {
        let d = Datum::from_f64(1.5);
        assert_eq!(d.is_by_ref(), !FLOAT8_PASS_BY_VAL);
        let d = Datum::from_i64(7);
        assert_eq!(d.is_by_ref(), !FLOAT8_PASS_BY_VAL);
        let d = Datum::from_f32(1.5);
        assert_eq!(d.is_by_ref(), !FLOAT4_PASS_BY_VAL);
    }

    #[test]
    fn fixed_bytes_agree_between_storage_forms() {
        let word = Datum::Word(u64::from(2.5f32.to_bits()));
        let block = Datum::Ref(Box::new(2.5f32.to_ne_bytes()));
        assert_eq!(word.fixed_bytes(4), block.fixed_bytes(4));
        assert_eq!(word.fixed_bytes(3), None);
    }

    #[test]
    fn short_ref_block_is_zero_padded() {
        let d = Datum::Ref(Box::new([7u8]));
        assert_eq!(d.as_i64(), i64::from_ne_bytes([7, 0, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn text_payload_round_trips() {
        let d = Datum::from_text("gamma");
        assert_eq!(d.as_text(), Some("gamma"));
        assert_eq!(Datum::zero().as_bytes(), None);
    }

    proptest! {
        #[test]
        fn int2_round_trip(v in any::<i16>()) {
            prop_assert_eq!(Datum::from_i16(v).as_i16(), v);
        }

        #[test]
        fn int4_round_trip(v in any::<i32>()) {
            prop_assert_eq!(Datum::from_i32(v).as_i32(), v);
        }

        #[test]
        fn int8_round_trip(v in any::<i64>()) {
            prop_assert_eq!(Datum::from_i64(v).as_i64(), v);
        }

        #[test]
        fn float8_round_trip_bits(bits in any::<u64>()) {
            let v = f64::from_bits(bits);
            prop_assert_eq!(Datum::from_f64(v).as_f64().to_bits(), bits);
        }

        #[test]
        fn float4_round_trip_bits(bits in any::<u32>()) {
            let v = f32::from_bits(bits);
            prop_assert_eq!(Datum::from_f32(v).as_f32().to_bits(), bits);
        }
    }
}

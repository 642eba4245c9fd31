//! The type trait table: storage width, passing mode and alignment per tag.

use crate::error::DatumError;
use crate::oid::Oid;
use crate::{FLOAT4_PASS_BY_VAL, FLOAT8_PASS_BY_VAL};

/// Strictest alignment any element or header boundary requires.
pub const MAXIMUM_ALIGNOF: usize = 8;

/// Alignment class of a packed element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Byte aligned (`c`).
    Char,
    /// Two-byte aligned (`s`).
    Short,
    /// Four-byte aligned (`i`).
    Int,
    /// Eight-byte aligned (`d`).
    Double,
}

impl Align {
    /// Boundary width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::Char => 1,
            Self::Short => 2,
            Self::Int => 4,
            Self::Double => 8,
        }
    }

    /// Single-character catalog code.
    pub const fn code(self) -> char {
        match self {
            Self::Char => 'c',
            Self::Short => 's',
            Self::Int => 'i',
            Self::Double => 'd',
        }
    }

    /// Parse a catalog code. Unknown codes fall back to byte alignment.
    pub const fn from_code(code: char) -> Self {
        match code {
            's' => Self::Short,
            'i' => Self::Int,
            'd' => Self::Double,
            _ => Self::Char,
        }
    }

    /// Round `off` up to the next multiple of this alignment.
    pub const fn align_offset(self, off: usize) -> usize {
        let a = self.width();
        (off + a - 1) & !(a - 1)
    }
}

/// Round `off` up to [`MAXIMUM_ALIGNOF`].
pub const fn max_align(off: usize) -> usize {
    Align::Double.align_offset(off)
}

/// Storage traits of an element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeTraits {
    /// Fixed width in bytes, or `-1` for a variable-length type.
    pub len: i16,
    /// Whether values travel inline in the datum word.
    pub by_val: bool,
    /// Alignment class of each packed value.
    pub align: Align,
}

impl TypeTraits {
    /// Traits of `bool`.
    pub const BOOL: TypeTraits = TypeTraits::new(1, true, Align::Char);
    /// Traits of `text`.
    pub const TEXT: TypeTraits = TypeTraits::new(-1, false, Align::Int);

    /// Build a trait record.
    pub const fn new(len: i16, by_val: bool, align: Align) -> Self {
        Self { len, by_val, align }
    }

    /// Returns `true` for variable-length types.
    pub const fn is_varlena(&self) -> bool {
        self.len == -1
    }
}

/// Look up the traits of a numeric element type.
///
/// Only int2, int4, int8, float4 and float8 are in the table; every other
/// tag is [`DatumError::UnsupportedType`].
pub const fn type_traits(oid: Oid) -> Result<TypeTraits, DatumError> {
    match oid {
        Oid::INT2 => Ok(TypeTraits::new(2, true, Align::Short)),
        Oid::INT4 => Ok(TypeTraits::new(4, true, Align::Int)),
        Oid::INT8 => Ok(TypeTraits::new(8, FLOAT8_PASS_BY_VAL, Align::Double)),
        Oid::FLOAT4 => Ok(TypeTraits::new(4, FLOAT4_PASS_BY_VAL, Align::Int)),
        Oid::FLOAT8 => Ok(TypeTraits::new(8, FLOAT8_PASS_BY_VAL, Align::Double)),
        _ => Err(DatumError::UnsupportedType { oid }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numeric_table() {
        let t = type_traits(Oid::INT2).unwrap();
        assert_eq!((t.len, t.by_val, t.align), (2, true, Align::Short));
        let t = type_traits(Oid::INT4).unwrap();
        assert_eq!((t.len, t.by_val, t.align), (4, true, Align::Int));
        let t = type_traits(Oid::FLOAT8).unwrap();
        assert_eq!((t.len, t.align), (8, Align::Double));
        assert_eq!(t.by_val, FLOAT8_PASS_BY_VAL);
        let t = type_traits(Oid::FLOAT4).unwrap();
        assert_eq!(t.by_val, FLOAT4_PASS_BY_VAL);
    }

    #[test]
    fn non_numeric_tags_are_unsupported() {
        for oid in [Oid::BOOL, Oid::TEXT, Oid::INVALID, Oid(77)] {
            assert_eq!(type_traits(oid), Err(DatumError::UnsupportedType { oid }));
        }
    }

    #[test]
    fn structural_constants() {
        assert!(TypeTraits::TEXT.is_varlena());
        assert!(!TypeTraits::BOOL.is_varlena());
        assert_eq!(TypeTraits::BOOL.align.code(), 'c');
    }

    #[test]
    fn codes_round_trip() {
        for a in [Align::Char, Align::Short, Align::Int, Align::Double] {
            assert_eq!(Align::from_code(a.code()), a);
        }
    }

    #[test]
    fn max_align_examples() {
        assert_eq!(max_align(0), 0);
        assert_eq!(max_align(1), 8);
        assert_eq!(max_align(17), 24);
        assert_eq!(max_align(24), 24);
    }

    proptest! {
        #[test]
        fn align_offset_is_smallest_multiple_not_below(off in 0usize..1_000_000) {
            for a in [Align::Char, Align::Short, Align::Int, Align::Double] {
                let aligned = a.align_offset(off);
                prop_assert!(aligned >= off);
                prop_assert_eq!(aligned % a.width(), 0);
                prop_assert!(aligned - off < a.width());
            }
        }
    }
}

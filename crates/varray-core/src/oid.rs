//! Element type tags.

use std::fmt;

/// Identifies the element type of a datum or array.
///
/// The set of recognised tags is closed; everything the codec packs or the
/// operators combine is one of the associated constants below. Tags outside
/// the set are carried through unchanged but rejected wherever a type trait
/// lookup is required.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid(pub u32);

impl Oid {
    /// No type. Never valid as an element type.
    pub const INVALID: Oid = Oid(0);
    /// 16-bit signed integer.
    pub const INT2: Oid = Oid(1);
    /// 32-bit signed integer.
    pub const INT4: Oid = Oid(2);
    /// 64-bit signed integer.
    pub const INT8: Oid = Oid(3);
    /// 32-bit IEEE float.
    pub const FLOAT4: Oid = Oid(4);
    /// 64-bit IEEE float.
    pub const FLOAT8: Oid = Oid(5);
    /// Single-byte boolean.
    pub const BOOL: Oid = Oid(16);
    /// Variable-length text.
    pub const TEXT: Oid = Oid(25);

    /// Display name used in diagnostics.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::INT2 => "short",
            Self::INT4 => "int",
            Self::INT8 => "long",
            Self::FLOAT4 => "float",
            Self::FLOAT8 => "double",
            Self::BOOL => "bool",
            Self::TEXT => "string",
            _ => "unknown",
        }
    }

    /// Returns `true` for the five numeric element types.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::INT2 | Self::INT4 | Self::INT8 | Self::FLOAT4 | Self::FLOAT8
        )
    }

    /// Returns `true` for int2, int4 and int8.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::INT2 | Self::INT4 | Self::INT8)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Oid {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

//! Reading containers back into element sequences.

use varray_core::{Datum, Oid, TypeTraits};

use crate::array::ArrayType;
use crate::error::ArrayError;

/// Elements and null flags recovered from a container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Deconstructed {
    /// One datum per item; null slots hold `Datum::Word(0)`.
    pub elems: Vec<Datum>,
    /// One flag per item, `true` for null.
    pub nulls: Vec<bool>,
}

impl Deconstructed {
    /// Number of items.
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }
}

fn check_elemtype(array: &ArrayType, elmtype: Oid) -> Result<(), ArrayError> {
    if array.elemtype() != elmtype {
        return Err(ArrayError::ElementTypeMismatch {
            expected: elmtype,
            found: array.elemtype(),
        });
    }
    Ok(())
}

/// Unpack every item, reporting nulls through the flag vector.
pub fn deconstruct_array(
    array: &ArrayType,
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<Deconstructed, ArrayError> {
    check_elemtype(array, elmtype)?;
    let n = array.nitems();
    let mut out = Deconstructed {
        elems: Vec::with_capacity(n),
        nulls: Vec::with_capacity(n),
    };
    for item in array.elements(traits) {
        match item? {
            Some(d) => {
                out.elems.push(d);
                out.nulls.push(false);
            }
            None => {
                out.elems.push(Datum::zero());
                out.nulls.push(true);
            }
        }
    }
    tracing::trace!(nitems = n, elemtype = %elmtype, "deconstructed array");
    Ok(out)
}

/// Unpack every item where nulls cannot be represented.
///
/// Any null element is [`ArrayError::NullNotAllowed`].
pub fn deconstruct_array_strict(
    array: &ArrayType,
    elmtype: Oid,
    traits: TypeTraits,
) -> Result<Vec<Datum>, ArrayError> {
    check_elemtype(array, elmtype)?;
    array
        .elements(traits)
        .map(|item| item?.ok_or(ArrayError::NullNotAllowed))
        .collect()
}

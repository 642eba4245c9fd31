//! Dimension bookkeeping and header overhead arithmetic.

use smallvec::SmallVec;
use varray_alloc::Allocator;
use varray_core::max_align;

use crate::error::ArrayError;

/// Maximum number of dimensions a container may have.
pub const MAXDIM: usize = 6;

/// Fixed part of the container header in bytes: length word, `ndim`,
/// `dataoffset` and element type.
pub const ARRAY_HEADER_SIZE: usize = 16;

/// Per-dimension extents or lower bounds.
pub type Dims = SmallVec<[i32; MAXDIM]>;

/// Maximum number of items in one array under the default limits.
pub fn max_array_size() -> usize {
    Allocator::DEFAULT.config().max_array_items()
}

/// Total element count of an array with the given extents.
///
/// Zero dimensions means zero items. The running product is kept in
/// 32 bits and checked against a 64-bit product after every step; a
/// negative extent, an overflowing product or a count above
/// [`max_array_size`] is [`ArrayError::SizeExceeded`].
pub fn array_get_n_items(dims: &[i32]) -> Result<usize, ArrayError> {
    let max = max_array_size();
    if dims.is_empty() {
        return Ok(0);
    }
    let mut ret: i32 = 1;
    for &d in dims {
        // A negative extent means upper minus lower bound overflowed.
        if d < 0 {
            return Err(ArrayError::SizeExceeded { max });
        }
        let prod = i64::from(ret) * i64::from(d);
        ret = i32::try_from(prod).map_err(|_| ArrayError::SizeExceeded { max })?;
    }
    let n = ret as usize;
    if n > max {
        return Err(ArrayError::SizeExceeded { max });
    }
    Ok(n)
}

/// Header size of a container without a null bitmap.
pub fn overhead_nonulls(ndim: usize) -> usize {
    max_align(ARRAY_HEADER_SIZE + 2 * std::mem::size_of::<i32>() * ndim)
}

/// Header size of a container whose null bitmap covers `nitems`.
///
/// This is the value stored in `dataoffset` when an array has nulls.
pub fn overhead_withnulls(ndim: usize, nitems: usize) -> usize {
    max_align(ARRAY_HEADER_SIZE + 2 * std::mem::size_of::<i32>() * ndim + nitems.div_ceil(8))
}

/// Validate extents against lower bounds and the dimension ceiling.
pub(crate) fn check_dims(dims: &[i32], lbs: &[i32]) -> Result<(), ArrayError> {
    if dims.len() > MAXDIM {
        return Err(ArrayError::TooManyDimensions {
            ndim: dims.len(),
            max: MAXDIM,
        });
    }
    if dims.len() != lbs.len() {
        return Err(ArrayError::InvalidDimensions {
            dims: dims.len(),
            lbounds: lbs.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_dimensions_have_no_items() {
        assert_eq!(array_get_n_items(&[]), Ok(0));
    }

    #[test]
    fn zero_extent_is_empty_not_error() {
        assert_eq!(array_get_n_items(&[3, 0, 5]), Ok(0));
    }

    #[test]
    fn negative_extent_exceeds() {
        assert!(matches!(
            array_get_n_items(&[2, -1]),
            Err(ArrayError::SizeExceeded { .. })
        ));
    }

    #[test]
    fn int32_overflow_exceeds() {
        assert!(matches!(
            array_get_n_items(&[65_536, 65_536]),
            Err(ArrayError::SizeExceeded { .. })
        ));
    }

    #[test]
    fn max_items_boundary() {
        let max = max_array_size();
        assert_eq!(max, 134_217_727);
        assert_eq!(array_get_n_items(&[max as i32]), Ok(max));
        assert_eq!(
            array_get_n_items(&[max as i32 + 1]),
            Err(ArrayError::SizeExceeded { max })
        );
    }

    #[test]
    fn overhead_examples() {
        assert_eq!(overhead_nonulls(1), 24);
        assert_eq!(overhead_withnulls(1, 3), 32);
        assert_eq!(overhead_withnulls(2, 0), 32);
        assert_eq!(overhead_withnulls(2, 64), 40);
    }

    #[test]
    fn check_dims_limits() {
        assert!(check_dims(&[1; 6], &[1; 6]).is_ok());
        assert_eq!(
            check_dims(&[1; 7], &[1; 7]),
            Err(ArrayError::TooManyDimensions { ndim: 7, max: 6 })
        );
        assert_eq!(
            check_dims(&[1, 2], &[1]),
            Err(ArrayError::InvalidDimensions {
                dims: 2,
                lbounds: 1
            })
        );
    }

    proptest! {
        #[test]
        fn count_is_product(dims in prop::collection::vec(0i32..20, 0..=MAXDIM)) {
            let expected: usize = if dims.is_empty() {
                0
            } else {
                dims.iter().map(|&d| d as usize).product()
            };
            prop_assert_eq!(array_get_n_items(&dims), Ok(expected));
        }
    }
}

//! Allocation limits.

use varray_core::SIZEOF_DATUM;

/// Limits applied to every allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocConfig {
    /// Largest single request in bytes.
    ///
    /// Default: `0x3fff_ffff` (1 GiB - 1).
    pub max_alloc_size: usize,
}

impl AllocConfig {
    /// Default maximum request size.
    pub const DEFAULT_MAX_ALLOC_SIZE: usize = 0x3fff_ffff;

    /// Config with the default limits.
    pub const DEFAULT: AllocConfig = AllocConfig {
        max_alloc_size: Self::DEFAULT_MAX_ALLOC_SIZE,
    };

    /// Create a config with a custom request ceiling.
    pub const fn new(max_alloc_size: usize) -> Self {
        Self { max_alloc_size }
    }

    /// Maximum element count of a single array.
    ///
    /// Bounded so that an array of datum words always fits one request.
    pub const fn max_array_items(&self) -> usize {
        self.max_alloc_size / SIZEOF_DATUM
    }

    /// Whether a request of `size` bytes is within the ceiling.
    pub const fn is_valid_size(&self, size: usize) -> bool {
        size <= self.max_alloc_size
    }
}

impl Default for AllocConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

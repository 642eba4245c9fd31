//! The bounded allocator front end.

use bitflags::bitflags;

use crate::block::Block;
use crate::config::AllocConfig;
use crate::error::AllocError;

bitflags! {
    /// Per-request allocation options.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AllocFlags: u32 {
        /// Report exhaustion as a `None` block instead of an error.
        const NO_OOM = 0x02;
        /// Zero the block. Blocks are always zeroed; the flag records intent.
        const ZERO = 0x04;
    }
}

/// Hands out bounded, zero-initialised [`Block`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Allocator {
    config: AllocConfig,
}

impl Allocator {
    /// Allocator with the default limits.
    pub const DEFAULT: Allocator = Allocator {
        config: AllocConfig::DEFAULT,
    };

    /// Allocator with custom limits.
    pub const fn new(config: AllocConfig) -> Self {
        Self { config }
    }

    /// The limits in force.
    pub const fn config(&self) -> &AllocConfig {
        &self.config
    }

    /// Allocate `size` bytes.
    ///
    /// A zero-size request succeeds with a one-byte backing block whose
    /// logical length is zero. Requests over the ceiling are
    /// [`AllocError::InvalidSize`] regardless of `flags`. Heap exhaustion is
    /// [`AllocError::OutOfMemory`], or `Ok(None)` with [`AllocFlags::NO_OOM`].
    pub fn try_alloc(&self, size: usize, flags: AllocFlags) -> Result<Option<Block>, AllocError> {
        if !self.config.is_valid_size(size) {
            return Err(AllocError::InvalidSize {
                requested: size,
                max: self.config.max_alloc_size,
            });
        }
        let backing = size.max(1);
        let mut data = Vec::new();
        if data.try_reserve_exact(backing).is_err() {
            if flags.contains(AllocFlags::NO_OOM) {
                tracing::debug!(requested = size, "allocation failed, returning none");
                return Ok(None);
            }
            return Err(AllocError::OutOfMemory { requested: size });
        }
        data.resize(backing, 0);
        tracing::trace!(requested = size, zero = flags.contains(AllocFlags::ZERO), "block allocated");
        Ok(Some(Block::from_backing(data, size)))
    }

    /// Allocate `size` bytes, treating exhaustion as an error.
    pub fn alloc(&self, size: usize) -> Result<Block, AllocError> {
        self.try_alloc(size, AllocFlags::empty())?
            .ok_or(AllocError::OutOfMemory { requested: size })
    }

    /// Allocate `size` zeroed bytes.
    pub fn alloc_zeroed(&self, size: usize) -> Result<Block, AllocError> {
        self.try_alloc(size, AllocFlags::ZERO)?
            .ok_or(AllocError::OutOfMemory { requested: size })
    }

    /// Release a block. Releasing nothing is a no-op.
    pub fn free(&self, block: Option<Block>) {
        drop(block);
    }
}

//! Allocation discipline for the varray codec.
//!
//! Every buffer the codec and the operators create comes from an
//! [`Allocator`]: a thin, bounded front end over the global heap that
//! hands out zero-initialised [`Block`]s.
//!
//! # Limits
//!
//! Requests larger than [`AllocConfig::max_alloc_size`] are rejected with
//! [`AllocError::InvalidSize`] instead of aborting. Exhausted memory is
//! [`AllocError::OutOfMemory`], or a `None` block when the caller passes
//! [`AllocFlags::NO_OOM`].
//!
//! # Safety
//!
//! Blocks are `Vec<u8>` with zero-init. No `MaybeUninit`, no `unsafe`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod block;
pub mod config;
pub mod error;

pub use allocator::{AllocFlags, Allocator};
pub use block::Block;
pub use config::AllocConfig;
pub use error::AllocError;

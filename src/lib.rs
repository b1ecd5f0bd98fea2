//! Buddy arena allocator
//!
//! Manages a fixed-size contiguous arena by recursively halving it into
//! power-of-two blocks, tracking free blocks per size class, and coalescing
//! adjacent buddy blocks back together on release:
//! - Blocks are `(offset, order)` views over the arena, never heap nodes
//! - The buddy of a block is derived by address arithmetic, not stored
//! - Free blocks are indexed per order with O(1) insert/remove/take
//!
//! The arena is pure bookkeeping over byte offsets; a host program layers
//! address translation (offset to pointer or slice) on top.

#![no_std]

extern crate alloc;

// Logging support - conditionally import log crate
#[cfg(feature = "log")]
extern crate log;

// Stub macros when log is disabled - these become no-ops
#[cfg(not(feature = "log"))]
macro_rules! error {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! warn {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! info {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// The error type used for arena operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Invalid initialization parameters. The arena must be a power-of-two
    /// multiple of a power-of-two minimum block size.
    InvalidConfig,
    /// Requested size is zero.
    InvalidSize,
    /// Requested size exceeds the arena even when it is fully free.
    RequestTooLarge,
    /// No free block large enough right now; may succeed after releases.
    OutOfMemory,
    /// Release of an offset that is not currently allocated.
    InvalidFree,
}

/// A [`Result`] type with [`AllocError`] as the error type.
pub type AllocResult<T = ()> = Result<T, AllocError>;

/// Checks whether the offset has the demanded alignment.
///
/// Equivalent to `offset % align == 0`, but the alignment must be a power of two.
#[inline]
const fn is_aligned(offset: usize, align: usize) -> bool {
    offset & (align - 1) == 0
}

pub mod buddy;
pub use buddy::{ArenaGeometry, ArenaSnapshot, ArenaStats, BuddyArena, FreeIndex};

pub mod locked;
pub use locked::LockedBuddyArena;

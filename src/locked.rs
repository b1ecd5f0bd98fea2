//! Spin-locked arena wrapper.
//!
//! The core arena is single-threaded by contract and holds no internal lock.
//! This wrapper supplies the external serialization layer for callers that
//! share one arena across execution contexts: every operation takes the lock,
//! runs the bounded core operation, and releases it.

use kspin::SpinNoIrq;

use crate::buddy::{ArenaSnapshot, ArenaStats, BuddyArena};
use crate::AllocResult;

/// A [`BuddyArena`] behind a spin lock.
pub struct LockedBuddyArena {
    inner: SpinNoIrq<BuddyArena>,
}

impl LockedBuddyArena {
    /// Create a locked arena of `total_size` bytes with the given minimum
    /// block size.
    pub fn new(total_size: usize, min_block_size: usize) -> AllocResult<Self> {
        Ok(Self {
            inner: SpinNoIrq::new(BuddyArena::new(total_size, min_block_size)?),
        })
    }

    /// Allocate a block of at least `request_size` bytes.
    pub fn allocate(&self, request_size: usize) -> AllocResult<usize> {
        self.inner.lock().allocate(request_size)
    }

    /// Release a previously allocated block.
    pub fn release(&self, offset: usize) -> AllocResult {
        self.inner.lock().release(offset)
    }

    /// Take a read-only structural view of the arena state.
    pub fn snapshot(&self) -> ArenaSnapshot {
        self.inner.lock().snapshot()
    }

    /// Aggregate counters derived from the current state.
    pub fn stats(&self) -> ArenaStats {
        self.inner.lock().stats()
    }

    /// Log the current free-block distribution and allocation count.
    pub fn print_arena_info(&self) {
        self.inner.lock().print_arena_info();
    }
}

//! Buddy arena core
//!
//! Owns the free-list index and the allocation table for a single arena and
//! implements `allocate` and `release` with their split and coalesce loops.

use alloc::vec::Vec;
use hashbrown::HashMap;

#[cfg(feature = "log")]
use log::{debug, error, info};

use crate::{AllocError, AllocResult};

use super::{
    free_index::FreeIndex,
    geometry::ArenaGeometry,
    stats::{ArenaSnapshot, ArenaStats},
};

/// A buddy allocator over a fixed-size arena addressed by byte offsets.
///
/// The arena never touches backing memory; it hands out offsets and a host
/// program layers address translation on top. All state lives on this
/// instance, so independent arenas coexist and tear down deterministically.
///
/// Single-threaded by contract: every operation runs to completion in
/// `O(base_order)` steps with exclusive access. Wrap the arena in
/// [`crate::LockedBuddyArena`] to share it across contexts.
pub struct BuddyArena {
    geometry: ArenaGeometry,
    free: FreeIndex,
    /// Order of every currently allocated block, keyed by offset.
    /// `release` receives only an offset, so the size class must be
    /// recoverable from here.
    allocated: HashMap<usize, usize>,
}

impl BuddyArena {
    /// Create an arena of `total_size` bytes with the given minimum block
    /// size. The arena starts as a single free block of the maximum order.
    pub fn new(total_size: usize, min_block_size: usize) -> AllocResult<Self> {
        let geometry = ArenaGeometry::new(total_size, min_block_size)?;
        let mut free = FreeIndex::new(geometry.base_order());
        free.insert(geometry.base_order(), 0);
        Ok(Self {
            geometry,
            free,
            allocated: HashMap::new(),
        })
    }

    /// The arena's immutable shape.
    pub const fn geometry(&self) -> &ArenaGeometry {
        &self.geometry
    }

    /// Allocate a block of at least `request_size` bytes and return its
    /// byte offset from the arena base.
    ///
    /// The request is rounded up to the smallest size class that fits, and
    /// the smallest sufficient free block is split down to that class, so an
    /// allocated block is always smaller than twice the request.
    pub fn allocate(&mut self, request_size: usize) -> AllocResult<usize> {
        let target_order = self.geometry.order_for(request_size)?;

        // Find the first non-empty size class at or above the target.
        // Running out of candidates here is the only out-of-memory case;
        // any larger free block can always be split down.
        let mut order = target_order;
        let mut offset = loop {
            if order > self.geometry.base_order() {
                debug!(
                    "buddy arena: allocation failure: {} bytes (order {})",
                    request_size, target_order
                );
                return Err(AllocError::OutOfMemory);
            }
            match self.free.take_any(order) {
                Some(offset) => break offset,
                None => order += 1,
            }
        };

        // Split down to the target order. The lower half keeps the offset;
        // each upper half becomes a free block one order below.
        while order > target_order {
            order -= 1;
            let upper = offset + self.geometry.block_size(order);
            self.free.insert(order, upper);
        }
        debug_assert!(self.geometry.is_block_aligned(offset, target_order));

        self.allocated.insert(offset, target_order);
        Ok(offset)
    }

    /// Release a previously allocated block.
    ///
    /// The freed block is coalesced with its buddy exhaustively up the order
    /// chain before being reinserted, so no two free buddies ever coexist in
    /// the index.
    pub fn release(&mut self, offset: usize) -> AllocResult {
        let Some(order) = self.allocated.remove(&offset) else {
            error!(
                "buddy arena: invalid free at offset {:#x}: not currently allocated",
                offset
            );
            return Err(AllocError::InvalidFree);
        };

        let mut offset = offset;
        let mut order = order;
        while order < self.geometry.base_order() {
            let buddy = self.geometry.buddy_offset(offset, order);
            if !self.free.remove(order, buddy) {
                break;
            }
            // The merged block starts at the lower of the two halves.
            offset = offset.min(buddy);
            order += 1;
        }

        self.free.insert(order, offset);
        Ok(())
    }

    /// Take a read-only structural view of the complete arena state.
    pub fn snapshot(&self) -> ArenaSnapshot {
        let mut free_by_order = Vec::with_capacity(self.geometry.base_order() + 1);
        for order in 0..=self.geometry.base_order() {
            let mut offsets: Vec<usize> = self.free.iter(order).collect();
            offsets.sort_unstable();
            free_by_order.push(offsets);
        }

        let mut allocations: Vec<(usize, usize)> =
            self.allocated.iter().map(|(&o, &k)| (o, k)).collect();
        allocations.sort_unstable();

        ArenaSnapshot {
            total_size: self.geometry.total_size(),
            min_block_size: self.geometry.min_block_size(),
            free_by_order,
            allocations,
        }
    }

    /// Aggregate counters derived from the current state.
    pub fn stats(&self) -> ArenaStats {
        let mut stats = ArenaStats::new(self.geometry.base_order());
        stats.total_bytes = self.geometry.total_size();

        for order in 0..=self.geometry.base_order() {
            let count = self.free.len(order);
            stats.free_blocks_by_order[order] = count;
            stats.free_bytes += count * self.geometry.block_size(order);
        }

        for &order in self.allocated.values() {
            stats.used_bytes += self.geometry.block_size(order);
        }
        stats.allocated_blocks = self.allocated.len();

        stats
    }

    /// Log the current free-block distribution and allocation count.
    pub fn print_arena_info(&self) {
        info!("========== Buddy Arena Info ==========");
        info!(
            "Total size: {:#x} ({} bytes)",
            self.geometry.total_size(),
            self.geometry.total_size()
        );
        info!("Min block size: {} bytes", self.geometry.min_block_size());
        info!("Free blocks distribution:");

        for order in 0..=self.geometry.base_order() {
            let count = self.free.len(order);
            if count > 0 {
                let _block_size = self.geometry.block_size(order);
                info!(
                    "  Order {}: {} blocks ({} bytes each, total {:#x})",
                    order,
                    count,
                    _block_size,
                    count * _block_size
                );
            }
        }

        info!("Allocated blocks: {}", self.allocated.len());
        info!("======================================");
    }
}

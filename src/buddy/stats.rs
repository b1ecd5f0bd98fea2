//! Diagnostics for the buddy arena
//!
//! Read-only views over arena state, used for introspection and tests.
//! Neither type is consulted by the allocator itself; both are derived on
//! demand and never mutate state.

use alloc::vec::Vec;

/// Immutable structural view of the arena: every free offset per order plus
/// the full allocation table.
///
/// All vectors are sorted, so two snapshots taken from identical arena
/// states compare equal. Test suites rely on this to assert that an
/// allocate/release pair restores the previous state exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaSnapshot {
    /// Total arena size in bytes.
    pub total_size: usize,
    /// Smallest allocatable block size in bytes.
    pub min_block_size: usize,
    /// Sorted free offsets, indexed by order.
    pub free_by_order: Vec<Vec<usize>>,
    /// Sorted `(offset, order)` pairs for every live allocation.
    pub allocations: Vec<(usize, usize)>,
}

impl ArenaSnapshot {
    const fn block_size(&self, order: usize) -> usize {
        self.min_block_size << order
    }

    /// Total bytes sitting on free lists.
    pub fn free_bytes(&self) -> usize {
        self.free_by_order
            .iter()
            .enumerate()
            .map(|(order, offsets)| offsets.len() * self.block_size(order))
            .sum()
    }

    /// Total bytes backing live allocations, internal fragmentation included.
    pub fn used_bytes(&self) -> usize {
        self.allocations
            .iter()
            .map(|&(_, order)| self.block_size(order))
            .sum()
    }

    /// Whether `offset` is free at exactly `order`.
    pub fn is_free(&self, order: usize, offset: usize) -> bool {
        self.free_by_order[order].binary_search(&offset).is_ok()
    }
}

/// Aggregate arena counters, derived from the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaStats {
    pub total_bytes: usize,
    pub free_bytes: usize,
    pub used_bytes: usize,
    /// Number of live allocations.
    pub allocated_blocks: usize,
    /// Number of free blocks at each order.
    pub free_blocks_by_order: Vec<usize>,
}

impl ArenaStats {
    pub fn new(base_order: usize) -> Self {
        Self {
            total_bytes: 0,
            free_bytes: 0,
            used_bytes: 0,
            allocated_blocks: 0,
            free_blocks_by_order: alloc::vec![0; base_order + 1],
        }
    }
}

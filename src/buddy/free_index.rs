//! Per-order free block index
//!
//! One set of free offsets per size class. Hash sets give O(1) average
//! insert, removal by a specific offset, and retrieval of an arbitrary
//! member. Which free block of a given order gets handed out is not part of
//! the contract; any member is equally valid.

use alloc::vec::Vec;
use hashbrown::HashSet;

/// Free lists for every order `0..=base_order`, keyed by offset.
pub struct FreeIndex {
    lists: Vec<HashSet<usize>>,
}

impl FreeIndex {
    /// Create an index covering orders `0..=base_order`, all lists empty.
    pub fn new(base_order: usize) -> Self {
        let mut lists = Vec::with_capacity(base_order + 1);
        lists.resize_with(base_order + 1, HashSet::new);
        Self { lists }
    }

    /// Record `offset` as a free block of `order`.
    ///
    /// Returns `false` if the offset was already present, which indicates a
    /// bookkeeping error in the caller.
    pub fn insert(&mut self, order: usize, offset: usize) -> bool {
        self.lists[order].insert(offset)
    }

    /// Remove `offset` from the free list of `order`.
    ///
    /// Returns `false` if the offset was not present.
    pub fn remove(&mut self, order: usize, offset: usize) -> bool {
        self.lists[order].remove(&offset)
    }

    /// Whether `offset` is currently free at exactly `order`.
    pub fn contains(&self, order: usize, offset: usize) -> bool {
        self.lists[order].contains(&offset)
    }

    /// Remove and return an arbitrary free block of exactly `order`.
    pub fn take_any(&mut self, order: usize) -> Option<usize> {
        let offset = self.lists[order].iter().next().copied()?;
        self.lists[order].remove(&offset);
        Some(offset)
    }

    /// Whether the free list of `order` is empty.
    pub fn is_empty(&self, order: usize) -> bool {
        self.lists[order].is_empty()
    }

    /// Number of free blocks at `order`.
    pub fn len(&self, order: usize) -> usize {
        self.lists[order].len()
    }

    /// Iterate the free offsets of `order`, in unspecified order.
    pub fn iter(&self, order: usize) -> impl Iterator<Item = usize> + '_ {
        self.lists[order].iter().copied()
    }
}

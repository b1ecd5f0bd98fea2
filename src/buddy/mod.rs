//! Buddy arena allocator module
//!
//! This module provides a complete buddy system implementation with:
//! - Derived (XOR-based) buddy addressing, no stored block relations
//! - Per-order free block index with O(1) insert/remove/take
//! - Exhaustive coalescing on release
//! - Snapshot and statistics support for diagnostics

pub mod arena;
pub mod free_index;
pub mod geometry;
pub mod stats;

pub use arena::BuddyArena;
pub use free_index::FreeIndex;
pub use geometry::ArenaGeometry;
pub use stats::{ArenaSnapshot, ArenaStats};

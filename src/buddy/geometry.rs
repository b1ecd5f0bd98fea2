//! Arena geometry and size-class math
//!
//! Pure address arithmetic for the buddy system: size classes (orders),
//! block sizes, and buddy/parent offsets computed on demand from
//! `(offset, order)` pairs.

use crate::{AllocError, AllocResult};

/// Immutable shape of a buddy arena.
///
/// A block of order `k` spans `2^k * min_block_size` bytes and its offset is
/// always a multiple of its own size, so the buddy of `(offset, k)` is
/// exactly `offset ^ block_size(k)`. The whole arena is the single block of
/// `base_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaGeometry {
    /// log2 of the arena size in minimum-block units
    base_order: usize,
    /// log2 of the smallest allocatable unit in bytes
    min_block_log2: usize,
}

impl ArenaGeometry {
    /// Validate the configured sizes and derive the arena shape.
    ///
    /// `min_block_size` must be a power of two (XOR buddy arithmetic on byte
    /// offsets needs power-of-two block sizes at every order) and
    /// `total_size` must be a power-of-two multiple of it.
    pub fn new(total_size: usize, min_block_size: usize) -> AllocResult<Self> {
        if total_size == 0 || min_block_size == 0 {
            return Err(AllocError::InvalidConfig);
        }
        if !min_block_size.is_power_of_two() {
            return Err(AllocError::InvalidConfig);
        }
        if total_size % min_block_size != 0 {
            return Err(AllocError::InvalidConfig);
        }

        let units = total_size / min_block_size;
        if !units.is_power_of_two() {
            return Err(AllocError::InvalidConfig);
        }

        Ok(Self {
            base_order: units.trailing_zeros() as usize,
            min_block_log2: min_block_size.trailing_zeros() as usize,
        })
    }

    /// Order of the block covering the whole arena.
    pub const fn base_order(&self) -> usize {
        self.base_order
    }

    /// Size in bytes of the smallest allocatable block.
    pub const fn min_block_size(&self) -> usize {
        1 << self.min_block_log2
    }

    /// Total arena size in bytes.
    pub const fn total_size(&self) -> usize {
        self.block_size(self.base_order)
    }

    /// Size in bytes of a block at the given order.
    pub const fn block_size(&self, order: usize) -> usize {
        (1 << order) << self.min_block_log2
    }

    /// Smallest order whose block size satisfies a request of
    /// `request_size` bytes.
    pub fn order_for(&self, request_size: usize) -> AllocResult<usize> {
        if request_size == 0 {
            return Err(AllocError::InvalidSize);
        }
        if request_size > self.total_size() {
            return Err(AllocError::RequestTooLarge);
        }

        let min = self.min_block_size();
        let units = (request_size + min - 1) / min;
        let order = if units.is_power_of_two() {
            units.trailing_zeros() as usize
        } else {
            units.next_power_of_two().trailing_zeros() as usize
        };

        Ok(order)
    }

    /// Offset of the other half of this block's parent.
    ///
    /// A pure function of `(offset, order)`; no relation between blocks is
    /// ever stored.
    pub const fn buddy_offset(&self, offset: usize, order: usize) -> usize {
        offset ^ self.block_size(order)
    }

    /// Offset of the enclosing block one order up.
    pub const fn parent_offset(&self, offset: usize, order: usize) -> usize {
        offset & !(self.block_size(order + 1) - 1)
    }

    /// Whether `(offset, order)` names a well-formed block: aligned to its
    /// own size and fully inside the arena.
    pub const fn is_block_aligned(&self, offset: usize, order: usize) -> bool {
        crate::is_aligned(offset, self.block_size(order))
            && offset + self.block_size(order) <= self.total_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(ArenaGeometry::new(1024, 1).is_ok());
        assert!(ArenaGeometry::new(4096, 16).is_ok());
        assert!(ArenaGeometry::new(16, 16).is_ok());

        assert_eq!(ArenaGeometry::new(0, 1), Err(AllocError::InvalidConfig));
        assert_eq!(ArenaGeometry::new(1024, 0), Err(AllocError::InvalidConfig));
        // Non-power-of-two granularity
        assert_eq!(ArenaGeometry::new(1536, 3), Err(AllocError::InvalidConfig));
        // Total not a multiple of the granularity
        assert_eq!(ArenaGeometry::new(1000, 16), Err(AllocError::InvalidConfig));
        // Multiple, but not a power-of-two one
        assert_eq!(ArenaGeometry::new(768, 256), Err(AllocError::InvalidConfig));
        // Arena smaller than one block
        assert_eq!(ArenaGeometry::new(512, 1024), Err(AllocError::InvalidConfig));
    }

    #[test]
    fn test_shape() {
        let geom = ArenaGeometry::new(1024, 1).unwrap();
        assert_eq!(geom.base_order(), 10);
        assert_eq!(geom.min_block_size(), 1);
        assert_eq!(geom.total_size(), 1024);
        assert_eq!(geom.block_size(0), 1);
        assert_eq!(geom.block_size(7), 128);

        let geom = ArenaGeometry::new(4096, 16).unwrap();
        assert_eq!(geom.base_order(), 8);
        assert_eq!(geom.block_size(0), 16);
        assert_eq!(geom.total_size(), 4096);
    }

    #[test]
    fn test_order_for() {
        let geom = ArenaGeometry::new(1024, 1).unwrap();
        assert_eq!(geom.order_for(1), Ok(0));
        assert_eq!(geom.order_for(2), Ok(1));
        assert_eq!(geom.order_for(3), Ok(2));
        assert_eq!(geom.order_for(100), Ok(7));
        assert_eq!(geom.order_for(128), Ok(7));
        assert_eq!(geom.order_for(129), Ok(8));
        assert_eq!(geom.order_for(1024), Ok(10));

        assert_eq!(geom.order_for(0), Err(AllocError::InvalidSize));
        assert_eq!(geom.order_for(1025), Err(AllocError::RequestTooLarge));
        assert_eq!(geom.order_for(2000), Err(AllocError::RequestTooLarge));
    }

    #[test]
    fn test_order_for_with_granularity() {
        let geom = ArenaGeometry::new(4096, 16).unwrap();
        // Anything up to one minimum block rounds to order 0
        assert_eq!(geom.order_for(1), Ok(0));
        assert_eq!(geom.order_for(16), Ok(0));
        assert_eq!(geom.order_for(17), Ok(1));
        assert_eq!(geom.order_for(100), Ok(3));
        assert_eq!(geom.order_for(4096), Ok(8));
        assert_eq!(geom.order_for(4097), Err(AllocError::RequestTooLarge));
    }

    #[test]
    fn test_buddy_offset() {
        let geom = ArenaGeometry::new(1024, 1).unwrap();
        assert_eq!(geom.buddy_offset(0, 7), 128);
        assert_eq!(geom.buddy_offset(128, 7), 0);
        assert_eq!(geom.buddy_offset(256, 8), 0);
        assert_eq!(geom.buddy_offset(0, 9), 512);
        // Buddy is an involution at every order
        for order in 0..10 {
            let offset = geom.block_size(order) * 3 % 1024;
            let offset = offset & !(geom.block_size(order) - 1);
            assert_eq!(geom.buddy_offset(geom.buddy_offset(offset, order), order), offset);
        }
    }

    #[test]
    fn test_parent_offset() {
        let geom = ArenaGeometry::new(1024, 1).unwrap();
        assert_eq!(geom.parent_offset(384, 7), 256);
        assert_eq!(geom.parent_offset(256, 7), 256);
        assert_eq!(geom.parent_offset(128, 7), 0);
        // Parent contains both the block and its buddy
        assert_eq!(
            geom.parent_offset(geom.buddy_offset(384, 7), 7),
            geom.parent_offset(384, 7)
        );
    }

    #[test]
    fn test_block_alignment() {
        let geom = ArenaGeometry::new(1024, 1).unwrap();
        assert!(geom.is_block_aligned(0, 10));
        assert!(geom.is_block_aligned(512, 9));
        assert!(geom.is_block_aligned(384, 7));
        // Misaligned for its order
        assert!(!geom.is_block_aligned(64, 7));
        // Out of bounds
        assert!(!geom.is_block_aligned(1024, 0));
    }
}

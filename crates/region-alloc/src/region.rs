//! A single named, fixed-capacity arena and its block list.
//!
//! A [`Region`] owns a zero-initialised byte buffer of exactly `capacity`
//! bytes and the [`BlockList`] that carves it up. Capacity never changes
//! after creation. Dropping a region releases the block list first, then the
//! arena (field declaration order).

use log::trace;

use crate::block_list::{Block, BlockList};
use crate::error::RegionError;
use crate::handle::{BlockHandle, RegionId};

/// One named arena with first-fit block allocation.
#[derive(Debug)]
pub struct Region {
    /// Block descriptors over `arena`. Declared before `arena` so it drops first.
    blocks: BlockList,
    /// Backing storage, exactly `capacity` bytes.
    arena: Vec<u8>,
    /// Unique identity, embedded in every handle from this region.
    id: RegionId,
    /// Caller-supplied name; may be empty.
    name: String,
    /// Running sum of live block sizes.
    bytes_used: u16,
}

impl Region {
    /// Create an empty region of `capacity` bytes.
    ///
    /// `capacity` must already be rounded and clamped. The arena is reserved
    /// fallibly so an allocation failure is reported instead of aborting.
    pub fn new(name: &str, capacity: u16) -> Result<Self, RegionError> {
        let mut arena = Vec::new();
        arena
            .try_reserve_exact(usize::from(capacity))
            .map_err(|_| RegionError::ArenaAllocation {
                requested: capacity,
            })?;
        arena.resize(usize::from(capacity), 0);

        Ok(Self {
            blocks: BlockList::new(capacity),
            arena,
            id: RegionId::next(),
            name: name.to_owned(),
            bytes_used: 0,
        })
    }

    /// This region's unique identity.
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// The region's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total arena size in bytes.
    pub fn capacity(&self) -> u16 {
        self.blocks.capacity()
    }

    /// Bytes currently handed out.
    pub fn bytes_used(&self) -> u16 {
        self.bytes_used
    }

    /// Bytes not handed out (not necessarily contiguous).
    pub fn free_bytes(&self) -> u16 {
        self.capacity() - self.bytes_used
    }

    /// Unused space as a percentage of capacity.
    pub fn free_percent(&self) -> f32 {
        let capacity = f32::from(self.capacity());
        if capacity == 0.0 {
            return 0.0;
        }
        100.0 - (f32::from(self.bytes_used) / capacity) * 100.0
    }

    /// The region's live blocks.
    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    /// Whether `handle` was issued by this region.
    pub fn owns(&self, handle: BlockHandle) -> bool {
        handle.region == self.id
    }

    /// Allocate `size` bytes (already alignment-rounded).
    ///
    /// Rejects early if `size` exceeds the unused byte count, then asks the
    /// block list for a first-fit placement. The new block's bytes are zeroed
    /// before the handle is returned.
    pub fn alloc(&mut self, size: u16) -> Result<BlockHandle, RegionError> {
        let available = self.free_bytes();
        if size > available {
            return Err(RegionError::InsufficientSpace {
                requested: size,
                available,
            });
        }

        let block = self
            .blocks
            .add(size)
            .ok_or(RegionError::NoFit { requested: size })?;
        self.bytes_used += block.size();
        self.arena[block.range()].fill(0);

        trace!("region '{}': allocated {block}", self.name);
        Ok(BlockHandle::new(self.id, block.start()))
    }

    /// Release the block named by `handle`, returning its size.
    pub fn free(&mut self, handle: BlockHandle) -> Result<u16, RegionError> {
        if !self.owns(handle) {
            return Err(RegionError::UnknownBlock { handle });
        }
        let block = self
            .blocks
            .remove(handle.offset)
            .ok_or(RegionError::UnknownBlock { handle })?;

        debug_assert!(self.bytes_used >= block.size(), "byte accounting underflow");
        self.bytes_used = self.bytes_used.saturating_sub(block.size());

        trace!("region '{}': freed {block}", self.name);
        Ok(block.size())
    }

    /// The live block named by `handle`, if this region issued it.
    pub fn block(&self, handle: BlockHandle) -> Option<&Block> {
        if !self.owns(handle) {
            return None;
        }
        self.blocks.find(handle.offset)
    }

    /// Recorded size of the block named by `handle`, or 0 if unknown.
    pub fn size_of(&self, handle: BlockHandle) -> u16 {
        self.block(handle).map_or(0, Block::size)
    }

    /// Shared access to a live block's bytes.
    pub fn block_bytes(&self, handle: BlockHandle) -> Option<&[u8]> {
        let range = self.block(handle)?.range();
        Some(&self.arena[range])
    }

    /// Mutable access to a live block's bytes.
    pub fn block_bytes_mut(&mut self, handle: BlockHandle) -> Option<&mut [u8]> {
        let range = self.block(handle)?.range();
        Some(&mut self.arena[range])
    }

    /// Tear down the block list, then release the arena.
    pub fn release(mut self) {
        let live = self.blocks.len();
        self.blocks.teardown();
        self.arena = Vec::new();
        self.bytes_used = 0;
        trace!("region '{}': released with {live} live blocks", self.name);
    }
}

//! Address-ordered block lists with first-fit placement.
//!
//! A [`BlockList`] records the live blocks of one region's arena as
//! `(start, size)` descriptors kept in strictly increasing start order.
//! Free space is never stored: a gap is whatever lies between the end of one
//! block and the start of the next (or the end of the arena), so freeing a
//! block makes its bytes available to the next first-fit walk with no
//! merging step.
//!
//! ```text
//! offset 0                                                   capacity
//! │ A (16) │ gap (8) │ B (32)       │ C (8) │      tail gap       │
//! └────────┴─────────┴──────────────┴───────┴─────────────────────┘
//!   prev_end starts at 0; each step compares next.start - prev_end
//! ```

use std::fmt;

/// Descriptor for one live allocation inside a region's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    start: u16,
    size: u16,
}

impl Block {
    pub(crate) const fn new(start: u16, size: u16) -> Self {
        Self { start, size }
    }

    /// Start offset within the arena.
    pub const fn start(&self) -> u16 {
        self.start
    }

    /// Length in bytes. Always a non-zero multiple of the alignment.
    pub const fn size(&self) -> u16 {
        self.size
    }

    /// One past the last byte, as a `u32` so a block ending at the top of a
    /// maximum-size arena does not overflow.
    pub const fn end(&self) -> u32 {
        self.start as u32 + self.size as u32
    }

    /// Byte range covered by this block, for slicing the arena.
    pub fn range(&self) -> std::ops::Range<usize> {
        usize::from(self.start)..self.end() as usize
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}+{}", self.start, self.size)
    }
}

/// Where a first-fit search decided a new block should go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Index in the block list the new descriptor is inserted at.
    pub index: usize,
    /// Start offset of the new block.
    pub start: u16,
}

/// A run of unallocated bytes between blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gap {
    /// First free offset.
    pub start: u16,
    /// Number of free bytes.
    pub len: u16,
}

/// Find the lowest-addressed gap in `blocks` that holds `size` bytes.
///
/// `blocks` must be sorted by start offset and non-overlapping. Walks the
/// list tracking the end of the previous block (starting at offset 0); the
/// first gap of at least `size` bytes wins. If no internal gap fits, the
/// space between the last block and `capacity` is tried.
pub fn first_fit(blocks: &[Block], capacity: u16, size: u16) -> Option<Placement> {
    let size = u32::from(size);
    let mut prev_end = 0u32;

    for (index, block) in blocks.iter().enumerate() {
        let start = u32::from(block.start);
        debug_assert!(start >= prev_end, "block list out of order at {block}");
        if start.saturating_sub(prev_end) >= size {
            return Some(Placement {
                index,
                start: prev_end as u16,
            });
        }
        prev_end = prev_end.max(block.end());
    }

    let tail = u32::from(capacity).saturating_sub(prev_end);
    (tail >= size).then_some(Placement {
        index: blocks.len(),
        start: prev_end as u16,
    })
}

/// Locate the block starting at `start`.
///
/// Returns `Ok(index)` on a hit, or `Err(index)` with the position a block
/// at `start` would be inserted at.
pub fn locate(blocks: &[Block], start: u16) -> Result<usize, usize> {
    blocks.binary_search_by_key(&start, |b| b.start)
}

/// Ordered, non-overlapping block descriptors over one arena.
#[derive(Clone, Debug, Default)]
pub struct BlockList {
    blocks: Vec<Block>,
    capacity: u16,
}

impl BlockList {
    /// Create an empty list over an arena of `capacity` bytes.
    pub fn new(capacity: u16) -> Self {
        Self {
            blocks: Vec::new(),
            capacity,
        }
    }

    /// Place a new block of `size` bytes using first-fit.
    ///
    /// `size` must already be alignment-rounded and non-zero. Returns the new
    /// block, or `None` if no gap can hold it. On `None` the list is
    /// unchanged.
    pub fn add(&mut self, size: u16) -> Option<Block> {
        debug_assert!(size > 0, "zero-sized block requested");
        if size == 0 {
            return None;
        }

        let placement = if self.blocks.is_empty() {
            (size <= self.capacity).then_some(Placement { index: 0, start: 0 })?
        } else {
            first_fit(&self.blocks, self.capacity, size)?
        };

        let block = Block::new(placement.start, size);
        self.blocks.insert(placement.index, block);
        debug_assert!(self.is_consistent());
        Some(block)
    }

    /// Run the first-fit search without modifying the list.
    pub fn first_fit(&self, size: u16) -> Option<Placement> {
        first_fit(&self.blocks, self.capacity, size)
    }

    /// The block whose start offset is exactly `start`, if any.
    pub fn find(&self, start: u16) -> Option<&Block> {
        locate(&self.blocks, start).ok().map(|i| &self.blocks[i])
    }

    /// Unlink the block starting at `start`, returning its descriptor.
    ///
    /// Returns `None` if no block starts there. Its bytes become part of a
    /// gap for later placements.
    pub fn remove(&mut self, start: u16) -> Option<Block> {
        let index = locate(&self.blocks, start).ok()?;
        Some(self.blocks.remove(index))
    }

    /// Release every descriptor. Safe to call on an empty list.
    pub fn teardown(&mut self) {
        self.blocks = Vec::new();
    }

    /// The lowest-addressed block, or `None` if nothing is allocated.
    pub fn first(&self) -> Option<&Block> {
        self.blocks.first()
    }

    /// Iterate over blocks in address order.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Blocks as a slice in address order.
    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of live blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block is allocated.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Capacity of the arena this list covers.
    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    /// Sum of all live block sizes.
    pub fn used_bytes(&self) -> u32 {
        self.blocks.iter().map(|b| u32::from(b.size)).sum()
    }

    /// Iterate over the non-empty gaps in address order, including the tail.
    pub fn gaps(&self) -> Gaps<'_> {
        Gaps {
            blocks: self.blocks.iter(),
            prev_end: 0,
            capacity: self.capacity,
            done: false,
        }
    }

    /// Length of the largest gap; the biggest block that could be placed now.
    pub fn largest_gap(&self) -> u16 {
        self.gaps().map(|g| g.len).max().unwrap_or(0)
    }

    /// Whether blocks are sorted, non-overlapping, non-empty and in bounds.
    pub fn is_consistent(&self) -> bool {
        let mut prev_end = 0u32;
        for block in &self.blocks {
            if block.size == 0 || u32::from(block.start) < prev_end {
                return false;
            }
            prev_end = block.end();
        }
        prev_end <= u32::from(self.capacity)
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the free gaps of a [`BlockList`].
pub struct Gaps<'a> {
    blocks: std::slice::Iter<'a, Block>,
    prev_end: u32,
    capacity: u16,
    done: bool,
}

impl Iterator for Gaps<'_> {
    type Item = Gap;

    fn next(&mut self) -> Option<Gap> {
        for block in self.blocks.by_ref() {
            let start = self.prev_end;
            self.prev_end = block.end();
            let len = u32::from(block.start).saturating_sub(start);
            if len > 0 {
                return Some(Gap {
                    start: start as u16,
                    len: len as u16,
                });
            }
        }
        if self.done {
            return None;
        }
        self.done = true;
        let len = u32::from(self.capacity).saturating_sub(self.prev_end);
        (len > 0).then_some(Gap {
            start: self.prev_end as u16,
            len: len as u16,
        })
    }
}

//! Test fixtures for region-alloc development.
//!
//! Provides pre-populated allocators, fill helpers, and an invariant checker
//! shared by the integration tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use region_alloc::{BlockHandle, Region, RegionAllocator};

/// Builder for allocators with preconfigured regions.
///
/// Regions are created in the order given, so the last one ends up chosen
/// unless [`choose`](AllocatorBuilder::choose) says otherwise.
#[derive(Default)]
pub struct AllocatorBuilder {
    regions: Vec<(String, i64)>,
    chosen: Option<String>,
}

impl AllocatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region of `size` bytes (interpreted like `rinit`).
    pub fn region(mut self, name: &str, size: i64) -> Self {
        self.regions.push((name.to_owned(), size));
        self
    }

    /// Add `count` regions named `"{prefix} {i}"`, each `size` bytes.
    pub fn numbered(mut self, prefix: &str, count: usize, size: i64) -> Self {
        for i in 0..count {
            self.regions.push((format!("{prefix} {i}"), size));
        }
        self
    }

    /// Choose this region once all regions exist.
    pub fn choose(mut self, name: &str) -> Self {
        self.chosen = Some(name.to_owned());
        self
    }

    /// Build the allocator.
    ///
    /// # Panics
    ///
    /// Panics if any region fails to initialise or the chosen name is unknown.
    pub fn build(self) -> RegionAllocator {
        let mut alloc = RegionAllocator::new();
        for (name, size) in &self.regions {
            if let Err(err) = alloc.create_region(name, *size) {
                panic!("fixture region '{name}' ({size} bytes): {err}");
            }
        }
        if let Some(name) = &self.chosen {
            if let Err(err) = alloc.choose(name) {
                panic!("fixture choose '{name}': {err}");
            }
        }
        alloc
    }
}

/// Allocate `size`-byte blocks in the chosen region until it refuses.
pub fn fill_with_blocks(alloc: &mut RegionAllocator, size: i64) -> Vec<BlockHandle> {
    std::iter::from_fn(|| alloc.ralloc(size)).collect()
}

/// Free every handle in `handles`, returning how many frees succeeded.
pub fn free_all(alloc: &mut RegionAllocator, handles: &[BlockHandle]) -> usize {
    handles.iter().filter(|&&h| alloc.rfree(h)).count()
}

/// Assert the structural invariants of `region`.
///
/// Blocks are in strictly increasing, non-overlapping order inside the
/// arena, every size is a non-zero multiple of `alignment`, and the byte
/// count matches the sum of block sizes.
///
/// # Panics
///
/// Panics with a description of the first violated invariant.
pub fn assert_region_consistent(region: &Region, alignment: u16) {
    let blocks = region.blocks();
    assert!(
        blocks.is_consistent(),
        "region '{}' block list out of order or overlapping: {:?}",
        region.name(),
        blocks.as_slice()
    );
    for block in blocks {
        assert!(
            block.size() > 0 && block.size() % alignment == 0,
            "region '{}' block {block} is not {alignment}-aligned",
            region.name()
        );
    }
    assert_eq!(
        u32::from(region.bytes_used()),
        blocks.used_bytes(),
        "region '{}' bytes_used disagrees with its blocks",
        region.name()
    );
    assert!(region.bytes_used() <= region.capacity());
}

/// Assert the invariants of every region in `alloc`.
pub fn assert_allocator_consistent(alloc: &RegionAllocator) {
    let alignment = alloc.config().alignment;
    for region in alloc.regions() {
        assert_region_consistent(region, alignment);
    }
}

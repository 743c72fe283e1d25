//! Benchmark workloads for the region-alloc allocator.
//!
//! Provides deterministic allocation patterns for the criterion benches:
//!
//! - [`fill_profile`]: fill one region with equal-sized blocks
//! - [`checkerboard_profile`]: fill, then free every other block
//! - [`churn_sizes`]: a reproducible size sequence for alloc/free churn

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use region_alloc::{BlockHandle, RegionAllocator, MAX_REGION_SIZE};

/// Name of the region every profile allocates in.
pub const BENCH_REGION: &str = "bench";

/// Build an allocator with one chosen region of `capacity` bytes.
pub fn single_region(capacity: u16) -> RegionAllocator {
    let mut alloc = RegionAllocator::new();
    let created = alloc.rinit(BENCH_REGION, i64::from(capacity));
    debug_assert!(created);
    alloc
}

/// Fill a maximum-size region with `block_size`-byte blocks.
///
/// Returns the allocator and every handle in address order.
pub fn fill_profile(block_size: u16) -> (RegionAllocator, Vec<BlockHandle>) {
    let mut alloc = single_region(MAX_REGION_SIZE);
    let handles = std::iter::from_fn(|| alloc.ralloc(i64::from(block_size))).collect();
    (alloc, handles)
}

/// Fill a maximum-size region, then free every other block.
///
/// Leaves the worst case for first-fit: a long list whose gaps are each
/// exactly one block wide.
pub fn checkerboard_profile(block_size: u16) -> (RegionAllocator, Vec<BlockHandle>) {
    let (mut alloc, handles) = fill_profile(block_size);
    let mut kept = Vec::with_capacity(handles.len() / 2 + 1);
    for (i, h) in handles.into_iter().enumerate() {
        if i % 2 == 0 {
            kept.push(h);
        } else {
            alloc.rfree(h);
        }
    }
    (alloc, kept)
}

/// Reproducible request sizes in `1..=max`, from a linear congruential
/// sequence seeded by `seed`.
pub fn churn_sizes(seed: u64, count: usize, max: u16) -> Vec<i64> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) % u64::from(max)) as i64 + 1
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_profile_fills_region() {
        let (alloc, handles) = fill_profile(64);
        assert_eq!(handles.len(), usize::from(MAX_REGION_SIZE / 64));
        assert!(alloc.chosen_region().unwrap().free_bytes() < 64);
    }

    #[test]
    fn checkerboard_leaves_half_used() {
        let (alloc, kept) = checkerboard_profile(8);
        let region = alloc.chosen_region().unwrap();
        assert_eq!(region.blocks().len(), kept.len());
        assert_eq!(u32::from(region.bytes_used()), kept.len() as u32 * 8);
    }

    #[test]
    fn churn_sizes_are_reproducible_and_bounded() {
        let a = churn_sizes(42, 100, 256);
        let b = churn_sizes(42, 100, 256);
        assert_eq!(a, b);
        assert!(a.iter().all(|&s| (1..=256).contains(&s)));
    }
}

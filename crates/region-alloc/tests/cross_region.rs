//! Integration test: blocks outliving a change of chosen region.
//!
//! Frees resolve the owning region by searching the directory, so a block
//! allocated under one chosen region can be freed after switching to
//! another. The owner's byte count is the one that shrinks.

use proptest::prelude::*;
use region_alloc::{BlockHandle, RegionAllocator};
use region_alloc_test_utils::{assert_allocator_consistent, AllocatorBuilder};

#[test]
fn free_after_switching_regions() {
    let mut alloc = AllocatorBuilder::new()
        .region("A", 128)
        .region("B", 128)
        .choose("A")
        .build();

    let in_a = alloc.ralloc(32).unwrap();
    assert!(alloc.rchoose("B"));
    let in_b = alloc.ralloc(16).unwrap();

    assert!(alloc.rfree(in_a));
    assert_eq!(alloc.region("A").unwrap().bytes_used(), 0);
    assert_eq!(alloc.region("B").unwrap().bytes_used(), 16);
    assert_eq!(alloc.rsize(in_b), 16);
    assert_allocator_consistent(&alloc);
}

#[test]
fn same_offset_in_two_regions_stays_distinct() {
    let mut alloc = RegionAllocator::new();
    assert!(alloc.rinit("A", 64));
    let a = alloc.ralloc(8).unwrap();
    assert!(alloc.rinit("B", 64));
    let b = alloc.ralloc(8).unwrap();
    assert_eq!(a.offset(), b.offset());
    assert_ne!(a, b);

    assert!(alloc.rfree(b));
    assert_eq!(alloc.region("A").unwrap().bytes_used(), 8);
    assert!(alloc.rchoose("A"));
    assert_eq!(alloc.rsize(a), 8);
}

#[test]
fn handles_into_destroyed_region_stop_resolving() {
    let mut alloc = AllocatorBuilder::new()
        .region("Old", 64)
        .region("Keep", 64)
        .choose("Old")
        .build();
    let stale = alloc.ralloc(8).unwrap();
    alloc.rdestroy("Old");

    assert!(alloc.rchoose("Keep"));
    assert!(!alloc.rfree(stale));
    assert!(alloc.block_bytes(stale).is_none());
}

#[test]
fn report_tracks_owner_after_cross_free() {
    let mut alloc = AllocatorBuilder::new()
        .region("A", 64)
        .region("B", 64)
        .choose("A")
        .build();
    let h = alloc.ralloc(24).unwrap();
    assert!(alloc.rchoose("B"));
    assert!(alloc.rfree(h));

    let report = alloc.report();
    assert_eq!(report.total_used(), 0);
    let a = report.regions.iter().find(|r| r.name == "A").unwrap();
    assert!(a.blocks.is_empty());
    assert_eq!(a.free_percent, 100.0);
}

#[derive(Clone, Debug)]
enum Op {
    Choose(usize),
    Alloc(i64),
    Free(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3).prop_map(Op::Choose),
        (1i64..200).prop_map(Op::Alloc),
        (0usize..64).prop_map(Op::Free),
    ]
}

proptest! {
    #[test]
    fn random_workload_keeps_accounting(ops in proptest::collection::vec(op(), 1..300)) {
        let names = ["R0", "R1", "R2"];
        let mut alloc = AllocatorBuilder::new()
            .region(names[0], 512)
            .region(names[1], 256)
            .region(names[2], 1024)
            .build();
        let mut live: Vec<(BlockHandle, u16)> = Vec::new();

        for op in ops {
            match op {
                Op::Choose(i) => {
                    prop_assert!(alloc.rchoose(names[i]));
                }
                Op::Alloc(size) => {
                    if let Some(h) = alloc.ralloc(size) {
                        let recorded = alloc.rsize(h);
                        prop_assert_eq!(i64::from(recorded), (size + 7) / 8 * 8);
                        prop_assert!(alloc.block_bytes(h).unwrap().iter().all(|&b| b == 0));
                        alloc.block_bytes_mut(h).unwrap().fill(0x5A);
                        live.push((h, recorded));
                    }
                }
                Op::Free(i) => {
                    if !live.is_empty() {
                        let (h, size) = live.swap_remove(i % live.len());
                        let before = alloc.report().total_used();
                        prop_assert!(alloc.rfree(h));
                        prop_assert_eq!(alloc.report().total_used(), before - u32::from(size));
                    }
                }
            }
        }

        let expected: u32 = live.iter().map(|&(_, s)| u32::from(s)).sum();
        prop_assert_eq!(alloc.report().total_used(), expected);
        assert_allocator_consistent(&alloc);
    }
}

//! Criterion micro-benchmarks for region lifecycle and lookup.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use region_alloc::RegionAllocator;
use region_alloc_test_utils::AllocatorBuilder;

/// Benchmark: create then destroy 1000 small regions.
fn bench_create_destroy_1k(c: &mut Criterion) {
    let names: Vec<String> = (0..1000).map(|i| format!("Region {i}")).collect();
    c.bench_function("create_destroy_1k", |b| {
        b.iter(|| {
            let mut alloc = RegionAllocator::new();
            for name in &names {
                alloc.rinit(name, 64);
            }
            for name in &names {
                alloc.rdestroy(name);
            }
            black_box(alloc.region_count());
        });
    });
}

/// Benchmark: switch the chosen region among 1000 live regions.
fn bench_choose(c: &mut Criterion) {
    let mut alloc = AllocatorBuilder::new()
        .numbered("Region", 1000, 64)
        .build();
    let mut i = 0usize;
    c.bench_function("choose_among_1k", |b| {
        b.iter(|| {
            i = (i + 397) % 1000;
            black_box(alloc.rchoose(&format!("Region {i}")));
        });
    });
}

/// Benchmark: free a block owned by the oldest of 1000 regions.
///
/// The owner search visits regions most recent first, so this is the
/// longest directory walk.
fn bench_cross_region_free(c: &mut Criterion) {
    c.bench_function("cross_region_free_1k", |b| {
        b.iter_batched(
            || {
                let mut alloc = AllocatorBuilder::new()
                    .numbered("Region", 1000, 64)
                    .choose("Region 0")
                    .build();
                let h = alloc.ralloc(8);
                alloc.rchoose("Region 999");
                (alloc, h)
            },
            |(mut alloc, h)| {
                if let Some(h) = h {
                    black_box(alloc.rfree(h));
                }
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: render the dump report for 100 populated regions.
fn bench_report(c: &mut Criterion) {
    let mut alloc = AllocatorBuilder::new().numbered("Region", 100, 512).build();
    for i in 0..100 {
        alloc.rchoose(&format!("Region {i}"));
        for _ in 0..16 {
            alloc.ralloc(24);
        }
    }
    c.bench_function("report_100_regions", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            alloc.rdump(&mut out).unwrap();
            black_box(out.len());
        });
    });
}

criterion_group!(
    benches,
    bench_create_destroy_1k,
    bench_choose,
    bench_cross_region_free,
    bench_report
);
criterion_main!(benches);

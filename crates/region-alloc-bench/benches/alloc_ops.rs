//! Criterion micro-benchmarks for block allocation and free.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use region_alloc::MAX_REGION_SIZE;
use region_alloc_bench::{checkerboard_profile, churn_sizes, fill_profile, single_region};

/// Benchmark: fill a 64KB region with 64-byte blocks from empty.
fn bench_fill_64b(c: &mut Criterion) {
    c.bench_function("fill_64b", |b| {
        b.iter(|| {
            let (alloc, handles) = fill_profile(64);
            black_box((alloc, handles));
        });
    });
}

/// Benchmark: one first-fit placement into a checkerboarded region.
///
/// Every gap is 8 bytes, so a 16-byte request walks the whole list and
/// fails; an 8-byte request lands in the first gap.
fn bench_first_fit_checkerboard(c: &mut Criterion) {
    c.bench_function("first_fit_checkerboard_miss", |b| {
        let (mut alloc, _kept) = checkerboard_profile(8);
        b.iter(|| black_box(alloc.ralloc(16)));
    });

    c.bench_function("first_fit_checkerboard_hit", |b| {
        b.iter_batched(
            || checkerboard_profile(8),
            |(mut alloc, kept)| {
                black_box(alloc.ralloc(8));
                black_box(kept);
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: free every block of a full region, lowest address first.
fn bench_free_all(c: &mut Criterion) {
    c.bench_function("free_all_64b", |b| {
        b.iter_batched(
            || fill_profile(64),
            |(mut alloc, handles)| {
                for h in handles {
                    black_box(alloc.rfree(h));
                }
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark: mixed alloc/free churn with reproducible sizes.
fn bench_churn(c: &mut Criterion) {
    let sizes = churn_sizes(7, 1024, 512);
    c.bench_function("churn_1024_ops", |b| {
        b.iter(|| {
            let mut alloc = single_region(MAX_REGION_SIZE);
            let mut live = Vec::new();
            for (i, &size) in sizes.iter().enumerate() {
                if let Some(h) = alloc.ralloc(size) {
                    live.push(h);
                }
                if i % 3 == 2 && !live.is_empty() {
                    let h = live.swap_remove(i % live.len());
                    alloc.rfree(h);
                }
            }
            black_box(alloc.report().total_used());
        });
    });
}

criterion_group!(
    benches,
    bench_fill_64b,
    bench_first_fit_checkerboard,
    bench_free_all,
    bench_churn
);
criterion_main!(benches);

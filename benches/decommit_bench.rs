//! Decommit throughput.
//!
//! Mirrors the crate's intended hot path: a pooled buffer is touched (so
//! there are resident pages to give back) and then decommitted, once per
//! iteration. The sub-page case measures the early-out cost alone.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use decommit::{decommit_bytes, page_size};

fn bench_decommit_bytes(c: &mut Criterion) {
    let ps = page_size();

    let mut group = c.benchmark_group("decommit_bytes");

    group.throughput(Throughput::Bytes((2 * ps) as u64));
    group.bench_function("two_pages", |b| {
        let mut buf = vec![0u8; 2 * ps];
        b.iter(|| {
            // Fault the pages back in so every iteration releases real memory.
            buf[0] = 255;
            buf[ps] = 255;
            black_box(decommit_bytes(&mut buf));
        })
    });

    group.throughput(Throughput::Bytes((64 * ps) as u64));
    group.bench_function("sixty_four_pages", |b| {
        let mut buf = vec![0u8; 64 * ps];
        b.iter(|| {
            for page in 0..64 {
                buf[page * ps] = 255;
            }
            black_box(decommit_bytes(&mut buf));
        })
    });

    group.bench_function("sub_page_early_out", |b| {
        let mut buf = vec![0u8; ps / 2];
        b.iter(|| black_box(decommit_bytes(&mut buf)));
    });

    group.finish();
}

criterion_group!(benches, bench_decommit_bytes);
criterion_main!(benches);

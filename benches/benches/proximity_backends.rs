// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_proximity::{Backend, ProximityIndex, ProximityIndexGeneric};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize, extent: f64) -> Vec<(f64, f64)> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| (rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn fill_and_probe<B: Backend>(mut idx: ProximityIndexGeneric<u32, B>, pts: &[(f64, f64)]) {
    for (i, &(x, y)) in pts.iter().enumerate() {
        let _ = idx.insert(x, y, i as u32);
    }
    let mut hits = 0_usize;
    for &(x, y) in pts.iter().step_by(7) {
        if idx.nearest_within(x + 0.5, y - 0.5).is_some() {
            hits += 1;
        }
    }
    black_box(hits);
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    for &n in &[1_000usize, 10_000, 50_000] {
        let pts = gen_uniform_points(n, 2000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_probe_n{}", n), |b| {
            b.iter_batched(
                || ProximityIndex::<u32>::new(4.0),
                |idx| fill_and_probe(idx, &pts),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_flatvec(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatvec");
    for &n in &[1_000usize, 5_000] {
        let pts = gen_uniform_points(n, 2000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_probe_n{}", n), |b| {
            b.iter_batched(
                || ProximityIndex::<u32>::with_flat_scan(4.0),
                |idx| fill_and_probe(idx, &pts),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid, bench_flatvec);
criterion_main!(benches);

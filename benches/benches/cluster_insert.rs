// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_cluster::{ClusterConfig, ClusterIndex};

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

fn gen_uniform_points(count: usize, extent: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn gen_hotspot_points(n_spots: usize, per_spot: usize, spread: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n_spots * per_spot);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_spots);
    for _ in 0..n_spots {
        centers.push((rng.next_f64() * 360.0, rng.next_f64() * 180.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_spot {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(cx + dx, cy + dy));
        }
    }
    out
}

fn insert_all(pts: &[Point]) -> ClusterIndex<Point> {
    let mut index = ClusterIndex::new(ClusterConfig::default()).unwrap();
    for &p in pts {
        index.add_point(p).unwrap();
    }
    index
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_insert");
    for &n in &[1_000usize, 10_000] {
        let uniform = gen_uniform_points(n, 360.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{}", n), |b| {
            b.iter(|| black_box(insert_all(&uniform).cluster_count()))
        });
        let spots = gen_hotspot_points(n / 100, 100, 2.0);
        group.bench_function(format!("hotspots_n{}", n), |b| {
            b.iter(|| black_box(insert_all(&spots).cluster_count()))
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_query");
    let index = insert_all(&gen_hotspot_points(100, 100, 2.0));
    group.bench_function("clusters_and_centroids_all_zooms", |b| {
        b.iter(|| {
            let mut total = 0_usize;
            for z in 0..index.max_zoom() {
                let zoom = f64::from(z);
                total += index.points_at(zoom).count();
                for cluster in index.clusters_at(zoom) {
                    black_box(cluster.centroid());
                    total += 1;
                }
            }
            black_box(total)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_queries);
criterion_main!(benches);

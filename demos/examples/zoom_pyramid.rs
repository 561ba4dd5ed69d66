// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom pyramid.
//!
//! Scatter random points around a few hotspots and report, per zoom, how many
//! markers a renderer would have to draw.
//!
//! Run:
//! - `cargo run -p understory_demos --example zoom_pyramid`

use kurbo::Point;
use understory_cluster::{ClusterConfig, ClusterIndex};

struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        ((x >> 11) as f64) / ((1u64 << 53) as f64)
    }
}

fn main() {
    env_logger::init();

    let mut rng = Rng(0x5EED_1234_ABCD_9876);
    let mut index = ClusterIndex::new(ClusterConfig::new(12, 64.0)).unwrap();
    let hotspots = [(100.0, 100.0), (400.0, 220.0), (250.0, 600.0)];
    for i in 0..3000 {
        let (cx, cy) = hotspots[i % hotspots.len()];
        let p = Point::new(
            cx + (rng.next_f64() - 0.5) * 80.0,
            cy + (rng.next_f64() - 0.5) * 80.0,
        );
        index.add_point(p).unwrap();
    }

    println!("zoom  radius    markers  clusters  largest");
    for z in 0..index.max_zoom() {
        let zoom = f64::from(z);
        let loose = index.points_at(zoom).count();
        let clusters: Vec<_> = index.clusters_at(zoom).collect();
        let largest = clusters.iter().map(|c| c.count()).max().unwrap_or(0);
        println!(
            "{z:>4}  {:>7.3}  {:>7}  {:>8}  {largest:>7}",
            index.config().radius_at(z),
            loose + clusters.len(),
            clusters.len(),
        );
        log::debug!("zoom {z}: {loose} unclustered points");
    }
}

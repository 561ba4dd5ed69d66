// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cluster basics.
//!
//! Insert a handful of markers and print what each zoom level would draw.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example cluster_basics`

use kurbo::Point;
use understory_cluster::{ClusterConfig, ClusterIndex, Position};

#[derive(Debug)]
struct Marker {
    name: &'static str,
    at: Point,
}

impl Position for Marker {
    fn position(&self) -> Point {
        self.at
    }
}

fn main() -> Result<(), understory_cluster::Error> {
    env_logger::init();

    // Radii: 8 at zoom 0, 4 at zoom 1, 2 at zoom 2, 1 at zoom 3.
    let mut index = ClusterIndex::new(ClusterConfig::new(3, 8.0))?;
    let markers = [
        ("harbor", 0.0, 0.0),
        ("ferry", 0.6, 0.2),
        ("market", 3.0, 1.0),
        ("station", 5.5, 0.0),
        ("lighthouse", 40.0, -12.0),
    ];
    for (name, x, y) in markers {
        index.add_point(Marker {
            name,
            at: Point::new(x, y),
        })?;
    }

    println!("{} markers, {} cluster nodes", index.len(), index.cluster_count());
    for zoom in 0..index.max_zoom() {
        let zoom = f64::from(zoom);
        println!("zoom {zoom}:");
        for cluster in index.clusters_at(zoom) {
            let mut names = Vec::new();
            cluster.traverse(|p, _| names.push(p.data().name));
            println!(
                "  cluster of {} at {:?}: {}",
                cluster.count(),
                cluster.centroid(),
                names.join(", ")
            );
        }
        for point in index.points_at(zoom) {
            println!("  marker {} at {:?}", point.data().name, point.position());
        }
    }

    assert_eq!(index.root().count(), markers.len());
    Ok(())
}

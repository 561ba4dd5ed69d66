// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural properties of the clustering pyramid over random inputs.

use kurbo::Point;
use proptest::prelude::*;
use understory_cluster::{ClusterConfig, ClusterIndex, ClusterRef, PointId};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build(max_zoom: u32, radius: f64, pts: &[(f64, f64)]) -> ClusterIndex<Point> {
    let mut index = ClusterIndex::new(ClusterConfig::new(max_zoom, radius)).unwrap();
    for &(x, y) in pts {
        index.add_point(Point::new(x, y)).unwrap();
    }
    index
}

fn all_nodes<'a>(root: ClusterRef<'a, Point>) -> Vec<ClusterRef<'a, Point>> {
    let mut out = vec![root];
    let mut i = 0;
    while i < out.len() {
        let kids: Vec<_> = out[i].children().collect();
        out.extend(kids);
        i += 1;
    }
    out
}

fn queryable_levels(index: &ClusterIndex<Point>) -> std::ops::RangeInclusive<u32> {
    0..=index.max_zoom().saturating_sub(1)
}

fn scenario() -> impl Strategy<Value = (u32, f64, Vec<(f64, f64)>)> {
    (
        1_u32..6,
        0.5_f64..20.0,
        prop::collection::vec((-50.0_f64..50.0, -50.0_f64..50.0), 0..60),
    )
}

proptest! {
    #[test]
    fn prop_root_counts_every_point((max_zoom, radius, pts) in scenario()) {
        init_logging();
        let index = build(max_zoom, radius, &pts);
        prop_assert_eq!(index.root().count(), pts.len());
        prop_assert_eq!(index.len(), pts.len());
    }

    #[test]
    fn prop_count_is_sum_of_members((max_zoom, radius, pts) in scenario()) {
        let index = build(max_zoom, radius, &pts);
        for node in all_nodes(index.root()) {
            let sum: usize = node.children().map(|c| c.count()).sum::<usize>()
                + node.points().count();
            prop_assert_eq!(node.count(), sum, "node {:?}", node.id());
        }
    }

    #[test]
    fn prop_centroid_is_mean_of_leaves((max_zoom, radius, pts) in scenario()) {
        let index = build(max_zoom, radius, &pts);
        for node in all_nodes(index.root()) {
            let leaves = node.leaves();
            prop_assert_eq!(leaves.len(), node.count());
            let Some(c) = node.centroid() else {
                prop_assert_eq!(node.count(), 0);
                continue;
            };
            let n = leaves.len() as f64;
            let mx = leaves.iter().map(|p| p.position().x).sum::<f64>() / n;
            let my = leaves.iter().map(|p| p.position().y).sum::<f64>() / n;
            prop_assert!((c.x - mx).abs() < 1e-9, "x {} vs {}", c.x, mx);
            prop_assert!((c.y - my).abs() < 1e-9, "y {} vs {}", c.y, my);
        }
    }

    #[test]
    fn prop_each_level_partitions_the_points((max_zoom, radius, pts) in scenario()) {
        let index = build(max_zoom, radius, &pts);
        for z in queryable_levels(&index) {
            let zoom = f64::from(z);
            let mut seen: Vec<PointId> = index.points_at(zoom).map(|p| p.id()).collect();
            for cluster in index.clusters_at(zoom) {
                cluster.traverse(|p, _| seen.push(p.id()));
            }
            seen.sort_unstable();
            let expected: Vec<usize> = (0..pts.len()).collect();
            let got: Vec<usize> = seen.iter().map(|p| p.index()).collect();
            prop_assert_eq!(got, expected, "zoom {}", z);
        }
    }

    #[test]
    fn prop_coarser_levels_never_show_more_groups((max_zoom, radius, pts) in scenario()) {
        let index = build(max_zoom, radius, &pts);
        let groups = |z: u32| {
            let zoom = f64::from(z);
            index.points_at(zoom).count() + index.clusters_at(zoom).count()
        };
        for z in queryable_levels(&index).skip(1) {
            prop_assert!(groups(z - 1) <= groups(z), "zoom {} vs {}", z - 1, z);
        }
    }

    #[test]
    fn prop_clusters_sit_one_level_below_their_parent((max_zoom, radius, pts) in scenario()) {
        let index = build(max_zoom, radius, &pts);
        for z in queryable_levels(&index) {
            for cluster in index.clusters_at(f64::from(z)) {
                let z = i32::try_from(z).unwrap();
                prop_assert_eq!(cluster.zoom(), z);
                prop_assert!(cluster.count() >= 1);
                let parent = cluster.parent().unwrap();
                prop_assert_eq!(parent.zoom(), z - 1);
            }
        }
    }

    #[test]
    fn prop_queries_are_idempotent((max_zoom, radius, pts) in scenario(), zoom in -3.0_f64..10.0) {
        let index = build(max_zoom, radius, &pts);
        let first: Vec<_> = index.points_at(zoom).map(|p| p.id()).collect();
        let again: Vec<_> = index.points_at(zoom).map(|p| p.id()).collect();
        prop_assert_eq!(first, again);
        let first: Vec<_> = index.clusters_at(zoom).map(|c| (c.id(), c.count())).collect();
        let again: Vec<_> = index.clusters_at(zoom).map(|c| (c.id(), c.count())).collect();
        prop_assert_eq!(first, again);
    }

    #[test]
    fn prop_same_input_same_structure((max_zoom, radius, pts) in scenario()) {
        let a = build(max_zoom, radius, &pts);
        let b = build(max_zoom, radius, &pts);
        for z in queryable_levels(&a) {
            let zoom = f64::from(z);
            let ca: Vec<_> = a.clusters_at(zoom).map(|c| (c.count(), c.centroid())).collect();
            let cb: Vec<_> = b.clusters_at(zoom).map(|c| (c.count(), c.centroid())).collect();
            prop_assert_eq!(ca, cb);
        }
    }
}

#[test]
fn payloads_pass_through_unchanged() {
    init_logging();
    #[derive(Debug, PartialEq)]
    struct Shop {
        id: u64,
        at: (f64, f64),
    }
    impl understory_cluster::Position for Shop {
        fn position(&self) -> Point {
            Point::new(self.at.0, self.at.1)
        }
    }

    let mut index = ClusterIndex::new(ClusterConfig::new(3, 4.0)).unwrap();
    for (i, at) in [(0.0, 0.0), (0.2, 0.0), (40.0, 40.0)].into_iter().enumerate() {
        index.add_point(Shop { id: i as u64, at }).unwrap();
    }
    let mut ids = Vec::new();
    index.root().traverse(|p, _| ids.push(p.data().id));
    ids.sort_unstable();
    assert_eq!(ids, [0, 1, 2]);

    let loose: Vec<_> = index.points_at(0.0).map(|p| p.data()).collect();
    assert_eq!(loose, [&Shop { id: 2, at: (40.0, 40.0) }]);
}

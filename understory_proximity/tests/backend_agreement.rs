// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The grid backend answers exactly like a linear scan.

use proptest::prelude::*;
use understory_proximity::ProximityIndex;

fn coords(span: f64) -> impl Strategy<Value = (f64, f64)> {
    (-span..span, -span..span)
}

proptest! {
    #[test]
    fn prop_nearest_matches_flat_scan(
        radius in 0.1_f64..8.0,
        stored in prop::collection::vec(coords(30.0), 0..120),
        probes in prop::collection::vec(coords(34.0), 1..40),
    ) {
        let mut grid: ProximityIndex<usize> = ProximityIndex::new(radius);
        let mut flat = ProximityIndex::<usize>::with_flat_scan(radius);
        for (i, &(x, y)) in stored.iter().enumerate() {
            grid.insert(x, y, i);
            flat.insert(x, y, i);
        }
        for &(x, y) in &probes {
            let a = grid.nearest_within(x, y).map(|(_, p)| p);
            let b = flat.nearest_within(x, y).map(|(_, p)| p);
            prop_assert_eq!(a, b, "at ({}, {})", x, y);
        }
    }

    #[test]
    fn prop_removal_keeps_backends_in_step(
        radius in 0.1_f64..8.0,
        stored in prop::collection::vec(coords(30.0), 1..80),
        drop_every in 2_usize..5,
        probes in prop::collection::vec(coords(34.0), 1..30),
    ) {
        let mut grid: ProximityIndex<usize> = ProximityIndex::new(radius);
        let mut flat = ProximityIndex::<usize>::with_flat_scan(radius);
        for (i, &(x, y)) in stored.iter().enumerate() {
            grid.insert(x, y, i);
            flat.insert(x, y, i);
        }
        for (i, &(x, y)) in stored.iter().enumerate().step_by(drop_every) {
            prop_assert!(grid.remove_object(x, y, i));
            prop_assert!(flat.remove_object(x, y, i));
            prop_assert!(!grid.remove_object(x, y, i));
        }
        prop_assert_eq!(grid.len(), flat.len());

        let kept: Vec<_> = grid.contents().map(|(_, p)| p).collect();
        let expected: Vec<_> = (0..stored.len()).filter(|i| i % drop_every != 0).collect();
        prop_assert_eq!(&kept, &expected);
        let flat_kept: Vec<_> = flat.contents().map(|(_, p)| p).collect();
        prop_assert_eq!(kept, flat_kept);

        for &(x, y) in &probes {
            let a = grid.nearest_within(x, y).map(|(_, p)| p);
            let b = flat.nearest_within(x, y).map(|(_, p)| p);
            prop_assert_eq!(a, b, "at ({}, {})", x, y);
        }
    }
}

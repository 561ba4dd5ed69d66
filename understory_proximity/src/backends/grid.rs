// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend. Buckets points into square cells for near-constant-time lookups.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Uniform grid backend.
///
/// Points are bucketed by `floor(x / cell_size)`, `floor(y / cell_size)`. Negative
/// coordinates are fine: flooring snaps toward negative infinity. Empty cells are
/// dropped on removal so the grid only holds occupied buckets.
pub struct Grid {
    cell_size: f64,
    cells: BTreeMap<(i64, i64), Vec<usize>>,
    len: usize,
}

impl Grid {
    /// Create a grid backend with the given cell size.
    ///
    /// Panics if `cell_size` is not a positive finite number.
    pub fn new(cell_size: f64) -> Self {
        assert!(
            cell_size.is_finite() && cell_size > 0.0,
            "cell size must be positive and finite"
        );
        Self {
            cell_size,
            cells: BTreeMap::new(),
            len: 0,
        }
    }

    /// The side length of a cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of occupied cells.
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn floor_to_i64(v: f64) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell coordinates saturate at the i64 range; far-out points share edge cells."
        )]
        let i = v as i64;
        if (i as f64) > v { i - 1 } else { i }
    }

    fn key_for(&self, x: f64, y: f64) -> (i64, i64) {
        debug_assert!(x.is_finite() && y.is_finite(), "coordinates must be finite");
        let cx = Self::floor_to_i64(x / self.cell_size);
        let cy = Self::floor_to_i64(y / self.cell_size);
        (cx, cy)
    }

    fn cells_for_aabb(&self, a: &Aabb2D) -> impl Iterator<Item = (i64, i64)> {
        let (minx, miny) = self.key_for(a.min_x, a.min_y);
        let (maxx, maxy) = self.key_for(a.max_x, a.max_y);
        (miny..=maxy).flat_map(move |y| (minx..=maxx).map(move |x| (x, y)))
    }
}

impl Backend for Grid {
    fn insert(&mut self, slot: usize, x: f64, y: f64) {
        let key = self.key_for(x, y);
        self.cells.entry(key).or_default().push(slot);
        self.len += 1;
    }
    fn remove(&mut self, slot: usize, x: f64, y: f64) {
        let key = self.key_for(x, y);
        let Some(slots) = self.cells.get_mut(&key) else {
            return;
        };
        if let Some(pos) = slots.iter().position(|&s| s == slot) {
            slots.remove(pos);
            self.len -= 1;
        }
        if slots.is_empty() {
            self.cells.remove(&key);
        }
    }
    fn clear(&mut self) {
        self.cells.clear();
        self.len = 0;
    }
    fn query_near<'a>(
        &'a self,
        x: f64,
        y: f64,
        radius: f64,
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        let window = Aabb2D::around(x, y, radius);
        let mut out = Vec::new();
        for key in self.cells_for_aabb(&window) {
            if let Some(slots) = self.cells.get(&key) {
                out.extend_from_slice(slots);
            }
        }
        Box::new(out.into_iter())
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("alive", &self.len)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

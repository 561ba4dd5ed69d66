// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
#[derive(Default)]
pub struct FlatVec {
    entries: Vec<Option<(f64, f64)>>,
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.entries.len();
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("FlatVec")
            .field("total_slots", &total)
            .field("alive", &alive)
            .finish_non_exhaustive()
    }
}

impl Backend for FlatVec {
    fn insert(&mut self, slot: usize, x: f64, y: f64) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some((x, y));
    }
    fn remove(&mut self, slot: usize, _x: f64, _y: f64) {
        if let Some(e) = self.entries.get_mut(slot) {
            *e = None;
        }
    }
    fn clear(&mut self) {
        self.entries.clear();
    }
    fn query_near<'a>(
        &'a self,
        x: f64,
        y: f64,
        radius: f64,
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        let window = Aabb2D::around(x, y, radius);
        let mut out = Vec::new();
        for (i, slot) in self.entries.iter().enumerate() {
            if let Some((ex, ey)) = *slot
                && window.contains_point(ex, ey)
            {
                out.push(i);
            }
        }
        Box::new(out.into_iter())
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for proximity indexing implementations.

use alloc::boxed::Box;

/// Spatial backend abstraction used by `ProximityIndexGeneric`.
///
/// Backends only narrow the candidate set; exact distance filtering and
/// tie-breaking happen in the index front-end.
pub trait Backend {
    /// Insert a new slot at the given position.
    fn insert(&mut self, slot: usize, x: f64, y: f64);

    /// Remove a slot that was inserted at the given position.
    fn remove(&mut self, slot: usize, x: f64, y: f64);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Candidate slots that may lie within `radius` of the point.
    ///
    /// May over-report; must never miss a slot that is within `radius`.
    fn query_near<'a>(&'a self, x: f64, y: f64, radius: f64)
    -> Box<dyn Iterator<Item = usize> + 'a>;
}

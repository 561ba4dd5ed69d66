// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `ProximityIndex` API and generic implementation over a pluggable backend.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::{FlatVec, Grid};
use crate::types::distance_sq;

/// Generational handle for entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key(u32, u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry<P> {
    generation: u32,
    x: f64,
    y: f64,
    payload: P,
    // Insertion sequence; drives `contents` order and tie-breaks.
    seq: u64,
}

/// A fixed-radius proximity index parameterized by a spatial backend.
///
/// Every query uses the radius given at construction. Objects may share or
/// nearly share positions; there is no uniqueness constraint.
#[derive(Debug)]
pub struct ProximityIndexGeneric<P: Copy + Debug, B: Backend> {
    radius: f64,
    entries: Vec<Option<Entry<P>>>,
    generations: Vec<u32>, // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    order: BTreeMap<u64, usize>,
    next_seq: u64,
    backend: B,
}

/// Default proximity index using a uniform grid whose cell size equals the radius.
pub type ProximityIndex<P> = ProximityIndexGeneric<P, Grid>;

impl<P: Copy + Debug> ProximityIndex<P> {
    /// Create a grid-backed index answering queries within `radius`.
    ///
    /// Panics if `radius` is not a positive finite number.
    pub fn new(radius: f64) -> Self {
        Self::with_backend(radius, Grid::new(radius))
    }

    /// Create an index that answers queries by linear scan.
    pub fn with_flat_scan(radius: f64) -> ProximityIndexGeneric<P, FlatVec> {
        ProximityIndexGeneric::with_backend(radius, FlatVec::default())
    }
}

impl<P, B> ProximityIndexGeneric<P, B>
where
    P: Copy + Debug,
    B: Backend,
{
    /// Create an index over an explicit backend.
    pub fn with_backend(radius: f64, backend: B) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "radius must be positive and finite"
        );
        Self {
            radius,
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            order: BTreeMap::new(),
            next_seq: 0,
            backend,
        }
    }

    /// The fixed query radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of indexed objects.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index holds no objects.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Record `payload` at `(x, y)`. Returns a stable handle `Key`.
    pub fn insert(&mut self, x: f64, y: f64, payload: P) -> Key {
        debug_assert!(x.is_finite() && y.is_finite(), "coordinates must be finite");
        let seq = self.next_seq;
        self.next_seq += 1;
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.entries.push(None);
            self.generations.push(1);
            (self.entries.len() - 1, 1)
        };
        self.entries[idx] = Some(Entry {
            generation,
            x,
            y,
            payload,
            seq,
        });
        self.order.insert(seq, idx);
        self.backend.insert(idx, x, y);
        Key::new(idx, generation)
    }

    /// Payload and position of a live entry.
    pub fn get(&self, key: Key) -> Option<(P, f64, f64)> {
        self.entry(key).map(|e| (e.payload, e.x, e.y))
    }

    /// Return the object nearest to `(x, y)` among those within the radius.
    ///
    /// Distance is inclusive of the radius. Among equally near candidates the
    /// earliest inserted wins, so results are reproducible for a given
    /// insertion order.
    pub fn nearest_within(&self, x: f64, y: f64) -> Option<(Key, P)> {
        let limit = self.radius * self.radius;
        let mut best: Option<(f64, u64, usize)> = None;
        for slot in self.backend.query_near(x, y, self.radius) {
            let Some(Some(e)) = self.entries.get(slot) else {
                continue;
            };
            let d = distance_sq(x, y, e.x, e.y);
            if d > limit {
                continue;
            }
            let better = match best {
                None => true,
                Some((bd, bseq, _)) => d < bd || (d == bd && e.seq < bseq),
            };
            if better {
                best = Some((d, e.seq, slot));
            }
        }
        let (_, _, slot) = best?;
        let e = self.entries[slot].as_ref()?;
        Some((Key::new(slot, e.generation), e.payload))
    }

    /// Remove an entry by key. Returns whether a live entry was removed.
    pub fn remove(&mut self, key: Key) -> bool {
        let Some(e) = self.entry(key) else {
            return false;
        };
        let (x, y, seq) = (e.x, e.y, e.seq);
        self.backend.remove(key.idx(), x, y);
        self.order.remove(&seq);
        self.entries[key.idx()] = None;
        self.free_list.push(key.idx());
        true
    }

    /// Iterate indexed objects in insertion order.
    pub fn contents(&self) -> impl Iterator<Item = (Key, P)> + '_ {
        self.order.values().filter_map(|&slot| {
            let e = self.entries[slot].as_ref()?;
            Some((Key::new(slot, e.generation), e.payload))
        })
    }

    /// Clear the index.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generations.clear();
        self.free_list.clear();
        self.order.clear();
        self.backend.clear();
    }

    fn entry(&self, key: Key) -> Option<&Entry<P>> {
        let e = self.entries.get(key.idx())?.as_ref()?;
        if e.generation != key.1 {
            return None;
        }
        Some(e)
    }
}

impl<P, B> ProximityIndexGeneric<P, B>
where
    P: Copy + Debug + PartialEq,
    B: Backend,
{
    /// Remove `payload`, which was recorded at `(x, y)`.
    ///
    /// The position locates the bucket; the payload identifies the entry within it.
    /// Returns whether an entry was removed. If the same payload was recorded
    /// more than once at that position, the earliest insertion goes first.
    pub fn remove_object(&mut self, x: f64, y: f64, payload: P) -> bool {
        let mut found: Option<(u64, usize)> = None;
        for slot in self.backend.query_near(x, y, 0.0) {
            let Some(Some(e)) = self.entries.get(slot) else {
                continue;
            };
            if e.payload == payload && found.is_none_or(|(seq, _)| e.seq < seq) {
                found = Some((e.seq, slot));
            }
        }
        let Some((_, slot)) = found else {
            return false;
        };
        let generation = self.generations[slot];
        self.remove(Key::new(slot, generation))
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_proximity --heading-base-level=0

//! Understory Proximity: a fixed-radius proximity index for 2D points.
//!
//! Understory Proximity answers one question quickly: "is anything already recorded
//! within `r` of this position, and if so which one is nearest?"
//!
//! - Insert objects (small `Copy` payloads such as handles) at a position.
//! - Look up the nearest object within the index's fixed radius.
//! - Remove by [`Key`] or by payload and position.
//! - Enumerate the current contents in insertion order.
//!
//! It does not depend on any geometry crate; positions are plain `f64` pairs.
//! Higher layers (like a zoom-level clustering pyramid) own one index per level and role.
//!
//! # Example
//!
//! ```rust
//! use understory_proximity::ProximityIndex;
//!
//! // Everything within 2.5 units counts as near.
//! let mut idx: ProximityIndex<u32> = ProximityIndex::new(2.5);
//! idx.insert(0.0, 0.0, 1);
//! idx.insert(10.0, 10.0, 2);
//!
//! let (_, near) = idx.nearest_within(1.0, 1.0).unwrap();
//! assert_eq!(near, 1);
//! assert!(idx.nearest_within(5.0, 5.0).is_none());
//!
//! // Remove by payload, using the position it was recorded at.
//! assert!(idx.remove_object(0.0, 0.0, 1));
//! let left: Vec<_> = idx.contents().map(|(_, p)| p).collect();
//! assert_eq!(left, [2]);
//! ```
//!
//! ## Choosing a backend
//!
//! - [`Grid`] (default via [`ProximityIndex`]): uniform grid whose cell size equals the
//!   radius, so a lookup inspects at most nine buckets.
//! - [`FlatVec`]: linear scans. Good for very small sets, and as a reference when testing.
//!
//! ### Float semantics
//!
//! This crate assumes finite coordinates. Debug builds assert.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::{FlatVec, Grid};
pub use index::{Key, ProximityIndex, ProximityIndexGeneric};
pub use types::Aabb2D;

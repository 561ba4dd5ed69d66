// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_cluster --heading-base-level=0

//! Understory Cluster: incremental, multi-resolution clustering of 2D points.
//!
//! Understory Cluster is a reusable building block for maps, scatter plots, and other
//! canvases that would otherwise draw piles of overlapping markers.
//!
//! - Feed points in one at a time with [`ClusterIndex::add_point`].
//! - Ask any zoom level for its unclustered points ([`ClusterIndex::points_at`]) and its
//!   clusters ([`ClusterIndex::clusters_at`]).
//! - Inspect a cluster's size, centroid, and members through [`ClusterRef`].
//!
//! Level `z` groups anything within `radius · 2^(−z)`, the same halving schedule as a tile
//! pyramid: zoom 0 is the coarsest level with the widest radius.
//!
//! ## How insertion works
//!
//! A new point walks the levels from finest to coarsest and stops at the first level where
//! something is near:
//!
//! 1. a cluster: the point joins it;
//! 2. an unclustered point: the two form a new cluster at that level, with single-child
//!    nodes backfilled at every coarser level down to where the existing structure resumes.
//!
//! Levels passed on the way record the point as unclustered. A point near nothing at any
//! level is owned by the root, [`ClusterId::ROOT`].
//!
//! The index is insert-only: there is no way to remove or move a point once added.
//!
//! ## Not a renderer
//!
//! This crate does not project coordinates, style markers, or draw anything. Callers pass
//! already-projected planar positions (anything implementing [`Position`]) and read
//! clusters back out. Payloads are carried through unchanged.
//!
//! ## Integration with Understory Proximity
//!
//! Each level owns two [`understory_proximity::ProximityIndex`] grids, one for clusters
//! and one for unclustered points, with the cell size equal to that level's radius.
//!
//! # Example
//!
//! ```rust
//! use understory_cluster::{ClusterConfig, ClusterIndex};
//! use kurbo::Point;
//!
//! let mut index = ClusterIndex::new(ClusterConfig::new(1, 5.0))?;
//! index.add_point(Point::new(0.0, 0.0))?;
//! index.add_point(Point::new(0.0, 0.4))?;
//! index.add_point(Point::new(1000.0, 1000.0))?;
//!
//! assert_eq!(index.root().count(), 3);
//!
//! let clusters: Vec<_> = index.clusters_at(0.0).collect();
//! assert_eq!(clusters.len(), 1);
//! assert_eq!(clusters[0].count(), 2);
//! assert_eq!(clusters[0].centroid(), Some(Point::new(0.0, 0.2)));
//!
//! let loose: Vec<_> = index.points_at(0.0).map(|p| p.position()).collect();
//! assert_eq!(loose, [Point::new(1000.0, 1000.0)]);
//! # Ok::<(), understory_cluster::Error>(())
//! ```
//!
//! Payloads only need a position:
//!
//! ```rust
//! use understory_cluster::{ClusterConfig, ClusterIndex, Position};
//! use kurbo::Point;
//!
//! struct Marker {
//!     name: &'static str,
//!     at: Point,
//! }
//!
//! impl Position for Marker {
//!     fn position(&self) -> Point {
//!         self.at
//!     }
//! }
//!
//! let mut index = ClusterIndex::new(ClusterConfig::default())?;
//! index.add_point(Marker { name: "a", at: Point::new(3.0, 4.0) })?;
//! index.add_point(Marker { name: "b", at: Point::new(3.0, 4.1) })?;
//!
//! let mut names = Vec::new();
//! index.root().traverse(|p, _zoom| names.push(p.data().name));
//! assert_eq!(names, ["a", "b"]);
//! # Ok::<(), understory_cluster::Error>(())
//! ```
//!
//! ## Threading
//!
//! Centroids are cached lazily through interior mutability, so the index is not `Sync`.
//! Wrap it in a lock if several threads need it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod index;
mod tree;
mod types;
mod view;

pub use config::{ClusterConfig, MAX_ZOOM_LIMIT};
pub use error::{ConfigError, Error, Result};
pub use index::ClusterIndex;
pub use types::{ClusterId, Member, PointId, Position};
pub use view::{ClusterRef, PointRef};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: handles for points and clusters, and the [`Position`] trait.

use kurbo::Point;

/// Identifier of an inserted point.
///
/// Handed out by [`ClusterIndex::add_point`](crate::ClusterIndex::add_point) in insertion
/// order. Points are never removed, so an id stays valid for the life of the index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PointId(pub(crate) u32);

impl PointId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "`ClusterIndex` refuses insertions past `u32::MAX` points."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Zero-based insertion ordinal.
    pub const fn index(self) -> usize {
        self.idx()
    }
}

/// Identifier of a cluster node.
///
/// The synthetic root is [`ClusterId::ROOT`]. Nodes are only ever created, so an id
/// stays valid for the life of the index that produced it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ClusterId(pub(crate) u32);

impl ClusterId {
    /// The root node spanning the whole dataset.
    pub const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "`ClusterIndex` refuses insertions that could allocate past `u32::MAX` nodes."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A child of a cluster node: either a raw point or a nested cluster.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Member {
    /// An unclustered point owned directly by the node.
    Point(PointId),
    /// A nested cluster.
    Cluster(ClusterId),
}

/// Planar coordinates of a caller payload.
///
/// Coordinates are expected to be already projected; the index never transforms them.
pub trait Position {
    /// The planar position.
    fn position(&self) -> Point;
}

impl Position for Point {
    fn position(&self) -> Point {
        *self
    }
}

impl Position for (f64, f64) {
    fn position(&self) -> Point {
        Point::new(self.0, self.1)
    }
}

impl Position for [f64; 2] {
    fn position(&self) -> Point {
        Point::new(self[0], self[1])
    }
}

impl<T: Position + ?Sized> Position for &T {
    fn position(&self) -> Point {
        (**self).position()
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only views handed out by queries.

use alloc::vec::Vec;
use kurbo::Point;

use crate::tree::Tree;
use crate::types::{ClusterId, Member, PointId};

/// A borrowed view of one inserted point.
pub struct PointRef<'a, T> {
    tree: &'a Tree<T>,
    id: PointId,
}

impl<T> Clone for PointRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PointRef<'_, T> {}

impl<T> core::fmt::Debug for PointRef<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointRef")
            .field("id", &self.id)
            .field("position", &self.position())
            .finish_non_exhaustive()
    }
}

impl<'a, T> PointRef<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, id: PointId) -> Self {
        Self { tree, id }
    }

    /// The point's id.
    pub fn id(&self) -> PointId {
        self.id
    }

    /// The caller payload, unchanged.
    pub fn data(&self) -> &'a T {
        &self.tree.leaf(self.id).data
    }

    /// Position captured at insertion.
    pub fn position(&self) -> Point {
        self.tree.leaf(self.id).position
    }

    /// The node that directly owns this point.
    pub fn owner(&self) -> Option<ClusterId> {
        self.tree.leaf(self.id).owner
    }
}

/// A borrowed view of one cluster node.
pub struct ClusterRef<'a, T> {
    tree: &'a Tree<T>,
    id: ClusterId,
}

impl<T> Clone for ClusterRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ClusterRef<'_, T> {}

impl<T> core::fmt::Debug for ClusterRef<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClusterRef")
            .field("id", &self.id)
            .field("zoom", &self.zoom())
            .field("count", &self.count())
            .finish_non_exhaustive()
    }
}

impl<'a, T> ClusterRef<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, id: ClusterId) -> Self {
        Self { tree, id }
    }

    /// The node's id.
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Zoom at which the node was created; `-1` for the root.
    pub fn zoom(&self) -> i32 {
        self.tree.node(self.id).zoom
    }

    /// Total number of points in the subtree.
    pub fn count(&self) -> usize {
        self.tree.node(self.id).count
    }

    /// Mean position of every point in the subtree.
    ///
    /// Computed on first use after a change and cached. `None` only for an empty root.
    pub fn centroid(&self) -> Option<Point> {
        self.tree.centroid(self.id)
    }

    /// The parent node; `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let parent = self.tree.node(self.id).parent?;
        Some(Self::new(self.tree, parent))
    }

    /// Points owned directly by this node.
    pub fn points(&self) -> impl Iterator<Item = PointRef<'a, T>> + 'a {
        let tree = self.tree;
        tree.node(self.id)
            .points
            .iter()
            .map(move |&p| PointRef::new(tree, p))
    }

    /// Child clusters, in the order they were attached.
    pub fn children(&self) -> impl Iterator<Item = Self> + 'a {
        let tree = self.tree;
        tree.node(self.id)
            .children
            .iter()
            .map(move |&c| Self::new(tree, c))
    }

    /// Direct members: own points first, then child clusters.
    pub fn members(&self) -> impl Iterator<Item = Member> + 'a {
        let tree = self.tree;
        let node = tree.node(self.id);
        let points = node.points.iter().map(|&p| Member::Point(p));
        let children = node.children.iter().map(|&c| Member::Cluster(c));
        points.chain(children)
    }

    /// Call `visitor(point, zoom)` for every point in the subtree.
    ///
    /// `zoom` is the zoom of the node directly owning the point. Own points come
    /// first, then each child subtree in order.
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(PointRef<'a, T>, i32),
    {
        let tree = self.tree;
        tree.traverse(self.id, &mut |p, zoom| visitor(PointRef::new(tree, p), zoom));
    }

    /// Every point in the subtree, in traversal order.
    pub fn leaves(&self) -> Vec<PointRef<'a, T>> {
        let mut out = Vec::with_capacity(self.count());
        self.traverse(|p, _| out.push(p));
        out
    }
}

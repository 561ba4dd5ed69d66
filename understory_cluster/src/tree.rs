// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cluster tree storage: node arena, leaf points, count propagation, and the centroid cache.

use alloc::vec::Vec;
use core::cell::Cell;
use kurbo::{Point, Vec2};

use crate::types::{ClusterId, Member, PointId};

/// Zoom assigned to the synthetic root, coarser than any real level.
pub(crate) const ROOT_ZOOM: i32 = -1;

/// Cached centroid of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum CentroidCache {
    Stale,
    Valid(Point),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) zoom: i32,
    pub(crate) parent: Option<ClusterId>,
    pub(crate) points: Vec<PointId>,
    pub(crate) children: Vec<ClusterId>,
    pub(crate) count: usize,
    centroid: Cell<CentroidCache>,
}

impl Node {
    fn new(zoom: i32) -> Self {
        Self {
            zoom,
            parent: None,
            points: Vec::new(),
            children: Vec::new(),
            count: 0,
            centroid: Cell::new(CentroidCache::Stale),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Leaf<T> {
    pub(crate) data: T,
    pub(crate) position: Point,
    pub(crate) owner: Option<ClusterId>,
}

/// Arena holding every node and leaf. Slot 0 is the root.
pub(crate) struct Tree<T> {
    nodes: Vec<Node>,
    leaves: Vec<Leaf<T>>,
}

impl<T> core::fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree")
            .field("nodes", &self.nodes.len())
            .field("leaves", &self.leaves.len())
            .field("root_count", &self.nodes[ClusterId::ROOT.idx()].count)
            .finish_non_exhaustive()
    }
}

impl<T> Tree<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: alloc::vec![Node::new(ROOT_ZOOM)],
            leaves: Vec::new(),
        }
    }

    pub(crate) fn node(&self, id: ClusterId) -> &Node {
        &self.nodes[id.idx()]
    }

    pub(crate) fn leaf(&self, id: PointId) -> &Leaf<T> {
        &self.leaves[id.idx()]
    }

    pub(crate) fn get_node(&self, id: ClusterId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    pub(crate) fn get_leaf(&self, id: PointId) -> Option<&Leaf<T>> {
        self.leaves.get(id.idx())
    }

    pub(crate) fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Store a new point that no node owns yet.
    pub(crate) fn push_leaf(&mut self, data: T, position: Point) -> PointId {
        self.leaves.push(Leaf {
            data,
            position,
            owner: None,
        });
        PointId::new(self.leaves.len() - 1)
    }

    /// Allocate an empty, parentless cluster node.
    pub(crate) fn alloc(&mut self, zoom: i32) -> ClusterId {
        self.nodes.push(Node::new(zoom));
        ClusterId::new(self.nodes.len() - 1)
    }

    /// Attach `child` under `parent` and bump counts along the ancestor chain.
    pub(crate) fn add_child(&mut self, parent: ClusterId, child: Member) {
        let inc = match child {
            Member::Point(p) => {
                self.nodes[parent.idx()].points.push(p);
                self.leaves[p.idx()].owner = Some(parent);
                1
            }
            Member::Cluster(c) => {
                debug_assert!(c != parent, "a node cannot own itself");
                self.nodes[parent.idx()].children.push(c);
                self.nodes[c.idx()].parent = Some(parent);
                self.nodes[c.idx()].count
            }
        };
        self.bump(parent, inc);
    }

    /// Detach a point from its owning node, if any. Returns the former owner.
    pub(crate) fn detach_point(&mut self, point: PointId) -> Option<ClusterId> {
        let owner = self.leaves[point.idx()].owner.take()?;
        let points = &mut self.nodes[owner.idx()].points;
        if let Some(pos) = points.iter().rposition(|&p| p == point) {
            points.remove(pos);
            self.drop_count(owner, 1);
        }
        Some(owner)
    }

    fn bump(&mut self, from: ClusterId, inc: usize) {
        let mut cur = Some(from);
        while let Some(id) = cur {
            let node = &mut self.nodes[id.idx()];
            node.count += inc;
            node.centroid.set(CentroidCache::Stale);
            cur = node.parent;
        }
    }

    fn drop_count(&mut self, from: ClusterId, dec: usize) {
        let mut cur = Some(from);
        while let Some(id) = cur {
            let node = &mut self.nodes[id.idx()];
            debug_assert!(node.count >= dec, "count underflow");
            node.count = node.count.saturating_sub(dec);
            node.centroid.set(CentroidCache::Stale);
            cur = node.parent;
        }
    }

    /// Point-weighted mean of the subtree, computed lazily and cached.
    ///
    /// `None` only when the subtree holds no points.
    pub(crate) fn centroid(&self, id: ClusterId) -> Option<Point> {
        let node = &self.nodes[id.idx()];
        if let CentroidCache::Valid(p) = node.centroid.get() {
            return Some(p);
        }
        if node.count == 0 {
            return None;
        }
        let n = node.count as f64;
        let mut sum = Vec2::ZERO;
        for &p in &node.points {
            sum += self.leaves[p.idx()].position.to_vec2();
        }
        for &c in &node.children {
            if let Some(center) = self.centroid(c) {
                sum += center.to_vec2() * self.nodes[c.idx()].count as f64;
            }
        }
        let mean = sum / n;
        let center = if mean.is_finite() {
            mean.to_point()
        } else {
            self.scaled_mean(node, n)
        };
        node.centroid.set(CentroidCache::Valid(center));
        Some(center)
    }

    /// Mean accumulated from pre-weighted terms.
    ///
    /// Every term is at most the largest member coordinate, so the result stays finite
    /// for finite members even when the plain sum overflows.
    fn scaled_mean(&self, node: &Node, n: f64) -> Point {
        let mut acc = Vec2::ZERO;
        for &p in &node.points {
            acc += self.leaves[p.idx()].position.to_vec2() / n;
        }
        for &c in &node.children {
            if let Some(center) = self.centroid(c) {
                let weight = self.nodes[c.idx()].count as f64 / n;
                acc += center.to_vec2() * weight;
            }
        }
        Point::new(
            acc.x.clamp(f64::MIN, f64::MAX),
            acc.y.clamp(f64::MIN, f64::MAX),
        )
    }

    /// Visit every leaf under `id`: own points first, then child subtrees in order.
    ///
    /// The zoom passed along is that of the node directly owning the point.
    pub(crate) fn traverse<F>(&self, id: ClusterId, visitor: &mut F)
    where
        F: FnMut(PointId, i32),
    {
        let node = &self.nodes[id.idx()];
        for &p in &node.points {
            visitor(p, node.zoom);
        }
        for &c in &node.children {
            self.traverse(c, visitor);
        }
    }

    #[cfg(test)]
    pub(crate) fn centroid_is_cached(&self, id: ClusterId) -> bool {
        matches!(self.nodes[id.idx()].centroid.get(), CentroidCache::Valid(_))
    }
}

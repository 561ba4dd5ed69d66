// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The zoom pyramid: per-level proximity indexes and the insertion algorithm.

use alloc::vec::Vec;
use kurbo::Point;
use understory_proximity::ProximityIndex;

use crate::config::ClusterConfig;
use crate::error::{Error, Result};
use crate::tree::Tree;
use crate::types::{ClusterId, Member, PointId, Position};
use crate::view::{ClusterRef, PointRef};

/// Proximity indexes for one zoom level.
#[derive(Debug)]
struct Level {
    clusters: ProximityIndex<ClusterId>,
    points: ProximityIndex<PointId>,
}

impl Level {
    fn new(radius: f64) -> Self {
        Self {
            clusters: ProximityIndex::new(radius),
            points: ProximityIndex::new(radius),
        }
    }
}

/// Incremental hierarchical clustering over zoom levels `0..=max_zoom`.
///
/// Every inserted point ends up in the cluster tree rooted at [`ClusterId::ROOT`],
/// and every level can be asked for its unclustered points and its clusters.
/// The index is insert-only.
pub struct ClusterIndex<T> {
    config: ClusterConfig,
    levels: Vec<Level>,
    tree: Tree<T>,
}

impl<T> core::fmt::Debug for ClusterIndex<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClusterIndex")
            .field("config", &self.config)
            .field("levels", &self.levels.len())
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

impl<T: Position> ClusterIndex<T> {
    /// Create an empty index, allocating both proximity indexes for every level.
    pub fn new(config: ClusterConfig) -> Result<Self> {
        config.validate()?;
        let levels = (0..=config.max_zoom)
            .map(|z| Level::new(config.radius_at(z)))
            .collect();
        log::debug!(
            "cluster index: {} levels, radius {} at zoom 0, {} at zoom {}",
            config.max_zoom + 1,
            config.radius,
            config.radius_at(config.max_zoom),
            config.max_zoom
        );
        Ok(Self {
            config,
            levels,
            tree: Tree::new(),
        })
    }

    /// Insert a point.
    ///
    /// Levels are scanned from finest to coarsest. At the first level where the
    /// point is near an existing cluster it joins that cluster; where it is near an
    /// unclustered point the two form a new cluster. Levels passed on the way down
    /// record the point as unclustered. A point near nothing at any level is owned
    /// by the root.
    ///
    /// Fails without touching the index if a coordinate is not finite, or if the
    /// index has run out of ids.
    pub fn add_point(&mut self, data: T) -> Result<PointId> {
        let pos = checked_position(&data)?;
        self.check_room(1)?;
        let id = self.tree.push_leaf(data, pos);
        for zoom in (0..=self.config.max_zoom).rev() {
            let level = &mut self.levels[zoom as usize];
            if let Some((_, cluster)) = level.clusters.nearest_within(pos.x, pos.y) {
                log::trace!("{id:?} joins {cluster:?} at zoom {zoom}");
                self.tree.add_child(cluster, Member::Point(id));
                return Ok(id);
            }
            if let Some((_, existing)) = level.points.nearest_within(pos.x, pos.y) {
                self.merge(zoom, existing, id);
                return Ok(id);
            }
            log::trace!("{id:?} unclustered at zoom {zoom}");
            level.points.insert(pos.x, pos.y, id);
        }
        log::trace!("{id:?} isolated at every zoom");
        self.tree.add_child(ClusterId::ROOT, Member::Point(id));
        Ok(id)
    }

    /// Insert a batch of points one at a time.
    ///
    /// Every point is checked before any is inserted, so a bad coordinate anywhere
    /// leaves the index untouched. Returns the ids in input order.
    pub fn add_points<I>(&mut self, points: I) -> Result<Vec<PointId>>
    where
        I: IntoIterator<Item = T>,
    {
        let points: Vec<T> = points.into_iter().collect();
        for p in &points {
            checked_position(p)?;
        }
        self.check_room(points.len())?;
        points.into_iter().map(|p| self.add_point(p)).collect()
    }
}

impl<T> ClusterIndex<T> {
    /// Fail if inserting `incoming` more points could exhaust the id space.
    fn check_room(&self, incoming: usize) -> Result<()> {
        if has_room(
            self.tree.leaf_count(),
            self.tree.node_count(),
            incoming,
            self.levels.len(),
        ) {
            Ok(())
        } else {
            Err(Error::CapacityExceeded)
        }
    }

    /// Form a cluster at `zoom` from `existing` and the incoming point.
    fn merge(&mut self, zoom: u32, existing: PointId, incoming: PointId) {
        let former_owner = self.tree.detach_point(existing);

        let cluster = self.register_cluster(
            zoom,
            &[Member::Point(existing), Member::Point(incoming)],
        );
        let mut top = cluster;
        match former_owner {
            Some(owner) => {
                // One single-child node per level between the new cluster and the
                // former owner, so no level misses the subtree.
                let floor = self.tree.node(owner).zoom;
                for z in (0..zoom).rev() {
                    if zoom_i32(z) <= floor {
                        break;
                    }
                    top = self.register_cluster(z, &[Member::Cluster(top)]);
                }
                self.tree.add_child(owner, Member::Cluster(top));
            }
            None => {
                log::warn!(
                    "{existing:?} had no owner when merged at zoom {zoom}; attaching to root"
                );
                self.tree.add_child(ClusterId::ROOT, Member::Cluster(top));
            }
        }
        log::debug!("{existing:?} + {incoming:?} -> {cluster:?} at zoom {zoom}, chain top {top:?}");

        // `existing` is now represented by the new chain at this level and every
        // coarser one it had been recorded at.
        let pos = self.tree.leaf(existing).position;
        for z in (0..=zoom).rev() {
            if !self.levels[z as usize].points.remove_object(pos.x, pos.y, existing) {
                break;
            }
        }
    }

    /// Allocate a node at `zoom`, attach `members`, and index it at its centroid.
    fn register_cluster(&mut self, zoom: u32, members: &[Member]) -> ClusterId {
        let id = self.tree.alloc(zoom_i32(zoom));
        for &m in members {
            self.tree.add_child(id, m);
        }
        if let Some(center) = self.tree.centroid(id) {
            self.levels[zoom as usize]
                .clusters
                .insert(center.x, center.y, id);
        }
        id
    }

    /// The configuration this index was built with.
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Finest zoom level maintained.
    pub fn max_zoom(&self) -> u32 {
        self.config.max_zoom
    }

    /// Number of points inserted.
    pub fn len(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Whether no points have been inserted.
    pub fn is_empty(&self) -> bool {
        self.tree.leaf_count() == 0
    }

    /// Number of cluster nodes, including the root.
    pub fn cluster_count(&self) -> usize {
        self.tree.node_count()
    }

    /// The root node spanning the whole dataset.
    pub fn root(&self) -> ClusterRef<'_, T> {
        ClusterRef::new(&self.tree, ClusterId::ROOT)
    }

    /// Look up a cluster by id.
    pub fn cluster(&self, id: ClusterId) -> Option<ClusterRef<'_, T>> {
        self.tree.get_node(id)?;
        Some(ClusterRef::new(&self.tree, id))
    }

    /// Look up a point by id.
    pub fn point(&self, id: PointId) -> Option<PointRef<'_, T>> {
        self.tree.get_leaf(id)?;
        Some(PointRef::new(&self.tree, id))
    }

    /// Map any zoom to a queryable level.
    ///
    /// The zoom is floored and clamped to `[0, max_zoom - 1]` (to `0` when
    /// `max_zoom` is `0`). NaN maps to `0`.
    pub fn level_for(&self, zoom: f64) -> u32 {
        let top = self.config.max_zoom.saturating_sub(1);
        if zoom.is_nan() || zoom <= 0.0 {
            return 0;
        }
        if zoom >= f64::from(top) {
            return top;
        }
        let mut level = 0;
        while f64::from(level + 1) <= zoom {
            level += 1;
        }
        level
    }

    /// Unclustered points at `zoom`, in the order they were recorded.
    pub fn points_at(&self, zoom: f64) -> impl Iterator<Item = PointRef<'_, T>> + '_ {
        let level = &self.levels[self.level_for(zoom) as usize];
        level
            .points
            .contents()
            .map(|(_, id)| PointRef::new(&self.tree, id))
    }

    /// Clusters at `zoom`, in the order they were created.
    pub fn clusters_at(&self, zoom: f64) -> impl Iterator<Item = ClusterRef<'_, T>> + '_ {
        let level = &self.levels[self.level_for(zoom) as usize];
        level
            .clusters
            .contents()
            .map(|(_, id)| ClusterRef::new(&self.tree, id))
    }
}

fn checked_position<T: Position>(data: &T) -> Result<Point> {
    let pos = data.position();
    if pos.x.is_finite() && pos.y.is_finite() {
        Ok(pos)
    } else {
        Err(Error::InvalidPoint { x: pos.x, y: pos.y })
    }
}

/// Largest number of points or cluster nodes an index can hold.
const ID_LIMIT: usize = u32::MAX as usize;

/// Whether `incoming` points fit. One insertion creates at most one node per level.
fn has_room(leaves: usize, nodes: usize, incoming: usize, levels: usize) -> bool {
    let leaves_ok = leaves.checked_add(incoming).is_some_and(|n| n <= ID_LIMIT);
    let nodes_ok = incoming
        .checked_mul(levels)
        .and_then(|n| n.checked_add(nodes))
        .is_some_and(|n| n <= ID_LIMIT);
    leaves_ok && nodes_ok
}

#[allow(
    clippy::cast_possible_wrap,
    reason = "Zoom is bounded by MAX_ZOOM_LIMIT."
)]
fn zoom_i32(zoom: u32) -> i32 {
    zoom as i32
}

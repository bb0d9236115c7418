//! Density hotspots over a built quadtree.
//!
//! Dense areas subdivide deeper, so a connected group of nodes at a deep
//! level marks a hotspot. The finder scans levels from the deepest one
//! reached upward, clusters the nodes of each level by edge adjacency and
//! ranks clusters by member count.
//!
//! ```rust
//! use hotquad::{HotspotFinder, Quadtree};
//!
//! let mut tree = Quadtree::with_params(0.0, 0.0, 16.0, 16.0, 1, 10)?;
//! for (x, y) in [(1.0, 1.0), (3.0, 3.0), (5.0, 1.0), (7.0, 3.0)] {
//!     tree.insert(x, y)?;
//! }
//!
//! let hotspots = HotspotFinder::new(&tree).find(1);
//! assert_eq!(hotspots[0].len(), 8);
//! assert_eq!(hotspots[0].depth(), 3);
//! # Ok::<(), hotquad::HotquadError>(())
//! ```

use crate::tree::{NodeId, Quadtree};
use hotquad_types::bbox::BoundingBox;
use hotquad_types::geometry::NodeGeometry;
use hotquad_types::point::Point;
use hotquad_types::quadrant::Direction;
use rustc_hash::FxHashSet;

/// Edge-connected nodes sharing one depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    depth: u32,
    nodes: Vec<NodeId>,
}

impl Cluster {
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Member ids in discovery order, starting with the seed node.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn geometries(&self, tree: &Quadtree) -> Vec<NodeGeometry> {
        self.nodes
            .iter()
            .map(|&id| NodeGeometry::from(tree[id].bounds()))
            .collect()
    }

    /// Sum of the points stored in member leaves and their descendants.
    pub fn point_count(&self, tree: &Quadtree) -> usize {
        self.nodes
            .iter()
            .map(|&id| tree.query(tree[id].bounds()).len())
            .sum()
    }

    /// Smallest box covering every member.
    pub fn envelope(&self, tree: &Quadtree) -> Option<BoundingBox> {
        let mut members = self.nodes.iter().map(|&id| tree[id].bounds());
        let first = members.next()?;
        let (mut min_x, mut min_y) = (first.min_x(), first.min_y());
        let (mut max_x, mut max_y) = (first.max_x(), first.max_y());
        for bounds in members {
            min_x = min_x.min(bounds.min_x());
            min_y = min_y.min(bounds.min_y());
            max_x = max_x.max(bounds.max_x());
            max_y = max_y.max(bounds.max_y());
        }
        Some(BoundingBox::from_corners(
            Point::new(min_x, min_y),
            Point::new(max_x, max_y),
            self.depth,
        ))
    }
}

/// Ranks same-depth clusters of a tree, finest levels first.
pub struct HotspotFinder<'a> {
    tree: &'a Quadtree,
}

impl<'a> HotspotFinder<'a> {
    pub fn new(tree: &'a Quadtree) -> Self {
        Self { tree }
    }

    /// Collect up to `target_count` clusters.
    ///
    /// Levels are visited from [`Quadtree::max_depth_reached`] down to the
    /// root. Within a level clusters are appended largest first until the
    /// level runs out or the target is met.
    pub fn find(&self, target_count: usize) -> Vec<Cluster> {
        let mut ranked = Vec::new();

        for level in (0..=self.tree.max_depth_reached()).rev() {
            if ranked.len() >= target_count {
                break;
            }

            let clusters = self.clusters_at(level);
            log::debug!("Level {}: {} clusters", level, clusters.len());

            let wanted = target_count - ranked.len();
            ranked.extend(clusters.into_iter().take(wanted));
        }

        ranked
    }

    /// All clusters at `level`, sorted by descending size.
    ///
    /// Ties keep the pre-order position of each cluster's first node.
    pub fn clusters_at(&self, level: u32) -> Vec<Cluster> {
        let members = self.tree.nodes_at_depth(level);
        let mut unclaimed: FxHashSet<NodeId> = members.iter().copied().collect();
        let mut clusters = Vec::new();

        for &seed in &members {
            if !unclaimed.remove(&seed) {
                continue;
            }
            clusters.push(Cluster {
                depth: level,
                nodes: self.flood(seed, &mut unclaimed),
            });
        }

        clusters.sort_by(|a, b| b.len().cmp(&a.len()));
        clusters
    }

    /// Gather everything reachable from `seed` through unclaimed neighbors.
    fn flood(&self, seed: NodeId, unclaimed: &mut FxHashSet<NodeId>) -> Vec<NodeId> {
        let mut nodes = vec![seed];
        let mut pending = vec![seed];

        while let Some(id) = pending.pop() {
            for direction in Direction::ALL {
                if let Some(next) = self.tree.neighbor(id, direction)
                    && unclaimed.remove(&next)
                {
                    nodes.push(next);
                    pending.push(next);
                }
            }
        }

        nodes
    }
}

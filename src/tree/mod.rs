//! Point-region quadtree backed by a node arena.
//!
//! Every node owns an axis-aligned region. Leaves keep a bucket of points;
//! once a leaf holds `leaf_capacity` points the next insert splits it into
//! four quadrants and pushes the bucket down. At `max_depth` no further
//! splitting happens and buckets grow without bound.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`], so the parent
//! links needed for neighbor lookups do not form ownership cycles.
//!
//! ```rust
//! use hotquad::Quadtree;
//!
//! let mut tree = Quadtree::builder()
//!     .region(0.0, 0.0, 100.0, 100.0)
//!     .leaf_capacity(1)
//!     .max_depth(5)
//!     .build()?;
//!
//! for (x, y) in [(10.0, 10.0), (90.0, 10.0), (10.0, 90.0), (90.0, 90.0), (95.0, 95.0)] {
//!     assert!(tree.insert(x, y)?);
//! }
//!
//! let corner = tree.query_range(85.0, 85.0, 15.0, 15.0);
//! assert_eq!(corner.len(), 2);
//! # Ok::<(), hotquad::HotquadError>(())
//! ```

mod neighbor;
mod node;
mod traversal;


pub use node::{Bucket, Node, NodeId, NodeKind};
pub use traversal::PreOrder;

use crate::builder::QuadtreeBuilder;
use crate::config::{Config, Region};
use crate::error::{HotquadError, Result};
use geo::Rect;
use hotquad_types::bbox::BoundingBox;
use hotquad_types::point::Point;
use hotquad_types::quadrant::Quadrant;
use std::mem;
use std::ops::Index;

#[derive(Debug, Clone)]
pub struct Quadtree {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: NodeId,
    leaf_capacity: usize,
    max_depth: u32,
    max_depth_reached: u32,
    len: usize,
}

impl Quadtree {
    /// Create a tree over the given region with the default leaf capacity (4)
    /// and max depth (20).
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        Self::from_config(&Config::new(Region::new(x, y, width, height)))
    }

    pub fn with_params(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        leaf_capacity: usize,
        max_depth: u32,
    ) -> Result<Self> {
        let config = Config {
            region: Region::new(x, y, width, height),
            leaf_capacity,
            max_depth,
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate().map_err(HotquadError::InvalidConfig)?;

        Ok(Self {
            nodes: vec![Some(Node::leaf(config.region.to_bounds(), None))],
            free: Vec::new(),
            root: NodeId(0),
            leaf_capacity: config.leaf_capacity,
            max_depth: config.max_depth,
            max_depth_reached: 0,
            len: 0,
        })
    }

    pub fn builder() -> QuadtreeBuilder {
        QuadtreeBuilder::new()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Region covered by the tree.
    pub fn bounds(&self) -> &BoundingBox {
        &self[self.root].bounds
    }

    pub fn leaf_capacity(&self) -> usize {
        self.leaf_capacity
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Deepest level any subdivision has created so far.
    ///
    /// Merges do not lower this value.
    pub fn max_depth_reached(&self) -> u32 {
        self.max_depth_reached
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes, internal and leaf.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.pre_order().filter(|(_, node)| node.is_leaf()).count()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    /// Insert the point `(x, y)`.
    ///
    /// Returns `Ok(false)` when the point lies outside the tree or is already
    /// stored. An error means the tree's partitioning is broken.
    pub fn insert(&mut self, x: f64, y: f64) -> Result<bool> {
        self.insert_point(Point::new(x, y))
    }

    pub fn insert_point(&mut self, point: impl Into<Point>) -> Result<bool> {
        let point = point.into();
        if !self.bounds().contains(&point) {
            log::trace!("Rejecting {} outside of {}", point, self.bounds());
            return Ok(false);
        }

        let inserted = self.insert_at(self.root, point)?;
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    fn insert_at(&mut self, id: NodeId, point: Point) -> Result<bool> {
        let leaf_capacity = self.leaf_capacity;
        let max_depth = self.max_depth;

        let node = self.node_mut(id);
        if !node.bounds.contains(&point) {
            return Ok(false);
        }

        let depth = node.depth();
        if let NodeKind::Leaf(bucket) = &mut node.kind {
            if bucket.contains(&point) {
                log::trace!("Rejecting duplicate {}", point);
                return Ok(false);
            }
            if depth >= max_depth || bucket.len() < leaf_capacity {
                bucket.push(point);
                return Ok(true);
            }
            self.subdivide(id, point)?;
        }

        self.insert_into_children(id, point)
    }

    /// Split a leaf into four child leaves and push its bucket down.
    ///
    /// The leaf is left untouched unless every stored point and `incoming`
    /// fall inside one of the new quadrants.
    fn subdivide(&mut self, id: NodeId, incoming: Point) -> Result<()> {
        let node = &self[id];
        let NodeKind::Leaf(bucket) = &node.kind else {
            return Ok(());
        };

        let bounds = node.bounds;
        let quadrants = bounds.quadrants();
        let stray = bucket
            .iter()
            .chain(std::iter::once(&incoming))
            .find(|point| !quadrants.iter().any(|child| child.contains(point)));
        if let Some(point) = stray {
            return Err(HotquadError::PartitionInvariant {
                x: point.x,
                y: point.y,
                depth: bounds.depth,
            });
        }

        let children = quadrants.map(|child| self.alloc(Node::leaf(child, Some(id))));

        let points = match mem::replace(&mut self.node_mut(id).kind, NodeKind::Internal(children)) {
            NodeKind::Leaf(points) => points,
            NodeKind::Internal(_) => Bucket::new(),
        };

        self.max_depth_reached = self.max_depth_reached.max(bounds.depth + 1);
        log::debug!(
            "Subdivided depth {} node at {} ({} points)",
            bounds.depth,
            bounds.min,
            points.len()
        );

        for point in points {
            self.insert_into_children(id, point)?;
        }
        Ok(())
    }

    fn insert_into_children(&mut self, id: NodeId, point: Point) -> Result<bool> {
        let node = &self[id];
        let Some(children) = node.children() else {
            return Ok(false);
        };

        // Quadrants are disjoint, so at most one child can claim the point.
        let owner = children
            .iter()
            .copied()
            .find(|&child| self[child].bounds.contains(&point));
        let depth = node.depth();

        match owner {
            Some(child) => self.insert_at(child, point),
            None => Err(HotquadError::PartitionInvariant {
                x: point.x,
                y: point.y,
                depth,
            }),
        }
    }

    /// Remove the point `(x, y)`, returning whether it was stored.
    ///
    /// A successful removal may merge the emptied leaf's parent back into a
    /// single leaf. Only that one level is collapsed: ancestors further up
    /// the path are not re-checked even when the merge leaves them
    /// collapsible, as a recursive removal would do. Run
    /// [`Quadtree::compact`] for that multi-level collapse.
    pub fn remove(&mut self, x: f64, y: f64) -> bool {
        self.remove_point(Point::new(x, y))
    }

    pub fn remove_point(&mut self, point: impl Into<Point>) -> bool {
        let point = point.into();
        let Some(leaf) = self.leaf_containing(&point) else {
            return false;
        };

        let removed = match &mut self.node_mut(leaf).kind {
            NodeKind::Leaf(bucket) => match bucket.iter().position(|p| *p == point) {
                Some(index) => {
                    bucket.remove(index);
                    true
                }
                None => false,
            },
            NodeKind::Internal(_) => false,
        };
        if !removed {
            return false;
        }

        self.len -= 1;
        if let Some(parent) = self[leaf].parent {
            self.try_merge(parent);
        }
        true
    }

    /// Collapse `id` into a leaf if all four children are leaves holding
    /// fewer than `leaf_capacity` points in total.
    fn try_merge(&mut self, id: NodeId) -> bool {
        let Some(&children) = self[id].children() else {
            return false;
        };
        if !children.iter().all(|&child| self[child].is_leaf()) {
            return false;
        }

        let total: usize = children.iter().map(|&child| self[child].len()).sum();
        if self[id].len() + total >= self.leaf_capacity {
            return false;
        }

        let mut bucket = Bucket::with_capacity(total);
        for child in children {
            if let Some(Node {
                kind: NodeKind::Leaf(points),
                ..
            }) = self.release(child)
            {
                bucket.extend(points);
            }
        }

        let node = self.node_mut(id);
        node.kind = NodeKind::Leaf(bucket);
        log::debug!(
            "Merged {} points into depth {} node at {}",
            total,
            node.depth(),
            node.bounds.min
        );
        true
    }

    /// Merge every collapsible subtree, deepest first.
    ///
    /// Returns the number of merges performed.
    pub fn compact(&mut self) -> usize {
        let merges = self.compact_at(self.root);
        if merges > 0 {
            log::debug!("Compaction performed {} merges", merges);
        }
        merges
    }

    fn compact_at(&mut self, id: NodeId) -> usize {
        let Some(&children) = self[id].children() else {
            return 0;
        };
        let merged: usize = children.iter().map(|&child| self.compact_at(child)).sum();
        merged + usize::from(self.try_merge(id))
    }

    /// Points inside the half-open rectangle anchored at `(x, y)`.
    pub fn query_range(&self, x: f64, y: f64, width: f64, height: f64) -> Vec<Point> {
        self.query(&BoundingBox::new(x, y, width, height))
    }

    pub fn query(&self, range: &BoundingBox) -> Vec<Point> {
        let mut found = Vec::new();
        self.collect_range(self.root, range, &mut found);
        found
    }

    /// Same as [`Quadtree::query`] for a `geo` rectangle. The rectangle's max
    /// edges are excluded as well.
    pub fn query_rect(&self, rect: &Rect) -> Vec<Point> {
        self.query(&BoundingBox::from(*rect))
    }

    fn collect_range(&self, id: NodeId, range: &BoundingBox, found: &mut Vec<Point>) {
        let node = &self[id];
        if !node.bounds.intersects(range) {
            return;
        }

        match &node.kind {
            NodeKind::Leaf(bucket) => {
                found.extend(bucket.iter().copied().filter(|p| range.contains(p)));
            }
            NodeKind::Internal(children) => {
                for &child in children {
                    self.collect_range(child, range, found);
                }
            }
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        self.leaf_containing(&point)
            .is_some_and(|leaf| self[leaf].points().contains(&point))
    }

    /// The leaf whose region holds `point`, if it lies inside the tree.
    pub fn leaf_containing(&self, point: &Point) -> Option<NodeId> {
        if !self.bounds().contains(point) {
            return None;
        }

        let mut current = self.root;
        while let Some(children) = self[current].children() {
            current = children
                .iter()
                .copied()
                .find(|&child| self[child].bounds.contains(point))?;
        }
        Some(current)
    }

    /// Which slot `id` occupies in its parent, found by comparing ids.
    pub fn location(&self, id: NodeId) -> Option<Quadrant> {
        let parent = self[id].parent?;
        let children = self[parent].children()?;
        Quadrant::ALL
            .into_iter()
            .find(|quadrant| children[quadrant.index()] == id)
    }

    /// Nodes at exactly `depth`, in pre-order. Shallower leaves are skipped.
    pub fn nodes_at_depth(&self, depth: u32) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_depth(self.root, depth, &mut found);
        found
    }

    fn collect_depth(&self, id: NodeId, depth: u32, found: &mut Vec<NodeId>) {
        let node = &self[id];
        if node.depth() == depth {
            found.push(id);
            return;
        }
        if let Some(children) = node.children() {
            for &child in children {
                self.collect_depth(child, depth, found);
            }
        }
    }

    /// Every stored point, leaf by leaf in pre-order.
    pub fn points(&self) -> Vec<Point> {
        self.pre_order()
            .flat_map(|(_, node)| node.points().iter().copied())
            .collect()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.get_mut(id.0)?.take()?;
        self.free.push(id);
        Some(node)
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.0).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("node {:?} is not part of this tree", id),
        }
    }
}

impl Index<NodeId> for Quadtree {
    type Output = Node;

    /// Panics if `id` does not refer to a live node of this tree.
    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {:?} is not part of this tree", id),
        }
    }
}

//! Directional neighbor lookup.
//!
//! A neighbor is found by walking up until the boundary in the requested
//! direction is shared with a sibling, then walking back down along the
//! mirrored path. The result is the adjacent node at the same depth when one
//! exists, otherwise the smallest larger node covering that edge.

use super::{NodeId, Quadtree};
use hotquad_types::quadrant::Direction;

impl Quadtree {
    /// The node adjacent to `id` across its edge in `direction`.
    ///
    /// Returns `None` at the tree boundary and for the root.
    pub fn neighbor(&self, id: NodeId, direction: Direction) -> Option<NodeId> {
        let parent = self[id].parent?;
        let location = self.location(id)?;
        let mirrored = location.mirror(direction);

        if !location.faces(direction) {
            return self[parent].child(mirrored);
        }

        let candidate = self.neighbor(parent, direction)?;
        let node = &self[candidate];
        if node.is_leaf() {
            Some(candidate)
        } else {
            node.child(mirrored)
        }
    }

    pub fn north_neighbor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbor(id, Direction::North)
    }

    pub fn east_neighbor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbor(id, Direction::East)
    }

    pub fn south_neighbor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbor(id, Direction::South)
    }

    pub fn west_neighbor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbor(id, Direction::West)
    }

    /// Neighbors in `[N, E, S, W]` order.
    pub fn neighbors(&self, id: NodeId) -> [Option<NodeId>; 4] {
        Direction::ALL.map(|direction| self.neighbor(id, direction))
    }
}

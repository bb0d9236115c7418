use hotquad_types::bbox::BoundingBox;
use hotquad_types::point::Point;
use hotquad_types::quadrant::Quadrant;
use smallvec::SmallVec;

/// Points stored at a leaf. Sized for the default leaf capacity.
pub type Bucket = SmallVec<[Point; 4]>;

/// Handle to a node inside a [`Quadtree`](super::Quadtree) arena.
///
/// Ids are only meaningful for the tree that produced them. Slots are
/// recycled after a merge, so an id kept across a `remove` may later refer
/// to a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Leaf or subdivided, never both.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Leaf(Bucket),
    /// Children in `[NW, NE, SW, SE]` order.
    Internal([NodeId; 4]),
}

/// One region of the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) bounds: BoundingBox,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn leaf(bounds: BoundingBox, parent: Option<NodeId>) -> Self {
        Self {
            bounds,
            parent,
            kind: NodeKind::Leaf(Bucket::new()),
        }
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn depth(&self) -> u32 {
        self.bounds.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Points held directly by this node; always empty for internal nodes.
    pub fn points(&self) -> &[Point] {
        match &self.kind {
            NodeKind::Leaf(bucket) => bucket.as_slice(),
            NodeKind::Internal(_) => &[],
        }
    }

    /// Number of points held directly by this node.
    pub fn len(&self) -> usize {
        self.points().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    pub fn children(&self) -> Option<&[NodeId; 4]> {
        match &self.kind {
            NodeKind::Internal(children) => Some(children),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children().map(|children| children[quadrant.index()])
    }
}

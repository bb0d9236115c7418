use super::{Node, NodeId, Quadtree};

/// Depth-first iterator yielding each node before its children, children in
/// `[NW, NE, SW, SE]` order.
pub struct PreOrder<'a> {
    tree: &'a Quadtree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree[id];
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev().copied());
        }
        Some((id, node))
    }
}

impl Quadtree {
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root()],
        }
    }
}

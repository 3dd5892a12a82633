// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flattened display tree: a build-once arena of display nodes.

use alloc::vec;
use alloc::vec::Vec;

use crate::node::{DisplayNode, NodeId};

#[derive(Clone, Debug)]
struct Node {
    payload: DisplayNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A strict parent→children tree over [`DisplayNode`]s.
///
/// Built top-to-bottom by [`build_tree`](crate::build_tree) and immutable
/// afterwards. Every node appears exactly once even when the underlying
/// union is reachable via multiple graph paths; repeated reachability shows
/// up as a [`dup`](DisplayNode::dup) annotation, never as a second edge.
/// Ids are assigned in build order.
#[derive(Clone, Debug)]
pub struct FlatTree {
    nodes: Vec<Node>,
}

impl FlatTree {
    /// Create a tree containing only the root.
    pub(crate) fn with_root(payload: DisplayNode) -> Self {
        Self {
            nodes: vec![Node {
                payload,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Attach a new node under `parent`, returning its id.
    pub(crate) fn insert(&mut self, parent: NodeId, payload: DisplayNode) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design"
        )]
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            payload,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.node_entry_mut(parent).children.push(id);
        id
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Access a node's payload; panics on an id from another tree.
    pub fn node(&self, id: NodeId) -> &DisplayNode {
        &self.node_entry(id).payload
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut DisplayNode {
        &mut self.node_entry_mut(id).payload
    }

    /// Children of a node, in attach order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node_entry(id).children
    }

    /// Parent of a node, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_entry(id).parent
    }

    /// Whether a node has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node_entry(id).children.is_empty()
    }

    /// Number of nodes in the tree (always at least 1).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a tree has at least its root. Present for API shape.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate all node ids in build order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design"
        )]
        let len = self.nodes.len() as u32;
        (0..len).map(NodeId)
    }

    /// Iterate node ids in pre-order (parent before children, siblings in
    /// attach order). Depth is non-decreasing along any root→leaf path, which
    /// is what the router's generation-line counter relies on.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    fn node_entry(&self, id: NodeId) -> &Node {
        self.nodes.get(id.index()).expect("dangling NodeId")
    }

    fn node_entry_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes.get_mut(id.index()).expect("dangling NodeId")
    }
}

/// Pre-order traversal over a [`FlatTree`].
#[derive(Debug)]
pub struct PreOrder<'a> {
    tree: &'a FlatTree,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Reverse so children come off the stack in attach order.
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf() -> DisplayNode {
        DisplayNode::Pseudo
    }

    #[test]
    fn insert_links_parent_and_children() {
        let mut t = FlatTree::with_root(leaf());
        let root = t.root();
        let a = t.insert(root, leaf());
        let b = t.insert(root, leaf());
        let c = t.insert(a, leaf());

        assert_eq!(t.children(root), &[a, b]);
        assert_eq!(t.parent(a), Some(root));
        assert_eq!(t.parent(root), None);
        assert!(t.is_leaf(b));
        assert!(!t.is_leaf(a));
        assert_eq!(t.children(a), &[c]);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn pre_order_visits_parent_before_children() {
        // root -> [a -> [c, d], b]
        let mut t = FlatTree::with_root(leaf());
        let root = t.root();
        let a = t.insert(root, leaf());
        let b = t.insert(root, leaf());
        let c = t.insert(a, leaf());
        let d = t.insert(a, leaf());

        let order: Vec<NodeId> = t.pre_order().collect();
        assert_eq!(order, vec![root, a, c, d, b]);
    }
}

// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graph-to-tree flattener.
//!
//! Walks the family graph top-down from a root person and produces a
//! [`FlatTree`]. Two mechanisms keep the walk finite and faithful:
//!
//! - A registry of expanded union ids, local to one build. The first node to
//!   reach a union expands its children; every later node reaching the same
//!   union becomes a leaf with a [`dup`](crate::DisplayNode::dup)
//!   back-reference to the registered representative. The registry only
//!   grows, which is the sole termination guarantee against convergent
//!   lineages.
//! - An explicit generation depth threaded through every call. The bound is
//!   checked before descending into a generation, never mid-loop, so a
//!   truncated generation is always a complete sibling set.

use arbor_model::{FamilyGraph, PersonId, UnionId};
use hashbrown::HashMap;

use crate::config::{ChartConfig, TextMeasure};
use crate::factory::NodeFactory;
use crate::node::{DisplayNode, NodeId, PersonFlags};
use crate::tree::FlatTree;

/// Flatten the graph reachable from `root` into a display tree.
///
/// A root with zero or one marriages becomes the tree root itself (a person
/// or union node); a root with two or more marriages hangs its fan-out under
/// a non-drawable pseudo root so the tree stays single-rooted. The result is
/// a pure function of the inputs: building twice yields structurally
/// identical trees.
pub fn build_tree<M: TextMeasure>(
    graph: &FamilyGraph,
    root: PersonId,
    config: &ChartConfig,
    measure: &M,
) -> FlatTree {
    let factory = NodeFactory::new(config, measure);
    let mut builder = Builder {
        graph,
        factory,
        expanded: HashMap::new(),
        max_depth: config.max_depth,
        tree: None,
    };
    builder.build(root)
}

struct Builder<'a, M: TextMeasure> {
    graph: &'a FamilyGraph,
    factory: NodeFactory<'a, M>,
    /// union id → first node built for it.
    expanded: HashMap<UnionId, NodeId>,
    max_depth: u32,
    tree: Option<FlatTree>,
}

impl<M: TextMeasure> Builder<'_, M> {
    fn build(&mut self, root: PersonId) -> FlatTree {
        match self.graph.person(root).spouse_in.len() {
            0 | 1 => {
                let payload = self.make_node(root, 1);
                self.tree = Some(FlatTree::with_root(payload));
                let root_id = self.tree().root();
                self.grow_union(root_id, 1);
            }
            _ => {
                // Multi-marriage at the root: anchor the fan-out under a
                // pseudo node so the tree has a single root.
                self.tree = Some(FlatTree::with_root(self.factory.pseudo()));
                let root_id = self.tree().root();
                self.multi_marriage(root_id, root, 1);
            }
        }
        self.tree.take().expect("tree was just built")
    }

    /// Person with no marriage → person node; otherwise a union node for the
    /// first marriage, husband-left/wife-right, lineal flag on whichever
    /// slot is `who`.
    fn make_node(&self, who: PersonId, depth: u32) -> DisplayNode {
        let marriages = &self.graph.person(who).spouse_in;
        let Some(&union_id) = marriages.first() else {
            return self
                .factory
                .person(self.graph, Some(who), depth, PersonFlags::REAL | PersonFlags::LINEAL);
        };

        let union = self.graph.union(union_id);
        let flags_for = |slot: Option<PersonId>| {
            if slot == Some(who) {
                PersonFlags::REAL | PersonFlags::LINEAL
            } else {
                PersonFlags::REAL
            }
        };
        let p1 = self.factory.cell(self.graph, union.husband, flags_for(union.husband));
        let p2 = self.factory.cell(self.graph, union.wife, flags_for(union.wife));
        self.factory.union(p1, p2, union_id, depth)
    }

    /// Descend from a union node: dedup, then expand its children one
    /// generation deeper.
    fn grow_union(&mut self, id: NodeId, depth: u32) {
        let DisplayNode::Union(u) = self.tree().node(id) else {
            // Person leaf (no spouse, no children): nothing to grow.
            return;
        };
        let union_id = u.union_id;

        // Already expanded elsewhere: link to the previous node and do NOT
        // add children.
        if let Some(&prior) = self.expanded.get(&union_id) {
            self.set_dup(id, prior);
            return;
        }
        self.expanded.insert(union_id, id);

        if depth >= self.max_depth {
            return;
        }
        let children = self.graph.union(union_id).children.clone();
        for child in children {
            self.grow_child(id, child, depth + 1);
        }
    }

    /// Attach one child of a union at `depth`, dispatching on its marriage
    /// count.
    fn grow_child(&mut self, parent: NodeId, who: PersonId, depth: u32) {
        match self.graph.person(who).spouse_in.len() {
            0 | 1 => {
                let payload = self.make_node(who, depth);
                let id = self.tree_mut().insert(parent, payload);
                self.grow_union(id, depth);
            }
            _ => self.multi_marriage(parent, who, depth),
        }
    }

    /// A person with multiple marriages: one real, lineal person node plus
    /// one placeholder node per married-in spouse, all attached to `parent`
    /// so the layout reserves space for the fan-out.
    fn multi_marriage(&mut self, parent: NodeId, who: PersonId, depth: u32) {
        let payload =
            self.factory
                .person(self.graph, Some(who), depth, PersonFlags::REAL | PersonFlags::LINEAL);
        let primary = self.tree_mut().insert(parent, payload);

        let marriages = self.graph.person(who).spouse_in.clone();
        for union_id in marriages {
            let spouse = self.graph.union(union_id).spouse_of(who);
            let payload = self
                .factory
                .person(self.graph, spouse, depth, PersonFlags::empty());
            let spouse_node = self.tree_mut().insert(parent, payload);
            self.person_mut(primary).spouses.push(spouse_node);

            if let Some(&prior) = self.expanded.get(&union_id) {
                // Link both the person and the spouse placeholder to the
                // previous occurrence; no descent for this marriage.
                self.set_dup(primary, prior);
                self.set_dup(spouse_node, prior);
            } else {
                self.expanded.insert(union_id, primary);
                if depth < self.max_depth {
                    let children = self.graph.union(union_id).children.clone();
                    for child in children {
                        self.grow_child(parent, child, depth + 1);
                    }
                }
            }
        }
    }

    fn set_dup(&mut self, id: NodeId, prior: NodeId) {
        match self.tree_mut().node_mut(id) {
            DisplayNode::Person(p) => p.dup = Some(prior),
            DisplayNode::Union(u) => u.dup = Some(prior),
            DisplayNode::Pseudo => unreachable!("pseudo nodes never duplicate a union"),
        }
    }

    fn person_mut(&mut self, id: NodeId) -> &mut crate::node::PersonNode {
        match self.tree_mut().node_mut(id) {
            DisplayNode::Person(p) => p,
            _ => unreachable!("multi-marriage primary is always a person node"),
        }
    }

    fn tree(&self) -> &FlatTree {
        self.tree.as_ref().expect("tree root built first")
    }

    fn tree_mut(&mut self) -> &mut FlatTree {
        self.tree.as_mut().expect("tree root built first")
    }
}

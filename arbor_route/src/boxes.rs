// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The box-mapping snapshot produced by the external layout.

use arbor_tree::NodeId;
use hashbrown::HashMap;
use kurbo::Rect;

/// Node bounding boxes for one layout pass.
///
/// Immutable once handed to the router and hit tester: a tree rebuild or
/// configuration change invalidates it, and a fresh snapshot must be
/// produced before further painting or hit testing. The layout collaborator
/// guarantees the boxes do not overlap.
#[derive(Clone, Debug, Default)]
pub struct LayoutBoxes {
    rects: HashMap<NodeId, Rect>,
    bounds: Option<Rect>,
}

impl LayoutBoxes {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node's bounding box, extending the overall bounds.
    pub fn insert(&mut self, id: NodeId, rect: Rect) {
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(rect),
            None => rect,
        });
        self.rects.insert(id, rect);
    }

    /// The box for a node, if the node is in this snapshot.
    pub fn get(&self, id: NodeId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    /// Union of all recorded boxes ([`Rect::ZERO`] while empty).
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or(Rect::ZERO)
    }

    /// Iterate `(node, box)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Rect)> + '_ {
        self.rects.iter().map(|(&id, &r)| (id, r))
    }

    /// Number of recorded boxes.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether no boxes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::{FamilyGraph, Sex};
    use arbor_tree::{build_tree, CharCellMeasure, ChartConfig};

    #[test]
    fn bounds_is_union_of_inserted_rects() {
        let mut g = FamilyGraph::new();
        let a = g.add_person("A", "X", Sex::Male, None, None);
        let tree = build_tree(&g, a, &ChartConfig::default(), &CharCellMeasure::default());

        let mut boxes = LayoutBoxes::new();
        assert!(boxes.is_empty());
        assert_eq!(boxes.bounds(), Rect::ZERO);

        boxes.insert(tree.root(), Rect::new(10.0, 10.0, 50.0, 40.0));
        assert_eq!(boxes.bounds(), Rect::new(10.0, 10.0, 50.0, 40.0));
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes.get(tree.root()), Some(Rect::new(10.0, 10.0, 50.0, 40.0)));
    }
}

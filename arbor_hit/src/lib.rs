// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Hit: mapping screen points back to chart nodes.
//!
//! The paint side scales and translates layout space onto the screen
//! (see [`arbor_route::route`]); hit testing inverts that transform and
//! scans the same [`LayoutBoxes`] snapshot the router painted from. Because
//! both sides share one snapshot, a hit is exact at any zoom: what you see
//! is what you pick.
//!
//! Union nodes resolve further to the half that was struck, so a click on a
//! couple lands on one spouse. The bar between the halves belongs to
//! neither and reports no hit.
//!
//! This crate is `no_std`.

#![no_std]

use arbor_model::PersonId;
use arbor_route::LayoutBoxes;
use arbor_tree::{DisplayNode, FlatTree, NodeId};
use kurbo::Point;

/// Which half of a union box a hit landed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnionHalf {
    /// The leading cell (left, or top when the chart grows rightward).
    First,
    /// The trailing cell.
    Second,
}

/// A resolved hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// The node whose box contains the point.
    pub node: NodeId,
    /// For union nodes, the half that was struck.
    pub half: Option<UnionHalf>,
    /// The graph person behind the struck cell, when there is one.
    /// Placeholder cells (unknown spouses) carry no person.
    pub person: Option<PersonId>,
}

/// Find the node under a screen point.
///
/// `screen` is in device coordinates; `zoom` and `margin` must be the values
/// the display list was routed with. The box between a union's two cells is
/// a miss, as is any point outside every box.
pub fn locate(
    tree: &FlatTree,
    boxes: &LayoutBoxes,
    screen: Point,
    zoom: f64,
    margin: f64,
) -> Option<Hit> {
    debug_assert!(zoom.is_finite() && zoom > 0.0, "zoom must be positive");
    let p = Point::new(screen.x / zoom - margin, screen.y / zoom - margin);

    // Boxes are disjoint by the layout contract, so the first container is
    // the only one. Linear scan; charts are a few hundred nodes at most.
    for (id, rect) in boxes.iter() {
        if !rect.contains(p) {
            continue;
        }
        return match tree.node(id) {
            DisplayNode::Pseudo => None,
            DisplayNode::Person(person) => Some(Hit {
                node: id,
                half: None,
                person: person.cell.person,
            }),
            DisplayNode::Union(u) => {
                let (b1, b2) = u.half_bounds(rect);
                if b1.contains(p) {
                    Some(Hit {
                        node: id,
                        half: Some(UnionHalf::First),
                        person: u.p1.person,
                    })
                } else if b2.contains(p) {
                    Some(Hit {
                        node: id,
                        half: Some(UnionHalf::Second),
                        person: u.p2.person,
                    })
                } else {
                    // The spouse bar between the halves.
                    None
                }
            }
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::{FamilyGraph, PersonId, Sex};
    use arbor_tree::{build_tree, CharCellMeasure, ChartConfig};
    use kurbo::Rect;

    fn boxes_for(tree: &FlatTree) -> LayoutBoxes {
        let mut boxes = LayoutBoxes::new();
        let mut x = 0.0;
        for id in tree.pre_order() {
            let size = tree.node(id).size();
            let (w, h) = if size == kurbo::Size::ZERO {
                (1.0, 1.0)
            } else {
                (size.width, size.height)
            };
            let y = f64::from(tree.node(id).depth()) * 120.0;
            boxes.insert(id, Rect::new(x, y, x + w, y + h));
            x += w + 40.0;
        }
        boxes
    }

    fn couple(g: &mut FamilyGraph) -> PersonId {
        let h = g.add_person("Root", "H", Sex::Male, Some(1900), None);
        let w = g.add_person("Root", "W", Sex::Female, Some(1902), None);
        g.add_union(Some(h), Some(w), &[]);
        h
    }

    #[test]
    fn interior_point_hits_a_person() {
        let mut g = FamilyGraph::new();
        let solo = g.add_person("Solo", "X", Sex::Male, None, None);
        let tree = build_tree(&g, solo, &ChartConfig::default(), &CharCellMeasure::default());
        let boxes = boxes_for(&tree);
        let rect = boxes.get(tree.root()).unwrap();

        let hit = locate(&tree, &boxes, rect.center(), 1.0, 0.0).unwrap();
        assert_eq!(hit.node, tree.root());
        assert_eq!(hit.half, None);
        assert_eq!(hit.person, Some(solo));
    }

    #[test]
    fn union_resolves_to_the_struck_half() {
        let mut g = FamilyGraph::new();
        let root = couple(&mut g);
        let tree = build_tree(&g, root, &ChartConfig::default(), &CharCellMeasure::default());
        let boxes = boxes_for(&tree);
        let rect = boxes.get(tree.root()).unwrap();
        let u = tree.node(tree.root()).as_union().unwrap();
        let (b1, b2) = u.half_bounds(rect);

        let first = locate(&tree, &boxes, b1.center(), 1.0, 0.0).unwrap();
        assert_eq!(first.half, Some(UnionHalf::First));
        assert_eq!(first.person, Some(root));

        let second = locate(&tree, &boxes, b2.center(), 1.0, 0.0).unwrap();
        assert_eq!(second.half, Some(UnionHalf::Second));
        assert_eq!(second.person, g.union(tree.node(tree.root()).as_union().unwrap().union_id).wife);
    }

    #[test]
    fn spouse_bar_between_halves_is_a_miss() {
        let mut g = FamilyGraph::new();
        let root = couple(&mut g);
        let tree = build_tree(&g, root, &ChartConfig::default(), &CharCellMeasure::default());
        let boxes = boxes_for(&tree);
        let rect = boxes.get(tree.root()).unwrap();
        let u = tree.node(tree.root()).as_union().unwrap();
        let (b1, b2) = u.half_bounds(rect);

        // Midway through the gap, vertically centered.
        let gap = Point::new((b1.x1 + b2.x0) / 2.0, rect.center().y);
        assert_eq!(locate(&tree, &boxes, gap, 1.0, 0.0), None);
    }

    #[test]
    fn hit_is_invariant_under_zoom_and_margin() {
        let mut g = FamilyGraph::new();
        let root = couple(&mut g);
        let tree = build_tree(&g, root, &ChartConfig::default(), &CharCellMeasure::default());
        let boxes = boxes_for(&tree);
        // The union box's own center falls in the inter-spouse gap; query the
        // husband half's center instead.
        let u = tree.node(tree.root()).as_union().unwrap();
        let (b1, _) = u.half_bounds(boxes.get(tree.root()).unwrap());
        let p = b1.center();

        let reference = locate(&tree, &boxes, p, 1.0, 0.0);
        assert_eq!(reference.map(|h| h.person), Some(Some(root)));
        for &(zoom, margin) in &[(0.5, 0.0), (2.0, 16.0), (3.0, 5.0)] {
            let screen = Point::new((p.x + margin) * zoom, (p.y + margin) * zoom);
            assert_eq!(locate(&tree, &boxes, screen, zoom, margin), reference);
        }
    }

    #[test]
    fn box_edges_are_half_open() {
        let mut g = FamilyGraph::new();
        let solo = g.add_person("Solo", "X", Sex::Male, None, None);
        let tree = build_tree(&g, solo, &ChartConfig::default(), &CharCellMeasure::default());
        let boxes = boxes_for(&tree);
        let rect = boxes.get(tree.root()).unwrap();

        // Top-left edge belongs to the box, bottom-right does not.
        assert!(locate(&tree, &boxes, Point::new(rect.x0, rect.y0), 1.0, 0.0).is_some());
        assert!(locate(&tree, &boxes, Point::new(rect.x1, rect.y1), 1.0, 0.0).is_none());
    }
}

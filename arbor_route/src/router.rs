// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector routing: turning a tree plus box mapping into paint ops.

use alloc::vec::Vec;

use arbor_tree::{
    ChartConfig, DisplayNode, FlatTree, NodeId, PersonCell, PersonNode, Stroke, UnionNode,
    UNION_BAR_WIDE,
};
use kurbo::{Affine, Line, Point, Rect};

use crate::boxes::LayoutBoxes;
use crate::ops::PaintOp;

/// Gap between generation layers, in layout units. Child lines sit halfway
/// through this gap.
pub const LEVEL_GAP: f64 = 30.0;

/// Distance past a generation's trailing edge where its guide line is drawn.
pub const GEN_LINE_INSET: f64 = 8.0;

/// Route every connector and box of the chart into a display list.
///
/// Ops are emitted in replay order: clear, one transform combining `zoom`
/// and the `margin` translation, all connector geometry (pre-order, parent
/// before children), then all boxes and labels (pre-order, which keeps the
/// generation-line counter monotonic). All coordinates are unscaled layout
/// space; only the transform op carries `zoom`.
pub fn route(
    tree: &FlatTree,
    boxes: &LayoutBoxes,
    config: &ChartConfig,
    zoom: f64,
    margin: f64,
) -> Vec<PaintOp> {
    debug_assert!(zoom.is_finite() && zoom > 0.0, "zoom must be positive");
    debug_assert!(margin.is_finite() && margin >= 0.0, "margin must be non-negative");

    let mut router = Router {
        tree,
        boxes,
        config,
        ops: Vec::new(),
        next_level: 1,
    };
    router.ops.push(PaintOp::Clear(config.palette.background));
    router.ops.push(PaintOp::Transform(
        Affine::scale(zoom) * Affine::translate((margin, margin)),
    ));
    router.edges(tree.root());
    for id in tree.pre_order() {
        router.paint_node(id);
    }
    router.ops
}

struct Router<'a> {
    tree: &'a FlatTree,
    boxes: &'a LayoutBoxes,
    config: &'a ChartConfig,
    ops: Vec<PaintOp>,
    /// Next generation needing a guide line; advances once per depth as
    /// painting proceeds.
    next_level: u32,
}

impl Router<'_> {
    fn bounds_of(&self, id: NodeId) -> Rect {
        self.boxes
            .get(id)
            .expect("box mapping out of sync with tree")
    }

    fn line(&mut self, p0: impl Into<Point>, p1: impl Into<Point>, stroke: Stroke) {
        self.ops.push(PaintOp::Line {
            line: Line::new(p0.into(), p1.into()),
            stroke,
        });
    }

    // --- connector pass ---

    fn edges(&mut self, id: NodeId) {
        match self.tree.node(id) {
            DisplayNode::Pseudo => self.pseudo_edges(id),
            DisplayNode::Person(p) => self.person_edges(id, p),
            DisplayNode::Union(u) => {
                if u.vertical {
                    self.union_edges_v(id, u);
                } else {
                    self.union_edges_h(id, u);
                }
            }
        }
        for &child in self.tree.children(id) {
            self.edges(child);
        }
    }

    fn person_edges(&mut self, id: NodeId, p: &PersonNode) {
        let b1 = self.bounds_of(id);
        let stroke = self.config.strokes.multi_marriage;

        // Multi-marriage fan-out: one connector per associated spouse, from
        // a shared midpoint of the primary box to each spouse box.
        if !p.spouses.is_empty() {
            if p.vertical {
                // Align on the leftmost midpoint among primary and spouses,
                // so narrow spouse boxes still line up.
                let mut top_x = b1.x0 + b1.width() / 2.0;
                for &s in &p.spouses {
                    let b2 = self.bounds_of(s);
                    top_x = top_x.min(b2.x0 + b2.width() / 2.0);
                }
                for &s in &p.spouses {
                    let b3 = self.bounds_of(s);
                    self.line((top_x, b1.y1), (top_x, b3.y0), stroke);
                }
            } else {
                let y = b1.y0 + b1.height() / 2.0;
                for &s in &p.spouses {
                    let b3 = self.bounds_of(s);
                    self.line((b1.x1, y), (b3.x0, y), stroke);
                }
            }
        }

        // Duplicate cross-link for the multi-marriage case. Both the primary
        // and its fan-out spouse node carry the same dup target; emit the
        // link from the lineal primary only so it is not drawn twice.
        //
        // Person nodes never hold tree children (a marriage's children hang
        // off the attach-parent), so there are no child lines to draw here;
        // the attach-parent routes them.
        if let Some(dest) = p.dup
            && p.cell.is_lineal()
        {
            self.dup_link(id, dest, p.vertical);
        }
    }

    /// Child connectors for a pseudo root.
    ///
    /// The pseudo root holds a multi-marriage fan-out: the primary person,
    /// its spouse placeholders, and the marriages' children, all as direct
    /// tree children. The pseudo node itself is not drawn, so the child line
    /// starts from the primary person's box instead.
    fn pseudo_edges(&mut self, id: NodeId) {
        let Some(&primary) = self.tree.children(id).iter().find(|&&c| {
            self.tree
                .node(c)
                .as_person()
                .is_some_and(|p| p.cell.is_lineal())
        }) else {
            return;
        };
        let kids: Vec<NodeId> = self
            .tree
            .children(id)
            .iter()
            .copied()
            .filter(|&c| c != primary && self.tree.node(c).joins_child_line())
            .collect();
        if kids.is_empty() {
            return;
        }

        let b1 = self.bounds_of(primary);
        let vertical = self
            .tree
            .node(primary)
            .as_person()
            .is_some_and(|p| p.vertical);
        if vertical {
            self.children_edges_v(&kids, Point::new(b1.x1, b1.y0 + b1.height() / 2.0));
        } else {
            let start = Point::new(b1.x0 + b1.width() / 2.0, b1.y1);
            self.children_edges_h(&kids, start, b1.y1);
        }
    }

    fn union_edges_h(&mut self, id: NodeId, u: &UnionNode) {
        let b = self.bounds_of(id);

        // Spouse bar centered between the two boxes.
        let y = b.y0 + b.height() / 2.0;
        let x = b.x0 + u.p1.size.width;
        self.line((x, y), (x + UNION_BAR_WIDE, y), self.config.strokes.spouse_line);

        if self.dup_link_of(id, u.dup, u.vertical) || self.tree.is_leaf(id) {
            return;
        }
        let start = Point::new(x + UNION_BAR_WIDE / 2.0, y);
        self.children_edges_h(self.tree.children(id), start, b.y1);
    }

    fn union_edges_v(&mut self, id: NodeId, u: &UnionNode) {
        let b = self.bounds_of(id);

        let x = b.x0 + u.p1.size.width.min(u.p2.size.width) / 2.0;
        let y = b.y0 + u.p1.size.height;
        self.line((x, y), (x, y + UNION_BAR_WIDE), self.config.strokes.spouse_line);

        if self.dup_link_of(id, u.dup, u.vertical) || self.tree.is_leaf(id) {
            return;
        }
        self.children_edges_v(self.tree.children(id), Point::new(x, y + UNION_BAR_WIDE / 2.0));
    }

    /// Horizontal (root at top) connectors from `start` to `children`, whose
    /// boxes sit below the parent's trailing edge `trailing`.
    fn children_edges_h(&mut self, children: &[NodeId], start: Point, trailing: f64) {
        let stroke = self.config.strokes.child_line;

        // Child line sits halfway through the inter-generation gap.
        let target_y = trailing + LEVEL_GAP / 2.0;
        self.line(start, (start.x, target_y), stroke);

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for &child in children {
            let node = self.tree.node(child);
            if !node.joins_child_line() {
                continue;
            }
            let cb = self.bounds_of(child);
            let child_x = cb.x0 + node.parent_connect_offset();
            min_x = min_x.min(child_x);
            max_x = max_x.max(child_x);
            self.line((child_x, cb.y0), (child_x, target_y), stroke);
        }
        if min_x > max_x {
            // Only placeholder children; nothing joins the child line.
            return;
        }
        self.line((min_x, target_y), (max_x, target_y), stroke);

        // A single child's segment is unlikely to meet the parent stub; add
        // the degenerate connector between them.
        if min_x == max_x {
            self.line((min_x, target_y), (start.x, target_y), stroke);
        }
    }

    /// Vertical (root at left) connectors from `start` to `children`.
    ///
    /// The child line is placed relative to the children's leading edge,
    /// which requires the layout's "align toward root" policy so that edge
    /// is constant across a generation.
    fn children_edges_v(&mut self, children: &[NodeId], start: Point) {
        let stroke = self.config.strokes.child_line;

        let mut target_x = None;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &child in children {
            let node = self.tree.node(child);
            if !node.joins_child_line() {
                continue;
            }
            let cb = self.bounds_of(child);
            let tx = *target_x.get_or_insert(cb.x0 - LEVEL_GAP / 2.0);
            let child_y = cb.y0 + node.parent_connect_offset();
            min_y = min_y.min(child_y);
            max_y = max_y.max(child_y);
            self.line((tx, child_y), (cb.x0, child_y), stroke);
        }
        let Some(tx) = target_x else {
            return;
        };
        if min_y == max_y {
            // Single child: run the line up to the parent stub instead.
            self.line((tx, min_y), (tx, start.y), stroke);
        } else {
            self.line((tx, min_y), (tx, max_y), stroke);
        }
        self.line(start, (tx, start.y), stroke);
    }

    /// Cross-link between two occurrences of the same union. Returns whether
    /// a link was drawn (in which case the caller skips child connectors).
    fn dup_link_of(&mut self, id: NodeId, dup: Option<NodeId>, vertical: bool) -> bool {
        let Some(dest) = dup else {
            return false;
        };
        self.dup_link(id, dest, vertical);
        true
    }

    fn dup_link(&mut self, this: NodeId, dest: NodeId, vertical: bool) {
        let stroke = self.config.strokes.duplicate_link;
        // Highlight outside the node borders by the pen's own width.
        let a = self.bounds_of(this).inflate(stroke.width, stroke.width);
        let d = self.bounds_of(dest).inflate(stroke.width, stroke.width);

        // Curve from the middle of each box through a control point placed
        // beyond the deeper of the two by half the generation gap.
        let (p1, p2, p3) = if vertical {
            let y_this = a.y0 + a.height() / 2.0;
            let y_dest = d.y0 + d.height() / 2.0;
            (
                Point::new(a.x1, y_this),
                Point::new(a.x1.max(d.x1) + LEVEL_GAP / 2.0, (y_this + y_dest) / 2.0),
                Point::new(d.x1, y_dest),
            )
        } else {
            let x_this = a.x0 + a.width() / 2.0;
            let x_dest = d.x0 + d.width() / 2.0;
            (
                Point::new(x_this, a.y1),
                Point::new((x_this + x_dest) / 2.0, a.y1.max(d.y1) + LEVEL_GAP / 2.0),
                Point::new(x_dest, d.y1),
            )
        };

        self.ops.push(PaintOp::StrokeRect { rect: a, stroke });
        self.ops.push(PaintOp::StrokeRect { rect: d, stroke });
        self.ops.push(PaintOp::CurveThrough {
            points: [p1, p2, p3],
            stroke,
        });
    }

    // --- box pass ---

    fn paint_node(&mut self, id: NodeId) {
        let (depth, trailing_edge, vertical) = match self.tree.node(id) {
            DisplayNode::Pseudo => return,
            DisplayNode::Person(p) => {
                let b = self.bounds_of(id);
                self.paint_cell(&p.cell, b);
                (p.depth, if p.vertical { b.x1 } else { b.y1 }, p.vertical)
            }
            DisplayNode::Union(u) => {
                let (b1, b2) = u.half_bounds(self.bounds_of(id));
                self.paint_cell(&u.p1, b1);
                self.paint_cell(&u.p2, b2);
                let edge = if u.vertical {
                    b1.x1.max(b2.x1)
                } else {
                    b1.y1.max(b2.y1)
                };
                (u.depth, edge, u.vertical)
            }
        };

        if self.config.gen_lines && depth == self.next_level {
            self.next_level += 1;
            let g = trailing_edge + GEN_LINE_INSET;
            let overall = self.boxes.bounds();
            let stroke = self.config.strokes.gen_line;
            if vertical {
                self.line((g, 0.0), (g, overall.y1), stroke);
            } else {
                self.line((0.0, g), (overall.x1, g), stroke);
            }
        }
    }

    fn paint_cell(&mut self, cell: &PersonCell, rect: Rect) {
        self.ops.push(PaintOp::FillRect {
            rect,
            color: cell.fill,
        });
        self.ops.push(PaintOp::StrokeRect {
            rect,
            stroke: self.config.strokes.node_border,
        });
        self.ops.push(PaintOp::Text {
            origin: rect.origin(),
            text: cell.label.clone(),
            font: cell.font(),
            color: self.config.palette.text,
        });
    }
}

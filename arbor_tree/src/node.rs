// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display node types: the tagged sum over person, union, and pseudo nodes.

use alloc::string::String;

use arbor_model::{PersonId, UnionId};
use kurbo::{Rect, Size};
use smallvec::SmallVec;

use crate::config::FontClass;
use crate::Color;

/// Identifier for a node in a [`FlatTree`](crate::FlatTree).
///
/// Plain index: the tree is built once and never mutated, so there is no
/// generation tracking. Ids are assigned in build order, which is what makes
/// "a `dup` link always points strictly earlier" checkable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of this node in the tree arena (build order).
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Gap between the two person boxes of a union, in layout units. The
/// spouse-bar connector is drawn centered in this gap.
pub const UNION_BAR_WIDE: f64 = 20.0;

bitflags::bitflags! {
    /// Flags on a drawable person cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PersonFlags: u8 {
        /// An independent branch of the chart. Cleared on the fan-out spouse
        /// placeholders attached only so layout reserves space for them.
        const REAL   = 0b0000_0001;
        /// A direct descendant: participates in parent-child connectors and
        /// uses the major font. Married-in spouses and unknown placeholders
        /// are non-lineal.
        const LINEAL = 0b0000_0010;
    }
}

/// One drawable person box: either standalone (in a [`PersonNode`]) or
/// embedded as half of a [`UnionNode`].
#[derive(Clone, Debug)]
pub struct PersonCell {
    /// The person shown, or `None` for an "unknown" placeholder box.
    pub person: Option<PersonId>,
    /// Multi-line label text.
    pub label: String,
    /// Fill color (by sex, or the unknown color).
    pub fill: Color,
    /// Measured box size in layout units (label metrics plus padding).
    pub size: Size,
    /// Real/lineal flags.
    pub flags: PersonFlags,
}

impl PersonCell {
    /// Whether this cell is a direct descendant.
    pub fn is_lineal(&self) -> bool {
        self.flags.contains(PersonFlags::LINEAL)
    }

    /// Whether this cell is an independent branch (not a fan-out placeholder).
    pub fn is_real(&self) -> bool {
        self.flags.contains(PersonFlags::REAL)
    }

    /// Font the label is set in.
    pub fn font(&self) -> FontClass {
        if self.is_lineal() {
            FontClass::Major
        } else {
            FontClass::Minor
        }
    }
}

/// A single person box in the tree.
#[derive(Clone, Debug)]
pub struct PersonNode {
    /// The drawable cell.
    pub cell: PersonCell,
    /// Generation depth, counted from 1 at the root.
    pub depth: u32,
    /// Chart orientation (root on the left).
    pub vertical: bool,
    /// Fan-out spouse nodes for the multi-marriage case, in marriage order.
    /// Each entry is a sibling node under the same tree parent.
    pub spouses: SmallVec<[NodeId; 2]>,
    /// Back-reference to the earlier node representing the same union, when
    /// one of this person's marriages was already expanded elsewhere.
    pub dup: Option<NodeId>,
}

/// A married couple: two person boxes joined by a spouse bar.
///
/// By convention `p1` is the husband side and `p2` the wife side when both
/// are known.
#[derive(Clone, Debug)]
pub struct UnionNode {
    /// Husband-side cell.
    pub p1: PersonCell,
    /// Wife-side cell.
    pub p2: PersonCell,
    /// The underlying union.
    pub union_id: UnionId,
    /// Generation depth, counted from 1 at the root.
    pub depth: u32,
    /// Chart orientation (root on the left).
    pub vertical: bool,
    /// Back-reference to the earlier node representing the same union.
    pub dup: Option<NodeId>,
}

impl UnionNode {
    /// Split a union's layout box into the two per-person boxes.
    ///
    /// Vertical charts stack the cells (p1 above p2), horizontal charts put
    /// them side by side (p1 left of p2), with [`UNION_BAR_WIDE`] between
    /// them. The router paints these rects and the hit tester resolves
    /// spouse halves against the same derivation.
    pub fn half_bounds(&self, bounds: Rect) -> (Rect, Rect) {
        let b1 = Rect::from_origin_size((bounds.x0, bounds.y0), self.p1.size);
        let b2 = if self.vertical {
            Rect::from_origin_size(
                (bounds.x0, bounds.y0 + self.p1.size.height + UNION_BAR_WIDE),
                self.p2.size,
            )
        } else {
            Rect::from_origin_size(
                (bounds.x0 + self.p1.size.width + UNION_BAR_WIDE, bounds.y0),
                self.p2.size,
            )
        };
        (b1, b2)
    }

    /// Combined size of both cells plus the union bar.
    pub fn size(&self) -> Size {
        if self.vertical {
            Size::new(
                self.p1.size.width.max(self.p2.size.width),
                self.p1.size.height + UNION_BAR_WIDE + self.p2.size.height,
            )
        } else {
            Size::new(
                self.p1.size.width + UNION_BAR_WIDE + self.p2.size.width,
                self.p1.size.height.max(self.p2.size.height),
            )
        }
    }
}

/// A node of the flattened display tree.
#[derive(Clone, Debug)]
pub enum DisplayNode {
    /// A single person box.
    Person(PersonNode),
    /// A married couple.
    Union(UnionNode),
    /// Non-drawable anchor, used only as the tree root when the root person
    /// has more than one marriage.
    Pseudo,
}

impl DisplayNode {
    /// Size hint for the external layout, in layout units.
    pub fn size(&self) -> Size {
        match self {
            Self::Person(p) => p.cell.size,
            Self::Union(u) => u.size(),
            Self::Pseudo => Size::ZERO,
        }
    }

    /// Generation depth (0 for the pseudo root).
    pub fn depth(&self) -> u32 {
        match self {
            Self::Person(p) => p.depth,
            Self::Union(u) => u.depth,
            Self::Pseudo => 0,
        }
    }

    /// Duplicate back-reference, if this node is a later occurrence of an
    /// already-expanded union.
    pub fn dup(&self) -> Option<NodeId> {
        match self {
            Self::Person(p) => p.dup,
            Self::Union(u) => u.dup,
            Self::Pseudo => None,
        }
    }

    /// Offset along this node's leading edge where the connector from its
    /// parent lands.
    ///
    /// For a person box that is its midpoint; for a union it is the midpoint
    /// of the lineal cell (the one that is the actual child), so the child
    /// line meets the descendant rather than the married-in spouse.
    pub fn parent_connect_offset(&self) -> f64 {
        match self {
            Self::Person(p) => {
                if p.vertical {
                    p.cell.size.height / 2.0
                } else {
                    p.cell.size.width / 2.0
                }
            }
            Self::Union(u) => {
                let (lead, other_lineal) = if u.vertical {
                    (u.p1.size.height, u.p2.size.height)
                } else {
                    (u.p1.size.width, u.p2.size.width)
                };
                if u.p1.is_lineal() || !u.p2.is_lineal() {
                    lead / 2.0
                } else {
                    lead + UNION_BAR_WIDE + other_lineal / 2.0
                }
            }
            Self::Pseudo => 0.0,
        }
    }

    /// Whether this node participates in parent-child connectors.
    ///
    /// Fan-out spouse placeholders are attached to the parent only so layout
    /// reserves space; they never get an "I'm a child" line.
    pub fn joins_child_line(&self) -> bool {
        match self {
            Self::Person(p) => p.cell.is_lineal(),
            Self::Union(_) => true,
            Self::Pseudo => false,
        }
    }

    /// The person variant, if this is one.
    pub fn as_person(&self) -> Option<&PersonNode> {
        match self {
            Self::Person(p) => Some(p),
            _ => None,
        }
    }

    /// The union variant, if this is one.
    pub fn as_union(&self) -> Option<&UnionNode> {
        match self {
            Self::Union(u) => Some(u),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(w: f64, h: f64, flags: PersonFlags) -> PersonCell {
        PersonCell {
            person: None,
            label: String::new(),
            fill: Color::rgb(0, 0, 0),
            size: Size::new(w, h),
            flags,
        }
    }

    #[test]
    fn horizontal_half_bounds_are_side_by_side() {
        let u = UnionNode {
            p1: cell(40.0, 30.0, PersonFlags::REAL | PersonFlags::LINEAL),
            p2: cell(50.0, 24.0, PersonFlags::REAL),
            union_id: dummy_union_id(),
            depth: 1,
            vertical: false,
            dup: None,
        };
        let (b1, b2) = u.half_bounds(Rect::new(10.0, 20.0, 120.0, 50.0));
        assert_eq!(b1, Rect::new(10.0, 20.0, 50.0, 50.0));
        assert_eq!(b2, Rect::new(50.0 + UNION_BAR_WIDE, 20.0, 120.0, 44.0));
        assert_eq!(u.size(), Size::new(40.0 + UNION_BAR_WIDE + 50.0, 30.0));
    }

    #[test]
    fn vertical_half_bounds_are_stacked() {
        let u = UnionNode {
            p1: cell(40.0, 30.0, PersonFlags::REAL | PersonFlags::LINEAL),
            p2: cell(50.0, 24.0, PersonFlags::REAL),
            union_id: dummy_union_id(),
            depth: 1,
            vertical: true,
            dup: None,
        };
        let (b1, b2) = u.half_bounds(Rect::new(0.0, 0.0, 50.0, 74.0));
        assert_eq!(b1, Rect::new(0.0, 0.0, 40.0, 30.0));
        assert_eq!(b2, Rect::new(0.0, 30.0 + UNION_BAR_WIDE, 50.0, 54.0 + UNION_BAR_WIDE));
        assert_eq!(u.size(), Size::new(50.0, 30.0 + UNION_BAR_WIDE + 24.0));
    }

    #[test]
    fn connect_offset_targets_the_lineal_cell() {
        let husband_lineal = DisplayNode::Union(UnionNode {
            p1: cell(40.0, 30.0, PersonFlags::REAL | PersonFlags::LINEAL),
            p2: cell(50.0, 30.0, PersonFlags::REAL),
            union_id: dummy_union_id(),
            depth: 1,
            vertical: false,
            dup: None,
        });
        assert_eq!(husband_lineal.parent_connect_offset(), 20.0);

        let wife_lineal = DisplayNode::Union(UnionNode {
            p1: cell(40.0, 30.0, PersonFlags::REAL),
            p2: cell(50.0, 30.0, PersonFlags::REAL | PersonFlags::LINEAL),
            union_id: dummy_union_id(),
            depth: 1,
            vertical: false,
            dup: None,
        });
        assert_eq!(
            wife_lineal.parent_connect_offset(),
            40.0 + UNION_BAR_WIDE + 25.0
        );
    }

    #[test]
    fn spouse_placeholders_do_not_join_child_lines() {
        let spouse = DisplayNode::Person(PersonNode {
            cell: cell(10.0, 10.0, PersonFlags::empty()),
            depth: 2,
            vertical: false,
            spouses: SmallVec::new(),
            dup: None,
        });
        assert!(!spouse.joins_child_line());
        assert!(!DisplayNode::Pseudo.joins_child_line());
    }

    fn dummy_union_id() -> UnionId {
        let mut g = arbor_model::FamilyGraph::new();
        g.add_union(None, None, &[])
    }
}

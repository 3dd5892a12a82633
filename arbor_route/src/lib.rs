// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Route: connector routing over a flattened pedigree tree.
//!
//! An external tree-layout algorithm assigns every node of a
//! [`FlatTree`](arbor_tree::FlatTree) a bounding box; its output is captured
//! in a [`LayoutBoxes`] snapshot. This crate turns `(tree, boxes, config)`
//! into a [`PaintOp`] display list: background clear, a single
//! zoom-and-margin transform, every connector (spouse bars, parent-child
//! lines, multi-marriage fan-out, duplicate-union cross-links, optional
//! generation guide lines), and finally every box with its label.
//!
//! All geometry is computed in unscaled layout space; the surface replaying
//! the list applies the one [`PaintOp::Transform`] up front. The same
//! snapshot also serves `arbor_hit`, which inverts that transform.
//!
//! A node present in the tree but absent from the snapshot is a contract
//! violation (the mapping was built from a different tree) and panics rather
//! than painting garbage.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod boxes;
mod ops;
mod router;

pub use boxes::LayoutBoxes;
pub use ops::PaintOp;
pub use router::{route, GEN_LINE_INSET, LEVEL_GAP};

// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Tree: flattening a family graph into a strict display tree.
//!
//! The family graph ([`arbor_model::FamilyGraph`]) is cyclic in practice: a
//! person appears in several marriages, and descendants of different
//! ancestors converge on the same shared union (cousin marriages). A generic
//! tree-layout algorithm cannot position that directly, so this crate
//! flattens the graph into a [`FlatTree`] of [`DisplayNode`]s:
//!
//! - Each union is expanded into tree children **at most once** per build; a
//!   second reachability of the same union becomes a leaf carrying a
//!   [`dup`](UnionNode::dup) back-reference to the first occurrence instead
//!   of a second subtree. The registry of expanded union ids is the sole
//!   termination guarantee against convergent paths.
//! - Expansion stops exactly at the configured generation bound, always
//!   between generations, so a truncated generation is a complete sibling
//!   set.
//! - A person with two or more marriages fans out: one real, lineal
//!   [`PersonNode`] plus one placeholder node per married-in spouse, all
//!   attached to the same parent so layout reserves space for them.
//! - Missing data is represented, never skipped: an unknown spouse becomes a
//!   placeholder cell rendered as an "unknown" box.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]; `dup` links are
//! plain indexes into the same arena (non-owning back-references, always to a
//! node built strictly earlier in the same build). A build is a pure
//! function of `(graph, root, config)` — rebuilding yields a structurally
//! identical tree.
//!
//! Downstream, an external layout assigns each node a bounding box sized
//! from [`DisplayNode::size`]; `arbor_route` and `arbor_hit` consume that
//! mapping.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod build;
mod config;
mod factory;
mod node;
mod tree;

pub use build::build_tree;
pub use config::{
    CharCellMeasure, ChartConfig, Color, FontClass, Palette, Stroke, StrokeSet, TextMeasure,
};
pub use factory::NodeFactory;
pub use node::{DisplayNode, NodeId, PersonCell, PersonFlags, PersonNode, UnionNode, UNION_BAR_WIDE};
pub use tree::{FlatTree, PreOrder};

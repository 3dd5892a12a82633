// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Model: genealogy records for pedigree charting.
//!
//! This crate holds the immutable input side of Arbor: people and the
//! marriages (unions) connecting them. The structure is a graph, not a tree —
//! a person can be a spouse in several unions, and the same union is
//! reachable from either spouse or from any of its children. Downstream
//! crates (`arbor_tree`) flatten this graph into a strict display tree.
//!
//! Records live in a [`FamilyGraph`] arena and reference each other through
//! [`PersonId`]/[`UnionId`] index handles rather than owning pointers, so the
//! cyclic shape has a single owner and traversal never fights the borrow
//! checker.
//!
//! Ordering matters and is preserved: [`Person::spouse_in`] lists unions in
//! insertion order (the first entry is the "primary" marriage for display),
//! and [`Union::children`] lists children in insertion order.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod graph;

pub use graph::{FamilyGraph, Person, PersonId, Sex, Union, UnionId};

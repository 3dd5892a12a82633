// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end pedigree pipeline: graph, tree, boxes, display list, hit test.
//!
//! This example shows how to combine:
//! - `arbor_model` for the family graph,
//! - `arbor_tree` to flatten it into display nodes,
//! - `arbor_route` to turn externally computed boxes into paint ops,
//! - `arbor_hit` to map a screen click back to a person.
//!
//! The box placement here is a deliberately naive row-per-generation stand-in
//! for a real tree-layout algorithm.
//!
//! Run:
//! - `cargo run -p arbor_demos --example pedigree_dump`

use std::collections::HashMap;

use arbor_hit::locate;
use arbor_model::{FamilyGraph, PersonId, Sex};
use arbor_route::{route, LayoutBoxes, PaintOp, LEVEL_GAP};
use arbor_tree::{build_tree, CharCellMeasure, ChartConfig, DisplayNode};
use kurbo::{Point, Rect, Size};

/// Three generations with a cousin marriage (one union reachable along two
/// branches) and a twice-married grandchild.
fn sample_family() -> (FamilyGraph, PersonId) {
    let mut g = FamilyGraph::new();

    let arthur = g.add_person("Arthur", "Stone", Sex::Male, Some(1920), Some(1998));
    let beatrice = g.add_person("Beatrice", "Stone", Sex::Female, Some(1924), None);

    let carl = g.add_person("Carl", "Stone", Sex::Male, Some(1946), None);
    let carls_wife = g.add_person("Mina", "Hale", Sex::Female, Some(1948), None);
    let dora = g.add_person("Dora", "Stone", Sex::Female, Some(1949), None);
    let doras_husband = g.add_person("Pieter", "Vries", Sex::Male, Some(1944), None);

    let edwin = g.add_person("Edwin", "Stone", Sex::Male, Some(1970), None);
    let frieda = g.add_person("Frieda", "Vries", Sex::Female, Some(1972), None);

    g.add_union(Some(arthur), Some(beatrice), &[carl, dora]);
    g.add_union(Some(carl), Some(carls_wife), &[edwin]);
    g.add_union(Some(dora), Some(doras_husband), &[frieda]);

    // Edwin and Frieda are first cousins; their union appears once expanded
    // and once as a duplicate leaf.
    g.add_union(Some(edwin), Some(frieda), &[]);

    // Edwin remarried, so his node fans out into two marriage cells.
    let gerda = g.add_person("Gerda", "Falk", Sex::Female, Some(1975), None);
    g.add_union(Some(edwin), Some(gerda), &[]);

    (g, arthur)
}

/// Rows by generation, columns in visit order. A real layout would center
/// parents over children; connector routing works from boxes alone either way.
fn layer_boxes(tree: &arbor_tree::FlatTree) -> LayoutBoxes {
    let row_height = tree
        .ids()
        .map(|id| tree.node(id).size().height)
        .fold(0.0_f64, f64::max);

    let mut cursors: HashMap<u32, f64> = HashMap::new();
    let mut boxes = LayoutBoxes::new();
    for id in tree.pre_order() {
        let node = tree.node(id);
        let size = if node.size() == Size::ZERO {
            Size::new(1.0, 1.0)
        } else {
            node.size()
        };
        let depth = node.depth();
        let x = cursors.entry(depth).or_insert(0.0);
        let y = f64::from(depth.saturating_sub(1)) * (row_height + LEVEL_GAP);
        boxes.insert(id, Rect::from_origin_size((*x, y), size));
        *x += size.width + LEVEL_GAP;
    }
    boxes
}

fn main() {
    let (graph, root) = sample_family();
    let config = ChartConfig {
        gen_lines: true,
        ..ChartConfig::default()
    };
    let measure = CharCellMeasure::default();

    let tree = build_tree(&graph, root, &config, &measure);
    println!("flattened {} graph persons into {} display nodes", graph.person_count(), tree.len());
    for id in tree.pre_order() {
        let node = tree.node(id);
        let kind = match node {
            DisplayNode::Person(p) => {
                if p.dup.is_some() {
                    "person (duplicate)"
                } else {
                    "person"
                }
            }
            DisplayNode::Union(u) => {
                if u.dup.is_some() {
                    "union (duplicate)"
                } else {
                    "union"
                }
            }
            DisplayNode::Pseudo => "pseudo",
        };
        println!("  depth {} {kind}", node.depth());
    }

    let boxes = layer_boxes(&tree);
    let zoom = 1.5;
    let margin = 12.0;
    let ops = route(&tree, &boxes, &config, zoom, margin);

    let mut lines = 0;
    let mut rects = 0;
    let mut curves = 0;
    let mut labels = 0;
    for op in &ops {
        match op {
            PaintOp::Line { .. } => lines += 1,
            PaintOp::FillRect { .. } | PaintOp::StrokeRect { .. } => rects += 1,
            PaintOp::CurveThrough { .. } => curves += 1,
            PaintOp::Text { .. } => labels += 1,
            _ => {}
        }
    }
    println!("display list: {} ops ({lines} lines, {rects} rects, {curves} curves, {labels} labels)", ops.len());

    // Click the middle of the root couple's box, in screen coordinates.
    let center = boxes.get(tree.root()).unwrap().center();
    let screen = Point::new((center.x + margin) * zoom, (center.y + margin) * zoom);
    match locate(&tree, &boxes, screen, zoom, margin) {
        Some(hit) => {
            let name = hit
                .person
                .map(|p| graph.person(p).given.clone())
                .unwrap_or_else(|| "?".into());
            println!("click at {screen:?} hits {name} (half: {:?})", hit.half);
        }
        None => println!("click at {screen:?} hits nothing"),
    }
}

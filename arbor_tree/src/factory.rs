// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction of display nodes from graph records plus presentation
//! attributes (label, fill color, depth, orientation).

use alloc::format;
use alloc::string::String;

use arbor_model::{FamilyGraph, PersonId, Sex, UnionId};
use kurbo::Size;
use smallvec::SmallVec;

use crate::config::{ChartConfig, FontClass, TextMeasure};
use crate::node::{DisplayNode, PersonCell, PersonFlags, PersonNode, UnionNode};
use crate::Color;

/// Padding added around label text on each side of a box.
const BOX_PAD: f64 = 4.0;

/// Builds display nodes. Orientation and text metrics are fixed at
/// construction from configuration and held for the lifetime of one build.
#[derive(Debug)]
pub struct NodeFactory<'a, M: TextMeasure> {
    config: &'a ChartConfig,
    measure: &'a M,
    vertical: bool,
}

impl<'a, M: TextMeasure> NodeFactory<'a, M> {
    /// Create a factory for one build pass.
    pub fn new(config: &'a ChartConfig, measure: &'a M) -> Self {
        Self {
            config,
            measure,
            vertical: config.root_on_left,
        }
    }

    /// Chart orientation this factory stamps onto every node.
    pub fn vertical(&self) -> bool {
        self.vertical
    }

    /// Build a drawable cell for `who` (or an "unknown" placeholder).
    pub fn cell(
        &self,
        graph: &FamilyGraph,
        who: Option<PersonId>,
        flags: PersonFlags,
    ) -> PersonCell {
        let label = self.label_for(graph, who);
        let font = if flags.contains(PersonFlags::LINEAL) {
            FontClass::Major
        } else {
            FontClass::Minor
        };
        let text = self.measure.measure(&label, font);
        let size = Size::new(text.width + 2.0 * BOX_PAD, text.height + 2.0 * BOX_PAD);
        PersonCell {
            person: who,
            label,
            fill: self.color_for(graph, who),
            size,
            flags,
        }
    }

    /// Build a standalone person node at `depth`.
    pub fn person(
        &self,
        graph: &FamilyGraph,
        who: Option<PersonId>,
        depth: u32,
        flags: PersonFlags,
    ) -> DisplayNode {
        DisplayNode::Person(PersonNode {
            cell: self.cell(graph, who, flags),
            depth,
            vertical: self.vertical,
            spouses: SmallVec::new(),
            dup: None,
        })
    }

    /// Build a union node from two prepared cells.
    pub fn union(
        &self,
        p1: PersonCell,
        p2: PersonCell,
        union_id: UnionId,
        depth: u32,
    ) -> DisplayNode {
        DisplayNode::Union(UnionNode {
            p1,
            p2,
            union_id,
            depth,
            vertical: self.vertical,
            dup: None,
        })
    }

    /// Build the non-drawable root anchor for a multi-marriage root.
    pub fn pseudo(&self) -> DisplayNode {
        DisplayNode::Pseudo
    }

    /// Label text: given name, surname, and birth/death years, with `?` for
    /// anything missing. An absent person gets a bare placeholder.
    pub fn label_for(&self, graph: &FamilyGraph, who: Option<PersonId>) -> String {
        let Some(id) = who else {
            return String::from("?\n?-?");
        };
        let p = graph.person(id);
        let byr = p
            .birth_year
            .map_or_else(|| String::from("?"), |y| format!("{y}"));
        let dyr = p
            .death_year
            .map_or_else(|| String::from("?"), |y| format!("{y}"));
        format!("{}\n{}\n{}-{}", p.given, p.surname, byr, dyr)
    }

    /// Fill color by sex, or the unknown color for an absent person.
    pub fn color_for(&self, graph: &FamilyGraph, who: Option<PersonId>) -> Color {
        let palette = &self.config.palette;
        match who.map(|id| graph.person(id).sex) {
            Some(Sex::Male) => palette.male,
            Some(Sex::Female) => palette.female,
            Some(Sex::Unknown) | None => palette.unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CharCellMeasure;

    fn setup() -> (FamilyGraph, ChartConfig, CharCellMeasure) {
        (
            FamilyGraph::new(),
            ChartConfig::default(),
            CharCellMeasure::default(),
        )
    }

    #[test]
    fn label_with_full_data() {
        let (mut g, config, m) = setup();
        let p = g.add_person("Ada", "Byron", Sex::Female, Some(1815), Some(1852));
        let f = NodeFactory::new(&config, &m);
        assert_eq!(f.label_for(&g, Some(p)), "Ada\nByron\n1815-1852");
    }

    #[test]
    fn label_with_missing_dates_uses_question_marks() {
        let (mut g, config, m) = setup();
        let p = g.add_person("Ada", "Byron", Sex::Female, None, None);
        let f = NodeFactory::new(&config, &m);
        assert_eq!(f.label_for(&g, Some(p)), "Ada\nByron\n?-?");
    }

    #[test]
    fn absent_person_gets_placeholder_label_and_unknown_color() {
        let (g, config, m) = setup();
        let f = NodeFactory::new(&config, &m);
        assert_eq!(f.label_for(&g, None), "?\n?-?");
        assert_eq!(f.color_for(&g, None), config.palette.unknown);
    }

    #[test]
    fn cell_size_is_metrics_plus_padding() {
        let (mut g, config, m) = setup();
        let p = g.add_person("Ada", "Byron", Sex::Female, Some(1815), Some(1852));
        let f = NodeFactory::new(&config, &m);
        let cell = f.cell(&g, Some(p), PersonFlags::REAL | PersonFlags::LINEAL);
        // Longest line is "1815-1852" (9 chars), 3 lines, major cell 8x16.
        assert_eq!(cell.size, Size::new(9.0 * 8.0 + 8.0, 3.0 * 16.0 + 8.0));
        assert_eq!(cell.fill, config.palette.female);
    }

    #[test]
    fn non_lineal_cells_measure_with_minor_font() {
        let (mut g, config, m) = setup();
        let p = g.add_person("Ada", "Byron", Sex::Female, Some(1815), Some(1852));
        let f = NodeFactory::new(&config, &m);
        let lineal = f.cell(&g, Some(p), PersonFlags::REAL | PersonFlags::LINEAL);
        let spouse = f.cell(&g, Some(p), PersonFlags::REAL);
        assert!(spouse.size.width < lineal.size.width);
        assert_eq!(spouse.font(), FontClass::Minor);
    }
}

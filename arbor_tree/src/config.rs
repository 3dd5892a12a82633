// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration: colors, stroke styles, fonts, and structural limits.

use kurbo::Size;

/// A solid RGB color.
///
/// Arbor does not rasterize anything itself, so this stays a plain value the
/// paint surface can map onto whatever color type it uses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A stroke style: color plus width in layout units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in unscaled layout units.
    pub width: f64,
}

impl Stroke {
    /// Create a stroke style.
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Which font a piece of label text uses.
///
/// Lineal (direct-descendant) boxes use the major font; married-in spouses
/// and placeholders use the minor font.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FontClass {
    /// Primary label font.
    Major,
    /// De-emphasized label font.
    Minor,
}

/// Text measurement seam.
///
/// Real text metrics belong to the drawing surface; the node factory only
/// needs a width/height for each label to size boxes. Hosts implement this
/// against their font stack; tests and demos use [`CharCellMeasure`].
pub trait TextMeasure {
    /// Measure a (possibly multi-line) label in layout units.
    fn measure(&self, text: &str, font: FontClass) -> Size;
}

/// Fixed-cell text measurement: every character occupies one cell.
///
/// Width is the longest line times the cell width, height is the line count
/// times the cell height. Deterministic and font-free, which is what the
/// flattener tests want.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CharCellMeasure {
    /// Cell size for [`FontClass::Major`].
    pub major: Size,
    /// Cell size for [`FontClass::Minor`].
    pub minor: Size,
}

impl Default for CharCellMeasure {
    fn default() -> Self {
        Self {
            major: Size::new(8.0, 16.0),
            minor: Size::new(6.0, 12.0),
        }
    }
}

impl TextMeasure for CharCellMeasure {
    fn measure(&self, text: &str, font: FontClass) -> Size {
        let cell = match font {
            FontClass::Major => self.major,
            FontClass::Minor => self.minor,
        };
        let mut widest = 0;
        let mut lines = 0;
        for line in text.lines() {
            widest = widest.max(line.chars().count());
            lines += 1;
        }
        // An empty label still occupies one line.
        let lines = lines.max(1);
        Size::new(widest as f64 * cell.width, lines as f64 * cell.height)
    }
}

/// Node fill and chart colors.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Palette {
    /// Fill for boxes of men.
    pub male: Color,
    /// Fill for boxes of women.
    pub female: Color,
    /// Fill for boxes of people of unknown sex, and for placeholder boxes.
    pub unknown: Color,
    /// Chart background.
    pub background: Color,
    /// Label text color.
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            male: Color::rgb(0xad, 0xd8, 0xe6),
            female: Color::rgb(0xff, 0xc0, 0xcb),
            unknown: Color::rgb(0xd3, 0xd3, 0xd3),
            background: Color::rgb(0xf5, 0xf5, 0xdc),
            text: Color::rgb(0x00, 0x00, 0x00),
        }
    }
}

/// Pen styles for each connector class.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokeSet {
    /// Box borders.
    pub node_border: Stroke,
    /// The short bar joining the two halves of a union box.
    pub spouse_line: Stroke,
    /// Parent-to-children connectors.
    pub child_line: Stroke,
    /// Multi-marriage fan-out connectors.
    pub multi_marriage: Stroke,
    /// Duplicate-union cross-links and their box highlights.
    pub duplicate_link: Stroke,
    /// Generation separator guide lines.
    pub gen_line: Stroke,
}

impl Default for StrokeSet {
    fn default() -> Self {
        let black = Color::rgb(0, 0, 0);
        Self {
            node_border: Stroke::new(black, 1.0),
            spouse_line: Stroke::new(black, 1.0),
            child_line: Stroke::new(black, 1.0),
            multi_marriage: Stroke::new(Color::rgb(0x22, 0x8b, 0x22), 1.0),
            duplicate_link: Stroke::new(Color::rgb(0xc0, 0x00, 0x00), 2.0),
            gen_line: Stroke::new(Color::rgb(0x00, 0x00, 0xff), 1.0),
        }
    }
}

/// Everything the flattener and router read from configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Maximum number of generation layers to build, counted from 1 at the
    /// root. Expansion stops exactly at this bound.
    pub max_depth: u32,
    /// Chart orientation: `true` places the root at the left and grows the
    /// chart rightward (the "vertical" node arrangement, spouses stacked);
    /// `false` places the root at the top.
    pub root_on_left: bool,
    /// Draw a guide line at each new generation.
    pub gen_lines: bool,
    /// Colors.
    pub palette: Palette,
    /// Connector pens.
    pub strokes: StrokeSet,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            root_on_left: false,
            gen_lines: false,
            palette: Palette::default(),
            strokes: StrokeSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_cell_measures_widest_line() {
        let m = CharCellMeasure::default();
        let size = m.measure("ab\nlonger\nc", FontClass::Major);
        assert_eq!(size, Size::new(6.0 * 8.0, 3.0 * 16.0));
    }

    #[test]
    fn char_cell_empty_label_is_one_line() {
        let m = CharCellMeasure::default();
        let size = m.measure("", FontClass::Minor);
        assert_eq!(size.height, 12.0);
        assert_eq!(size.width, 0.0);
    }
}

// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paint display list.

use alloc::string::String;

use arbor_tree::{Color, FontClass, Stroke};
use kurbo::{Affine, Line, Point, Rect};

/// One drawing instruction for the paint surface.
///
/// Replaying the list in order reproduces the chart. The surface contract is
/// deliberately small: fill/stroke rectangles, straight lines, a smooth
/// curve through three points, text, a transform, and a clear — nothing the
/// original surface did not offer.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// Clear the surface to a color.
    Clear(Color),
    /// Set the surface transform (applied to all subsequent ops).
    Transform(Affine),
    /// Fill a rectangle.
    FillRect {
        /// Rectangle in layout space.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Stroke a rectangle outline.
    StrokeRect {
        /// Rectangle in layout space.
        rect: Rect,
        /// Pen.
        stroke: Stroke,
    },
    /// Stroke a straight line segment.
    Line {
        /// Segment in layout space.
        line: Line,
        /// Pen.
        stroke: Stroke,
    },
    /// Stroke a smooth curve passing through three points.
    ///
    /// Interpolation is the surface's choice (the original used a cardinal
    /// spline); the middle point is the control landmark the curve must pass
    /// through.
    CurveThrough {
        /// Start, middle, end.
        points: [Point; 3],
        /// Pen.
        stroke: Stroke,
    },
    /// Draw label text with its top-left corner at `origin`.
    Text {
        /// Top-left corner in layout space.
        origin: Point,
        /// Label text (may be multi-line).
        text: String,
        /// Which configured font to set it in.
        font: FontClass,
        /// Text color.
        color: Color,
    },
}

impl PaintOp {
    /// The stroke carried by this op, if it is a stroked primitive.
    pub fn stroke(&self) -> Option<Stroke> {
        match self {
            Self::StrokeRect { stroke, .. }
            | Self::Line { stroke, .. }
            | Self::CurveThrough { stroke, .. } => Some(*stroke),
            _ => None,
        }
    }
}

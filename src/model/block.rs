//! Typographic block types produced by the span aggregation pass.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in top-down page coordinates.
///
/// `y0` is the top edge and `y1` the bottom edge, so `y0 <= y1` for any
/// normalized box. All pipeline stages use this orientation; decoder
/// adapters are responsible for flipping whatever their library reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).max(0.0)
    }

    /// Vertical center of the box.
    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) / 2.0
    }
}

/// A coarse typographic class: rounded font size plus bold flag.
///
/// Equality is exact tuple equality, not numeric proximity. The derived
/// `Ord` (size first, then bold) gives every election over styles a
/// deterministic tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Style {
    /// Font size rounded to the nearest integer point
    pub size: i32,
    /// Whether the font is bold
    pub bold: bool,
}

impl Style {
    /// Create a style from a raw font size and bold flag.
    pub fn new(font_size: f32, bold: bool) -> Self {
        Self {
            size: font_size.round() as i32,
            bold,
        }
    }

    /// Whether this style is more prominent than `other`.
    ///
    /// Prominence: strictly larger size, or equal size and bold where the
    /// other is not.
    pub fn is_more_prominent_than(&self, other: &Style) -> bool {
        self.size > other.size || (self.size == other.size && self.bold && !other.bold)
    }
}

/// A logical text block reconstructed from raw glyph spans.
///
/// Carries exactly one dominant style even when its spans are
/// heterogeneous; immutable once created by the aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Concatenated, trimmed span text
    pub text: String,

    /// Majority (size, bold) style over the constituent spans
    pub style: Style,

    /// Union of the span bounding boxes
    pub bounds: BoundingBox,

    /// Owning page number (1-indexed)
    pub page: u32,

    /// Number of lines in the source layout block
    pub line_count: usize,

    /// Number of whitespace-separated words in the text
    pub word_count: usize,
}

impl TextBlock {
    /// Whether the block is a reliable signal of body text.
    ///
    /// Short blocks (single captions, stray labels) are excluded from the
    /// body-style election.
    pub fn is_substantial(&self) -> bool {
        self.line_count > 2 || self.word_count > 20
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(10.0, 10.0, 50.0, 20.0);
        let b = BoundingBox::new(30.0, 15.0, 80.0, 40.0);
        let u = a.union(&b);
        assert_eq!(u, BoundingBox::new(10.0, 10.0, 80.0, 40.0));
    }

    #[test]
    fn test_style_rounding() {
        assert_eq!(Style::new(11.6, false), Style { size: 12, bold: false });
        assert_eq!(Style::new(11.4, true), Style { size: 11, bold: true });
    }

    #[test]
    fn test_prominence() {
        let body = Style { size: 12, bold: false };
        assert!(Style { size: 14, bold: false }.is_more_prominent_than(&body));
        assert!(Style { size: 12, bold: true }.is_more_prominent_than(&body));
        assert!(!Style { size: 12, bold: false }.is_more_prominent_than(&body));
        assert!(!Style { size: 10, bold: true }.is_more_prominent_than(&body));

        let bold_body = Style { size: 12, bold: true };
        assert!(!Style { size: 12, bold: true }.is_more_prominent_than(&bold_body));
    }

    #[test]
    fn test_substantial() {
        let block = TextBlock {
            text: "short".to_string(),
            style: Style { size: 12, bold: false },
            bounds: BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            page: 1,
            line_count: 1,
            word_count: 1,
        };
        assert!(!block.is_substantial());

        let long = TextBlock {
            line_count: 4,
            ..block.clone()
        };
        assert!(long.is_substantial());
    }
}

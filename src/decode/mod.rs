//! PDF decoder abstraction layer.
//!
//! Provides a trait-based interface over the glyph/layout decoder, isolating
//! the concrete PDF library from the outline and section pipeline. A decoder
//! returns one fully materialized [`DecodedDocument`] per file; nothing
//! downstream touches the PDF library again.
//!
//! All geometry is in top-down page coordinates (`y0` = top edge). Adapters
//! must flip bottom-up coordinate systems before returning.

mod pdfium;

pub use pdfium::PdfiumDecoder;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{BoundingBox, Style};

/// Font name fragments that mark a bold face.
const BOLD_FONT_MARKERS: [&str; 5] = ["bold", "black", "heavy", "condb", "cbi"];

/// Whether a font name denotes a bold face, by case-insensitive substring
/// match (e.g. "Helvetica-Bold", "ArialBlack").
pub fn is_bold_font_name(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    BOLD_FONT_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// An atomic glyph run: the smallest unit the decoder reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    /// Text content of the run
    pub text: String,

    /// Font size in points, as reported by the decoder
    pub font_size: f32,

    /// Raw font name; bold is inferred from it
    pub font_name: String,

    /// Position of the run on its page
    pub bounds: BoundingBox,
}

impl Span {
    /// The coarse typographic class of this span.
    pub fn style(&self) -> Style {
        Style::new(self.font_size, is_bold_font_name(&self.font_name))
    }
}

/// One visual line of spans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    pub spans: Vec<Span>,

    /// Union of the span boxes
    pub bounds: BoundingBox,
}

impl Line {
    /// Text of the line: trimmed span texts joined with single spaces.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|span| span.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Average span font size, rounded to the nearest point.
    pub fn rounded_avg_font_size(&self) -> Option<i32> {
        if self.spans.is_empty() {
            return None;
        }
        let sum: f32 = self.spans.iter().map(|span| span.font_size).sum();
        Some((sum / self.spans.len() as f32).round() as i32)
    }
}

/// A text-type layout block: lines grouped by the decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBlock {
    /// Lines in reading order
    pub lines: Vec<Line>,

    /// Union of the line boxes
    pub bounds: BoundingBox,
}

/// One decoded page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedPage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Text-type layout blocks in document order
    pub blocks: Vec<RawBlock>,
}

/// An entry of the document's embedded native outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeOutlineEntry {
    /// Nesting level (1 = top)
    pub level: u32,

    /// Entry title
    pub title: String,

    /// Target page number (1-indexed)
    pub page: u32,
}

/// A fully decoded document: everything the pipeline consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedDocument {
    /// Metadata title, when the file carries one
    pub title: Option<String>,

    /// Pages in order
    pub pages: Vec<DecodedPage>,

    /// Embedded native outline, empty when absent
    pub native_outline: Vec<NativeOutlineEntry>,
}

impl DecodedDocument {
    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Look up a page by 1-based number.
    pub fn page(&self, number: u32) -> Option<&DecodedPage> {
        if number == 0 {
            return None;
        }
        self.pages.get((number - 1) as usize)
    }

    /// Extract the text inside a clip rectangle on one page.
    ///
    /// A line is kept when its vertical center falls inside the clip and its
    /// box overlaps the clip horizontally. Lines are joined with newlines;
    /// blocks are separated by a blank line.
    pub fn text_in_rect(&self, page_number: u32, clip: BoundingBox) -> String {
        let Some(page) = self.page(page_number) else {
            return String::new();
        };

        let mut block_texts = Vec::new();
        for block in &page.blocks {
            let lines: Vec<String> = block
                .lines
                .iter()
                .filter(|line| {
                    let cy = line.bounds.center_y();
                    cy >= clip.y0
                        && cy < clip.y1
                        && line.bounds.x1 > clip.x0
                        && line.bounds.x0 < clip.x1
                })
                .map(|line| line.text())
                .collect();
            if !lines.is_empty() {
                block_texts.push(lines.join("\n"));
            }
        }

        if block_texts.is_empty() {
            String::new()
        } else {
            let mut text = block_texts.join("\n\n");
            text.push('\n');
            text
        }
    }
}

/// Abstract interface for opening and decoding a source document.
///
/// Implementations are black boxes: they own raw PDF parsing, decompression,
/// encoding and layout recovery, and hand back a materialized
/// [`DecodedDocument`].
pub trait Decoder: Send + Sync {
    /// Decode the document at `path`.
    fn decode(&self, path: &Path) -> Result<DecodedDocument>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f32, y0: f32, y1: f32) -> Span {
        Span {
            text: text.to_string(),
            font_size: size,
            font_name: "Helvetica".to_string(),
            bounds: BoundingBox::new(0.0, y0, 100.0, y1),
        }
    }

    fn line_of(spans: Vec<Span>) -> Line {
        let bounds = spans
            .iter()
            .skip(1)
            .fold(spans[0].bounds, |acc, s| acc.union(&s.bounds));
        Line { spans, bounds }
    }

    fn one_page_doc(blocks: Vec<RawBlock>) -> DecodedDocument {
        DecodedDocument {
            title: None,
            pages: vec![DecodedPage {
                number: 1,
                width: 612.0,
                height: 792.0,
                blocks,
            }],
            native_outline: Vec::new(),
        }
    }

    #[test]
    fn test_bold_font_name() {
        assert!(is_bold_font_name("Helvetica-Bold"));
        assert!(is_bold_font_name("Arial Black"));
        assert!(is_bold_font_name("SomeFont-CondB"));
        assert!(!is_bold_font_name("Times-Roman"));
    }

    #[test]
    fn test_span_style_uses_font_name() {
        let mut s = span("x", 11.7, 0.0, 12.0);
        s.font_name = "Georgia-BoldItalic".to_string();
        assert_eq!(s.style(), Style { size: 12, bold: true });
    }

    #[test]
    fn test_line_avg_font_size() {
        let line = line_of(vec![span("a", 10.0, 0.0, 10.0), span("b", 13.0, 0.0, 10.0)]);
        assert_eq!(line.rounded_avg_font_size(), Some(12));
    }

    #[test]
    fn test_text_in_rect_clips_by_line_center() {
        let block = RawBlock {
            lines: vec![
                line_of(vec![span("kept", 12.0, 100.0, 112.0)]),
                line_of(vec![span("dropped", 12.0, 300.0, 312.0)]),
            ],
            bounds: BoundingBox::new(0.0, 100.0, 100.0, 312.0),
        };
        let doc = one_page_doc(vec![block]);
        let clip = BoundingBox::new(0.0, 0.0, 612.0, 200.0);
        assert_eq!(doc.text_in_rect(1, clip), "kept\n");
    }

    #[test]
    fn test_text_in_rect_separates_blocks() {
        let b1 = RawBlock {
            lines: vec![line_of(vec![span("first", 12.0, 10.0, 22.0)])],
            bounds: BoundingBox::new(0.0, 10.0, 100.0, 22.0),
        };
        let b2 = RawBlock {
            lines: vec![line_of(vec![span("second", 12.0, 40.0, 52.0)])],
            bounds: BoundingBox::new(0.0, 40.0, 100.0, 52.0),
        };
        let doc = one_page_doc(vec![b1, b2]);
        let clip = BoundingBox::new(0.0, 0.0, 612.0, 792.0);
        assert_eq!(doc.text_in_rect(1, clip), "first\n\nsecond\n");
    }

    #[test]
    fn test_text_in_rect_missing_page() {
        let doc = one_page_doc(Vec::new());
        let clip = BoundingBox::new(0.0, 0.0, 612.0, 792.0);
        assert_eq!(doc.text_in_rect(7, clip), "");
    }
}

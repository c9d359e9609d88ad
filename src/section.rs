//! Sectionization: heading boundaries to titled, cleaned content spans.
//!
//! Each heading owns the text between its own bottom edge and the next
//! heading's top edge; the final heading runs to the end of the document.
//! Headings that carry no bounding box (native-outline entries) degrade to
//! page granularity: their boundary is the top of their page.

use unicode_normalization::UnicodeNormalization;

use crate::decode::DecodedDocument;
use crate::model::{BoundingBox, DocumentOutline, HeadingEntry, Section};

/// A vertical position in the document: a page plus a y coordinate on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBoundary {
    /// Page number (1-indexed)
    pub page: u32,

    /// Top-down y coordinate on the page
    pub y: f32,
}

impl SectionBoundary {
    /// Where a heading's own section starts: just below the heading, or the
    /// top of its page when the heading has no box (degraded path).
    fn below_heading(entry: &HeadingEntry) -> Self {
        Self {
            page: entry.page,
            y: entry.bounds.map(|bounds| bounds.y1).unwrap_or(0.0),
        }
    }

    /// Where the previous section ends: the heading's top edge, or the top
    /// of its page when the heading has no box (degraded path).
    fn at_heading_top(entry: &HeadingEntry) -> Self {
        Self {
            page: entry.page,
            y: entry.bounds.map(|bounds| bounds.y0).unwrap_or(0.0),
        }
    }
}

/// Split a document into titled sections along its outline.
///
/// Adjacent sections share their boundary exactly: section `i` ends where
/// section `i + 1` starts. Content is the heading title on its own line
/// followed by the folded text of the span.
pub fn sectionize(
    doc: &DecodedDocument,
    outline: &DocumentOutline,
    document_name: &str,
) -> Vec<Section> {
    if doc.pages.is_empty() {
        return Vec::new();
    }

    let last_page = doc.pages.len() as u32;
    let last_page_height = doc.pages[doc.pages.len() - 1].height;
    let document_end = SectionBoundary {
        page: last_page,
        y: last_page_height,
    };

    let mut sections = Vec::new();
    for (index, heading) in outline.headings.iter().enumerate() {
        let start = SectionBoundary::below_heading(heading);
        let end = outline
            .headings
            .get(index + 1)
            .map(SectionBoundary::at_heading_top)
            .unwrap_or(document_end);

        let raw = extract_range(doc, start, end);
        let cleaned = fold_whitespace(&raw);

        sections.push(Section {
            document: document_name.to_string(),
            title: heading.text.clone(),
            page: heading.page,
            content: format!("{}\n{}", heading.text, cleaned),
        });
    }
    sections
}

/// Concatenate clipped page text between two boundaries.
///
/// The start page is clipped below the start y, the end page above the end
/// y; intervening pages contribute in full.
fn extract_range(doc: &DecodedDocument, start: SectionBoundary, end: SectionBoundary) -> String {
    let mut content = String::new();
    for page_number in start.page..=end.page {
        let Some(page) = doc.page(page_number) else {
            continue;
        };

        let clip_top = if page_number == start.page { start.y } else { 0.0 };
        let clip_bottom = if page_number == end.page {
            end.y
        } else {
            page.height
        };

        if clip_top < clip_bottom {
            let clip = BoundingBox::new(0.0, clip_top, page.width, clip_bottom);
            content.push_str(&doc.text_in_rect(page_number, clip));
        }
    }
    content
}

/// Fold extracted whitespace into a paragraph-like block.
///
/// Single newlines are logical line wraps and become spaces; one space
/// preceding a newline run is dropped; runs of two or more newlines
/// collapse to a single newline; the result is trimmed. Lossy for tables
/// and code blocks: a documented heuristic, not a round-trip transform.
pub fn fold_whitespace(text: &str) -> String {
    let text: String = text.nfc().collect();

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\n' {
            out.push(c);
            continue;
        }

        let mut run = 1;
        while chars.peek() == Some(&'\n') {
            chars.next();
            run += 1;
        }
        if run == 1 {
            out.push(' ');
        } else {
            if out.ends_with(' ') {
                out.pop();
            }
            out.push('\n');
        }
    }
    out.trim().to_string()
}

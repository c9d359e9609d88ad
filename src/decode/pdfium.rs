//! Concrete [`Decoder`] backed by `pdfium-render`.
//!
//! Pdfium reports flat text segments per page in bottom-up coordinates;
//! this adapter flips the geometry, regroups segments into lines and
//! blocks, and materializes the result as a [`DecodedDocument`].

use std::path::Path;

use pdfium_render::prelude::*;

use super::{
    is_bold_font_name, DecodedDocument, DecodedPage, Decoder, Line, NativeOutlineEntry, RawBlock,
    Span,
};
use crate::error::{Error, Result};
use crate::model::BoundingBox;

/// Vertical tolerance factor for merging segments into one line.
const LINE_MERGE_FACTOR: f32 = 0.5;

/// A gap taller than this multiple of the median line height starts a new
/// block.
const BLOCK_GAP_FACTOR: f32 = 1.6;

/// Decoder adapter over the Pdfium library.
///
/// Stateless: the library is bound on every [`Decoder::decode`] call, so the
/// adapter itself is freely shareable across worker threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumDecoder;

impl PdfiumDecoder {
    /// Create a new Pdfium-backed decoder.
    pub fn new() -> Self {
        Self
    }

    fn bind() -> Result<Pdfium> {
        let local = Pdfium::pdfium_platform_library_name_at_path("./");
        if let Ok(bindings) = Pdfium::bind_to_library(&local) {
            return Ok(Pdfium::new(bindings));
        }
        Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| Error::Decode(format!("failed to bind Pdfium library: {e}")))
    }
}

impl Decoder for PdfiumDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedDocument> {
        let pdfium = Self::bind()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Decode(format!("{}: {e}", path.display())))?;

        let title = document
            .metadata()
            .get(PdfDocumentMetadataTagType::Title)
            .map(|tag| tag.value().trim().to_string())
            .filter(|value| !value.is_empty());

        let native_outline = collect_native_outline(&document);

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let number = index as u32 + 1;
            match decode_page(&page, number) {
                Ok(decoded) => pages.push(decoded),
                Err(e) => {
                    log::warn!("skipping page {number} of {}: {e}", path.display());
                    pages.push(DecodedPage {
                        number,
                        width: page.width().value,
                        height: page.height().value,
                        blocks: Vec::new(),
                    });
                }
            }
        }

        Ok(DecodedDocument {
            title,
            pages,
            native_outline,
        })
    }
}

fn decode_page(page: &PdfPage, number: u32) -> Result<DecodedPage> {
    let width = page.width().value;
    let height = page.height().value;

    let text = page
        .text()
        .map_err(|e| Error::Decode(format!("text extraction failed: {e}")))?;

    let mut spans = Vec::new();
    for segment in text.segments().iter() {
        let raw = segment.text();
        if raw.trim().is_empty() {
            continue;
        }

        let rect = segment.bounds();
        // Flip to top-down coordinates.
        let bounds = BoundingBox::new(
            rect.left().value,
            height - rect.top().value,
            rect.right().value,
            height - rect.bottom().value,
        );

        let (font_size, font_name) = segment_font(&segment);
        spans.push(Span {
            text: raw,
            font_size,
            font_name,
            bounds,
        });
    }

    let lines = group_spans_into_lines(spans);
    let blocks = group_lines_into_blocks(lines);

    Ok(DecodedPage {
        number,
        width,
        height,
        blocks,
    })
}

/// Font size and name of a segment, taken from its first character.
///
/// Pdfium reports the weight separately from the face name; when the weight
/// says bold but the name carries no bold marker, the marker is folded into
/// the name so the contract's name-based inference sees it.
fn segment_font(segment: &PdfPageTextSegment) -> (f32, String) {
    let Ok(chars) = segment.chars() else {
        return (0.0, String::new());
    };
    let Some(first) = chars.iter().next() else {
        return (0.0, String::new());
    };

    let font_size = first.scaled_font_size().value;
    let mut font_name = first.font_name();

    let weight_is_bold = match first.font_weight() {
        Some(PdfFontWeight::Weight600)
        | Some(PdfFontWeight::Weight700Bold)
        | Some(PdfFontWeight::Weight800)
        | Some(PdfFontWeight::Weight900) => true,
        Some(PdfFontWeight::Custom(weight)) => weight >= 600,
        _ => false,
    };
    if weight_is_bold && !is_bold_font_name(&font_name) {
        font_name.push_str("-Bold");
    }

    (font_size, font_name)
}

fn collect_native_outline(document: &PdfDocument) -> Vec<NativeOutlineEntry> {
    let mut entries = Vec::new();
    if let Some(root) = document.bookmarks().root() {
        walk_bookmark(&root, 1, &mut entries);
        let mut sibling = root.next_sibling();
        while let Some(bookmark) = sibling {
            walk_bookmark(&bookmark, 1, &mut entries);
            sibling = bookmark.next_sibling();
        }
    }
    entries
}

fn walk_bookmark(bookmark: &PdfBookmark, level: u32, entries: &mut Vec<NativeOutlineEntry>) {
    if let Some(title) = bookmark.title() {
        let page = bookmark
            .destination()
            .and_then(|destination| destination.page_index().ok())
            .map(|index| index as u32 + 1);
        if let Some(page) = page {
            entries.push(NativeOutlineEntry { level, title, page });
        }
    }

    let mut child = bookmark.first_child();
    while let Some(bookmark) = child {
        walk_bookmark(&bookmark, level + 1, entries);
        child = bookmark.next_sibling();
    }
}

fn group_spans_into_lines(mut spans: Vec<Span>) -> Vec<Line> {
    spans.sort_by(|a, b| {
        a.bounds
            .center_y()
            .partial_cmp(&b.bounds.center_y())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                a.bounds
                    .x0
                    .partial_cmp(&b.bounds.x0)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    let mut lines: Vec<Line> = Vec::new();
    for span in spans {
        if let Some(last) = lines.last_mut() {
            let tolerance =
                (last.bounds.height().max(span.bounds.height()) * LINE_MERGE_FACTOR).max(2.0);
            if (span.bounds.center_y() - last.bounds.center_y()).abs() <= tolerance {
                last.bounds = last.bounds.union(&span.bounds);
                last.spans.push(span);
                continue;
            }
        }
        lines.push(Line {
            bounds: span.bounds,
            spans: vec![span],
        });
    }

    for line in &mut lines {
        line.spans.sort_by(|a, b| {
            a.bounds
                .x0
                .partial_cmp(&b.bounds.x0)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    lines
}

fn group_lines_into_blocks(lines: Vec<Line>) -> Vec<RawBlock> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut heights: Vec<f32> = lines.iter().map(|line| line.bounds.height()).collect();
    heights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_height = heights[heights.len() / 2].max(1.0);
    let gap_threshold = median_height * BLOCK_GAP_FACTOR;

    let mut blocks: Vec<RawBlock> = Vec::new();
    for line in lines {
        if let Some(block) = blocks.last_mut() {
            let gap = line.bounds.y0 - block.bounds.y1;
            if gap <= gap_threshold {
                block.bounds = block.bounds.union(&line.bounds);
                block.lines.push(line);
                continue;
            }
        }
        blocks.push(RawBlock {
            bounds: line.bounds,
            lines: vec![line],
        });
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_at(text: &str, y0: f32, y1: f32, x0: f32) -> Span {
        Span {
            text: text.to_string(),
            font_size: 12.0,
            font_name: "Helvetica".to_string(),
            bounds: BoundingBox::new(x0, y0, x0 + 40.0, y1),
        }
    }

    #[test]
    fn test_spans_on_same_baseline_merge() {
        let lines = group_spans_into_lines(vec![
            span_at("world", 100.0, 112.0, 60.0),
            span_at("hello", 100.5, 112.5, 10.0),
        ]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "hello world");
    }

    #[test]
    fn test_distant_spans_stay_separate_lines() {
        let lines = group_spans_into_lines(vec![
            span_at("first", 100.0, 112.0, 10.0),
            span_at("second", 130.0, 142.0, 10.0),
        ]);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_block_break_on_large_gap() {
        let lines = group_spans_into_lines(vec![
            span_at("para one line one", 100.0, 112.0, 10.0),
            span_at("para one line two", 114.0, 126.0, 10.0),
            span_at("para two", 180.0, 192.0, 10.0),
        ]);
        let blocks = group_lines_into_blocks(lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines.len(), 2);
    }
}

//! Title resolution: document metadata first, largest first-page text second.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::decode::DecodedDocument;

/// Fraction of the first page (from the top) searched for title lines.
const TITLE_REGION: f32 = 0.4;

/// Lines of this many words or more are prose, not title material.
const MAX_TITLE_LINE_WORDS: usize = 20;

/// Filename-like suffix that disqualifies a metadata title.
static FILE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(pdf|docx?|pptx?|xlsx?|cdr)$").unwrap());

/// Resolve the document title.
///
/// Preference order: an acceptable metadata title, then the largest-sized
/// lines in the top 40% of page 1 joined with spaces, then the empty string.
pub fn resolve_title(doc: &DecodedDocument) -> String {
    if let Some(title) = doc.title.as_deref() {
        let title = title.trim();
        if is_acceptable_metadata_title(title) {
            return title.to_string();
        }
    }

    largest_first_page_lines(doc).unwrap_or_default()
}

/// Whether a metadata title is usable: long enough, not filename-like, not a
/// producer placeholder.
fn is_acceptable_metadata_title(title: &str) -> bool {
    title.chars().count() > 4
        && !FILE_EXTENSION.is_match(title)
        && !title.contains("Microsoft Word")
        && title != "Untitled"
}

/// Join the lines sharing the single largest rounded font size among
/// qualifying lines in the top region of page 1.
fn largest_first_page_lines(doc: &DecodedDocument) -> Option<String> {
    let first_page = doc.page(1)?;
    let cutoff = first_page.height * TITLE_REGION;

    let mut lines_by_size: BTreeMap<i32, Vec<String>> = BTreeMap::new();
    for block in &first_page.blocks {
        for line in &block.lines {
            if line.bounds.center_y() >= cutoff {
                continue;
            }
            let text = line.text();
            if text.is_empty()
                || !text.chars().any(char::is_alphabetic)
                || text.split_whitespace().count() >= MAX_TITLE_LINE_WORDS
            {
                continue;
            }
            if let Some(size) = line.rounded_avg_font_size() {
                lines_by_size.entry(size).or_default().push(text);
            }
        }
    }

    lines_by_size
        .into_iter()
        .next_back()
        .map(|(_, lines)| lines.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{DecodedPage, Line, RawBlock, Span};
    use crate::model::BoundingBox;

    fn line_at(text: &str, size: f32, y0: f32) -> Line {
        let bounds = BoundingBox::new(50.0, y0, 400.0, y0 + size);
        Line {
            spans: vec![Span {
                text: text.to_string(),
                font_size: size,
                font_name: "Helvetica".to_string(),
                bounds,
            }],
            bounds,
        }
    }

    fn doc_with_first_page_lines(title: Option<&str>, lines: Vec<Line>) -> DecodedDocument {
        let bounds = lines
            .first()
            .map(|line| {
                lines
                    .iter()
                    .skip(1)
                    .fold(line.bounds, |acc, l| acc.union(&l.bounds))
            })
            .unwrap_or(BoundingBox::new(0.0, 0.0, 0.0, 0.0));
        DecodedDocument {
            title: title.map(str::to_string),
            pages: vec![DecodedPage {
                number: 1,
                width: 612.0,
                height: 792.0,
                blocks: vec![RawBlock { lines, bounds }],
            }],
            native_outline: Vec::new(),
        }
    }

    #[test]
    fn test_metadata_title_preferred() {
        let doc = doc_with_first_page_lines(
            Some("Deep Learning Survey"),
            vec![line_at("Something Large", 30.0, 40.0)],
        );
        assert_eq!(resolve_title(&doc), "Deep Learning Survey");
    }

    #[test]
    fn test_filename_metadata_rejected() {
        let doc = doc_with_first_page_lines(
            Some("report_final.pdf"),
            vec![line_at("Actual Title", 30.0, 40.0)],
        );
        assert_eq!(resolve_title(&doc), "Actual Title");
    }

    #[test]
    fn test_short_and_placeholder_metadata_rejected() {
        assert!(!is_acceptable_metadata_title("Doc"));
        assert!(!is_acceptable_metadata_title("Microsoft Word - notes"));
        assert!(!is_acceptable_metadata_title("Untitled"));
        assert!(is_acceptable_metadata_title("Operating Manual"));
    }

    #[test]
    fn test_largest_lines_joined_in_order() {
        let doc = doc_with_first_page_lines(
            None,
            vec![
                line_at("Subtitle text", 14.0, 120.0),
                line_at("The Grand", 28.0, 40.0),
                line_at("Design", 28.0, 75.0),
            ],
        );
        assert_eq!(resolve_title(&doc), "The Grand Design");
    }

    #[test]
    fn test_lines_below_region_ignored() {
        let doc = doc_with_first_page_lines(
            None,
            vec![
                line_at("Top Heading", 18.0, 40.0),
                // Larger, but below the 40% cutoff (792 * 0.4 = 316.8).
                line_at("Giant Footer", 36.0, 500.0),
            ],
        );
        assert_eq!(resolve_title(&doc), "Top Heading");
    }

    #[test]
    fn test_empty_document_gives_empty_title() {
        let doc = DecodedDocument::default();
        assert_eq!(resolve_title(&doc), "");
    }
}

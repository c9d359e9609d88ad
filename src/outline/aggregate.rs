//! Span aggregation: raw decoder output to logical text blocks.
//!
//! First pass of the outline pipeline. Each text-type layout block becomes
//! one [`TextBlock`] tagged with a single dominant style; blocks with no
//! semantic content (rules, page numbers, decorations) are discarded.

use std::collections::HashMap;

use crate::decode::DecodedDocument;
use crate::model::{Style, TextBlock};

/// Reconstruct logical text blocks for a whole document.
///
/// Output is ordered by page, then document order within the page. Pure
/// transformation: the decoded document is not modified.
pub fn aggregate_blocks(doc: &DecodedDocument) -> Vec<TextBlock> {
    let mut blocks = Vec::new();

    for page in &doc.pages {
        for raw in &page.blocks {
            let mut text_parts = Vec::new();
            let mut span_styles = Vec::new();
            for line in &raw.lines {
                for span in &line.spans {
                    text_parts.push(span.text.as_str());
                    span_styles.push(span.style());
                }
            }

            let text = text_parts.join(" ").trim().to_string();
            if text.is_empty() || !text.chars().any(char::is_alphabetic) {
                continue;
            }

            let Some(style) = dominant_style(&span_styles) else {
                continue;
            };

            let word_count = text.split_whitespace().count();
            blocks.push(TextBlock {
                text,
                style,
                bounds: raw.bounds,
                page: page.number,
                line_count: raw.lines.len(),
                word_count,
            });
        }
    }

    blocks
}

/// Majority style over a block's spans; ties go to the style seen first.
fn dominant_style(styles: &[Style]) -> Option<Style> {
    let mut counts: HashMap<Style, (usize, usize)> = HashMap::new();
    for (index, style) in styles.iter().enumerate() {
        let entry = counts.entry(*style).or_insert((0, index));
        entry.0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(style, _)| style)
}

//! Body-style inference: which typographic class is ordinary paragraph text.
//!
//! Headings are defined relative to this baseline, so the election runs
//! before any heading filtering. Body text dominates total word volume even
//! when no single style wins by block count, hence the word-count weighting.

use std::collections::BTreeMap;

use crate::model::{Style, TextBlock};

/// Determine the style of ordinary paragraph text.
///
/// Substantial blocks (more than 2 lines or more than 20 words) vote with
/// their word counts; the style with the highest total wins. When no block
/// is substantial, the most frequent style by block count wins instead.
/// Returns `None` for an empty document: the caller must treat it as
/// headingless.
pub fn infer_body_style(blocks: &[TextBlock]) -> Option<Style> {
    let mut word_totals: BTreeMap<Style, usize> = BTreeMap::new();
    for block in blocks {
        if block.is_substantial() {
            *word_totals.entry(block.style).or_insert(0) += block.word_count;
        }
    }

    if let Some(style) = election_winner(&word_totals) {
        return Some(style);
    }

    // No substantial blocks: fall back to plain block frequency.
    let mut frequencies: BTreeMap<Style, usize> = BTreeMap::new();
    for block in blocks {
        *frequencies.entry(block.style).or_insert(0) += 1;
    }
    election_winner(&frequencies)
}

/// Highest-count style; ties resolved by the styles' total order so repeated
/// runs agree.
fn election_winner(counts: &BTreeMap<Style, usize>) -> Option<Style> {
    counts
        .iter()
        .max_by(|(style_a, count_a), (style_b, count_b)| {
            count_a.cmp(count_b).then(style_a.cmp(style_b))
        })
        .map(|(style, _)| *style)
}

//! Heading classification and hierarchy mapping.
//!
//! Filters blocks that are stylistically and structurally heading-like
//! relative to the inferred body style, then derives a consistent H1..H4
//! hierarchy from the surviving candidate styles. Explicit numbering in the
//! heading text overrides the style-derived level.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{HeadingEntry, HeadingLevel, Style, TextBlock};

/// Headings longer than this many words are rejected.
const MAX_HEADING_WORDS: usize = 30;

/// Headings taller than this many lines are rejected.
const MAX_HEADING_LINES: usize = 3;

/// Table-of-contents leader dots: a run of 4+ periods.
static LEADER_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{4,}").unwrap());

/// Bulleted or lettered list-item marker at the start of the text.
static LIST_ITEM_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([•*\-]|[a-zA-Z\d]+\))\s+").unwrap());

/// Leading numbering pattern: digits separated by single periods, then
/// whitespace ("2", "2.1", "3.2.1", ...).
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+(\.\d+)*)\s+").unwrap());

/// Whether a block survives the heading candidate filter.
///
/// A block is rejected when it is too long, not more prominent than the
/// body style, sentence-like, a table-of-contents row, or a list item.
pub fn is_heading_candidate(block: &TextBlock, body_style: &Style) -> bool {
    if block.word_count > MAX_HEADING_WORDS || block.line_count > MAX_HEADING_LINES {
        return false;
    }
    if !block.style.is_more_prominent_than(body_style) {
        return false;
    }

    let text = block.text.trim();
    if LEADER_DOTS.is_match(text) {
        return false;
    }
    if text.ends_with(['.', ',', ';', ':']) {
        return false;
    }
    if LIST_ITEM_START.is_match(text) {
        return false;
    }

    true
}

/// Map each candidate style to a hierarchy level.
///
/// Distinct sizes are ranked descending; the top four become H1..H4 and the
/// rest are dropped. Bold and non-bold variants of one size share its level:
/// bold is a tie-break signal during filtering, not a separate level.
pub fn assign_levels(candidate_styles: &[Style]) -> HashMap<Style, HeadingLevel> {
    let mut size_groups: BTreeMap<i32, Vec<Style>> = BTreeMap::new();
    for style in candidate_styles {
        let group = size_groups.entry(style.size).or_default();
        if !group.contains(style) {
            group.push(*style);
        }
    }

    let mut map = HashMap::new();
    for (rank, (_, styles)) in size_groups.iter().rev().take(4).enumerate() {
        let level = HeadingLevel::from_depth(rank + 1);
        for style in styles {
            map.insert(*style, level);
        }
    }
    map
}

/// Level forced by a leading numbering pattern, when present.
///
/// "2.1 Overview" has one dot, forcing H2 regardless of the style-derived
/// level. Depths past four clamp to H4.
pub fn numeric_prefix_level(text: &str) -> Option<HeadingLevel> {
    NUMERIC_PREFIX.captures(text).map(|caps| {
        let dot_count = caps[1].matches('.').count();
        HeadingLevel::from_depth(dot_count + 1)
    })
}

/// Collapse internal whitespace runs to single spaces.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classify candidate blocks into ordered heading entries.
///
/// `title` is the resolved document title; an H1 on page 1 matching it
/// exactly is the title itself, not a heading, and is dropped.
pub fn classify_headings(
    blocks: &[TextBlock],
    body_style: &Style,
    title: &str,
) -> Vec<HeadingEntry> {
    let candidates: Vec<&TextBlock> = blocks
        .iter()
        .filter(|block| is_heading_candidate(block, body_style))
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let styles: Vec<Style> = candidates.iter().map(|block| block.style).collect();
    let level_map = assign_levels(&styles);

    let mut headings = Vec::new();
    for block in candidates {
        let Some(&style_level) = level_map.get(&block.style) else {
            continue;
        };

        let text = normalize_whitespace(&block.text);
        let level = numeric_prefix_level(&text).unwrap_or(style_level);

        if level == HeadingLevel::H1 && block.page == 1 && text == title {
            continue;
        }

        headings.push(HeadingEntry::new(level, text, block.page, block.bounds));
    }

    headings.sort_by(|a, b| {
        let ya = a.bounds.map(|bounds| bounds.y0).unwrap_or(0.0);
        let yb = b.bounds.map(|bounds| bounds.y0).unwrap_or(0.0);
        a.page
            .cmp(&b.page)
            .then(ya.partial_cmp(&yb).unwrap_or(std::cmp::Ordering::Equal))
    });
    headings
}

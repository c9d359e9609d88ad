//! Outline inference: title plus H1..H4 heading hierarchy.
//!
//! The extractor runs an ordered chain of named strategies. The embedded
//! native outline wins when the file carries one; otherwise the statistical
//! style heuristic reconstructs the hierarchy from visual signals alone.

pub mod aggregate;
pub mod body;
pub mod headings;
pub mod title;

pub use aggregate::aggregate_blocks;
pub use body::infer_body_style;
pub use headings::{assign_levels, classify_headings, is_heading_candidate, numeric_prefix_level};
pub use title::resolve_title;

use crate::decode::DecodedDocument;
use crate::model::{DocumentOutline, HeadingEntry, HeadingLevel};

/// One way of deriving an outline from a decoded document.
///
/// Strategies are tried in priority order; the first to return a result
/// wins. Each returns `None` when it has nothing to offer, so every
/// fallback is testable in isolation.
pub trait OutlineStrategy {
    /// Short name, used in logs.
    fn name(&self) -> &'static str;

    /// Attempt to derive headings. `title` is the already-resolved document
    /// title.
    fn try_extract(&self, doc: &DecodedDocument, title: &str) -> Option<Vec<HeadingEntry>>;
}

/// Fast path: the outline embedded by the producing application.
///
/// Entries keep their native levels (1-4 only; deeper entries are dropped)
/// and carry no bounding boxes, so downstream consumers degrade to
/// page-granularity spans.
pub struct NativeOutlineStrategy;

impl OutlineStrategy for NativeOutlineStrategy {
    fn name(&self) -> &'static str {
        "native-outline"
    }

    fn try_extract(&self, doc: &DecodedDocument, _title: &str) -> Option<Vec<HeadingEntry>> {
        let headings: Vec<HeadingEntry> = doc
            .native_outline
            .iter()
            .filter(|entry| (1..=4).contains(&entry.level))
            .filter(|entry| entry.title.chars().any(char::is_alphabetic))
            .map(|entry| {
                HeadingEntry::without_bounds(
                    HeadingLevel::from_depth(entry.level as usize),
                    entry.title.trim(),
                    entry.page,
                )
            })
            .collect();

        if headings.is_empty() {
            None
        } else {
            Some(headings)
        }
    }
}

/// Heuristic path: multi-pass statistical analysis of visual styles.
pub struct StyleHeuristicStrategy;

impl OutlineStrategy for StyleHeuristicStrategy {
    fn name(&self) -> &'static str {
        "style-heuristic"
    }

    fn try_extract(&self, doc: &DecodedDocument, title: &str) -> Option<Vec<HeadingEntry>> {
        let blocks = aggregate_blocks(doc);
        if blocks.is_empty() {
            return None;
        }

        let body_style = infer_body_style(&blocks)?;
        let headings = classify_headings(&blocks, &body_style, title);
        if headings.is_empty() {
            None
        } else {
            Some(headings)
        }
    }
}

/// Outline extractor: resolves the title, then tries each strategy in
/// priority order.
pub struct OutlineExtractor {
    strategies: Vec<Box<dyn OutlineStrategy + Send + Sync>>,
}

impl OutlineExtractor {
    /// Extractor with the default strategy chain: native outline, then the
    /// style heuristic.
    pub fn new() -> Self {
        Self {
            strategies: vec![
                Box::new(NativeOutlineStrategy),
                Box::new(StyleHeuristicStrategy),
            ],
        }
    }

    /// Derive the outline of a decoded document.
    ///
    /// Degrades to an empty heading list when no strategy produces a
    /// result; the title is resolved regardless.
    pub fn extract(&self, doc: &DecodedDocument) -> DocumentOutline {
        let title = resolve_title(doc);

        for strategy in &self.strategies {
            if let Some(headings) = strategy.try_extract(doc, &title) {
                log::debug!(
                    "outline strategy '{}' produced {} headings",
                    strategy.name(),
                    headings.len()
                );
                return DocumentOutline { title, headings };
            }
        }

        log::debug!("no outline strategy produced headings");
        DocumentOutline::titled(title)
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

//! Section types: titled content spans and their ranked form.

use serde::{Deserialize, Serialize};

/// The content between one heading and the next (or the document end),
/// prefixed by its heading title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Source document identifier (filename)
    pub document: String,

    /// Section title, taken from the heading
    pub title: String,

    /// Page number of the heading (1-indexed)
    pub page: u32,

    /// Cleaned section content: title line followed by the folded body text
    pub content: String,
}

/// A section paired with its relevance score.
///
/// Produced only by the ranker, which returns new records rather than
/// annotating shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSection {
    /// The underlying section
    pub section: Section,

    /// Cosine similarity between the section and the persona/task query
    pub score: f64,
}

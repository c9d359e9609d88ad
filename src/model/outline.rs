//! Outline types: heading levels, heading entries, and the document outline.

use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// Hierarchy level of a heading, H1 (most prominent) through H4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
    /// Fourth-level heading
    H4,
}

impl HeadingLevel {
    /// Level for a 1-based hierarchy depth, clamped to H4.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        }
    }

    /// 1-based ordinal of this level.
    pub fn depth(&self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A single inferred heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Assigned hierarchy level
    pub level: HeadingLevel,

    /// Whitespace-normalized heading text
    pub text: String,

    /// Owning page number (1-indexed)
    pub page: u32,

    /// Position on the page. Absent when the entry came from an embedded
    /// native outline; downstream consumers must tolerate the gap.
    pub bounds: Option<BoundingBox>,
}

impl HeadingEntry {
    /// Create a heading entry with a known position.
    pub fn new(
        level: HeadingLevel,
        text: impl Into<String>,
        page: u32,
        bounds: BoundingBox,
    ) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            bounds: Some(bounds),
        }
    }

    /// Create a heading entry without position information.
    pub fn without_bounds(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            bounds: None,
        }
    }
}

/// The inferred outline of one document: a title plus ordered headings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Resolved document title (may be empty)
    pub title: String,

    /// Headings ordered by (page, vertical position)
    pub headings: Vec<HeadingEntry>,
}

impl DocumentOutline {
    /// Outline with a title and no headings.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headings: Vec::new(),
        }
    }

    /// Whether the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }
}

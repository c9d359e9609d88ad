//! Data model for the outline and ranking pipeline.

mod block;
mod outline;
mod section;

pub use block::{BoundingBox, Style, TextBlock};
pub use outline::{DocumentOutline, HeadingEntry, HeadingLevel};
pub use section::{RankedSection, Section};

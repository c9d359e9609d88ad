//! # pdfsift
//!
//! Persona-driven PDF section extraction for Rust.
//!
//! pdfsift derives a hierarchical outline (title plus nested H1..H4
//! headings) from an unstructured PDF using only visual and typographic
//! signals, splits the document into titled content sections along that
//! outline, and ranks the sections by semantic relevance to a stated
//! persona and task.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsift::{analyze_collection, CollectionConfig, HashEmbedder, PdfiumDecoder};
//! use std::path::Path;
//!
//! fn main() -> pdfsift::Result<()> {
//!     let config = CollectionConfig::load(Path::new("challenge1b_input.json"))?;
//!     let decoder = PdfiumDecoder::new();
//!     let embedder = HashEmbedder::default();
//!
//!     let output = analyze_collection(&config, Path::new("PDFs"), &decoder, &embedder)?;
//!     println!("{}", serde_json::to_string_pretty(&output)?);
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! - **Span aggregation**: raw glyph spans become logical text blocks, each
//!   tagged with one dominant (size, bold) style.
//! - **Body-style inference**: the style carrying the most word volume in
//!   substantial blocks is the paragraph baseline.
//! - **Heading classification**: blocks more prominent than the baseline
//!   and structurally heading-like get levels from the top four candidate
//!   sizes; explicit "2.1"-style numbering overrides the visual level.
//! - **Sectionization**: heading boundaries become page/coordinate spans
//!   whose text is extracted and folded into paragraph-like content.
//! - **Ranking**: sections are embedded and ordered by cosine similarity
//!   to the persona/task query.
//!
//! Documents with an embedded native outline skip the heuristics entirely.

pub mod decode;
pub mod error;
pub mod model;
pub mod outline;
pub mod pipeline;
pub mod rank;
pub mod section;

// Re-export commonly used types
pub use decode::{DecodedDocument, Decoder, PdfiumDecoder};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, DocumentOutline, HeadingEntry, HeadingLevel, RankedSection, Section, Style,
    TextBlock,
};
pub use outline::OutlineExtractor;
pub use pipeline::{
    AnalysisOutput, CollectionAnalyzer, CollectionConfig, DocumentRef, JobToBeDone, Persona,
};
pub use rank::{Embedder, HashEmbedder};

use std::path::Path;

/// Extract the outline of a single PDF file with the default decoder.
///
/// # Example
///
/// ```no_run
/// let outline = pdfsift::extract_outline("document.pdf").unwrap();
/// println!("{}: {} headings", outline.title, outline.headings.len());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    extract_outline_with_decoder(path, &PdfiumDecoder::new())
}

/// Extract the outline of a single document through a specific decoder.
pub fn extract_outline_with_decoder<P: AsRef<Path>>(
    path: P,
    decoder: &dyn Decoder,
) -> Result<DocumentOutline> {
    let doc = decoder.decode(path.as_ref())?;
    Ok(OutlineExtractor::new().extract(&doc))
}

/// Analyze a document collection: outline, sectionize and rank every
/// document, producing the final output record.
///
/// Per-document failures are logged and skipped; an embedding failure
/// aborts the run.
pub fn analyze_collection(
    config: &CollectionConfig,
    pdf_dir: &Path,
    decoder: &dyn Decoder,
    embedder: &dyn Embedder,
) -> Result<AnalysisOutput> {
    CollectionAnalyzer::new(decoder, embedder).analyze(config, pdf_dir)
}

//! Error types for the pdfsift library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The decoder could not open or parse a source document.
    ///
    /// Caught at the per-document boundary: the document is skipped with a
    /// warning and processing continues with the rest of the collection.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The embedding collaborator failed or is unavailable.
    ///
    /// Fatal for the whole run: ranking has no fallback.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// The collection configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Decode("truncated xref table".to_string());
        assert_eq!(err.to_string(), "Decode error: truncated xref table");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}

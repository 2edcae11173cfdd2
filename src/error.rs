//! Error types for web-clip.
//!
//! This module defines the error types returned by extraction operations.
//! Not finding an article is not an error: the pipeline falls back to the
//! whole body.

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Selection-only mode was requested without a non-collapsed selection.
    #[error("No selection to extract")]
    NoSelection,

    /// No extractable content was found and `fail_on_empty` is set.
    #[error("No extractable content found")]
    NoContent,

    /// The configured page URL could not be parsed.
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),

    /// Host-supplied input could not be read.
    #[error("Input could not be read: {0}")]
    ParseError(String),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for research deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a deck.
///
/// Parsing the research document or the theme never fails; malformed
/// input degrades to empty sections and fallback colors instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The research document does not exist.
    #[error("Input document not found: {0}")]
    MissingDocument(String),

    /// The theme description does not exist.
    #[error("Theme file not found: {0}")]
    MissingTheme(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing or parsing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// Failed to serialize or deserialize a deck description or options.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

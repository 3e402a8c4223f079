//! Error types for the gutindex library.

use std::io;
use thiserror::Error;

/// Result type alias for gutindex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a catalog parse.
///
/// Conditions the parser recovers from (undated sections, unresolved month
/// names, discarded item blocks) are not errors; they are reported through
/// [`crate::model::CatalogStats`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the catalog.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The listing marker is missing or appears more than once.
    #[error("Malformed catalog: expected exactly one listing marker, found {markers}")]
    MalformedDocument {
        /// Number of listing markers found in the document.
        markers: usize,
    },

    /// The input bytes are not valid UTF-8 text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A section selection string could not be parsed.
    #[error("Invalid section selection: {0}")]
    InvalidSectionSelection(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

//! Error types for docsmith library.

use std::io;
use thiserror::Error;

/// Result type alias for docsmith operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling documents.
///
/// Missing data fields are never reported here: they resolve to fallback
/// text. Only conditions that must abort a render produce an error, and an
/// aborted render never yields partial output.
#[derive(Error, Debug)]
pub enum Error {
    /// The document type identifier is not registered.
    #[error("Unknown document type: {0}")]
    UnknownDocumentType(String),

    /// An invoice line item failed validation before computation.
    #[error("Invalid line item at index {index}: {field} is not a valid non-negative amount (got {value})")]
    InvalidLineItem {
        /// Zero-based index of the offending item
        index: usize,
        /// Field that failed validation
        field: &'static str,
        /// Offending value as supplied
        value: String,
    },

    /// The data object has the wrong shape where a shape is required.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The document type registry failed its startup validation.
    #[error("Registry error: {0}")]
    Registry(String),

    /// Error serializing rendered output.
    #[error("Rendering error: {0}")]
    Render(String),

    /// I/O error when reading or writing stored documents.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a data file or stored record.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Persistence collaborator failure.
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Index of the failing line item, if this is a line item error.
    pub fn line_item_index(&self) -> Option<usize> {
        match self {
            Error::InvalidLineItem { index, .. } => Some(*index),
            _ => None,
        }
    }
}

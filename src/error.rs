//! Error types for SSP parsing and extraction
//!
//! Only two things surface as errors from this crate: input that cannot be
//! parsed as an XML tree at all, and an extractor handed a node of the wrong
//! structural category. Missing sections and unrecognized values are reported
//! through [`ValidationResult`](crate::compliance::ValidationResult) or
//! absorbed by explicit defaults instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, SspError>;

/// Errors raised by the tree, extractors, and orchestrator
#[derive(Error, Debug)]
pub enum SspError {
    /// The input is not a well-formed XML document
    #[error("Malformed document at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    /// An extractor was handed a text, comment, or document node
    #[error("Node {node} is not an element")]
    NotAnElement { node: usize },

    /// An extractor was handed an element with the wrong local name
    #[error("Expected <{expected}> element, found <{found}>")]
    UnexpectedElement { expected: String, found: String },

    /// Failed to read the source document
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SspError {
    /// Create a malformed-document error
    pub fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            message: message.into(),
        }
    }

    /// Whether this error means the input stream itself was unusable
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Io { .. })
    }
}

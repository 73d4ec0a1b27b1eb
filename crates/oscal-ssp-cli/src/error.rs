//! Error types for the oscal-ssp CLI

use thiserror::Error;

use oscal_ssp::SspError;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Parsing, reading, or extraction failed
    #[error(transparent)]
    Ssp(#[from] SspError),

    /// Structural validation reported errors
    #[error("Validation failed with {count} error(s)")]
    ValidationFailed { count: usize },

    /// Strict mode and validation reported warnings
    #[error("Strict mode: {count} warning(s) treated as errors")]
    StrictWarnings { count: usize },

    /// A path did not resolve to any node
    #[error("No node at {xpath}")]
    NoMatch { xpath: String },

    /// Logging could not be initialized
    #[error(transparent)]
    Observability(#[from] oscal_ssp::observability::ObservabilityError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a no-match error for a path
    pub fn no_match(xpath: impl Into<String>) -> Self {
        Self::NoMatch {
            xpath: xpath.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CliError::ValidationFailed { count: 2 }.to_string(),
            "Validation failed with 2 error(s)"
        );
        assert_eq!(CliError::no_match("/a[1]").to_string(), "No node at /a[1]");
    }

    #[test]
    fn test_ssp_error_is_transparent() {
        let err: CliError = SspError::malformed(3, "bad").into();
        assert_eq!(err.to_string(), "Malformed document at byte 3: bad");
    }
}

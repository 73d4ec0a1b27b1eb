//! Extraction configuration
//!
//! Provides a builder-pattern configuration for the extraction pipeline.

use crate::OSCAL_NAMESPACE;

/// Default number of requirements in one `control-implementation` before
/// extraction fans out across threads
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for [`Extractor`](crate::Extractor) and
/// [`DocumentValidator`](crate::compliance::DocumentValidator)
///
/// # Example
///
/// ```ignore
/// use oscal_ssp::ExtractionConfig;
///
/// // Load from environment variables
/// let config = ExtractionConfig::from_env();
///
/// // Or build programmatically
/// let config = ExtractionConfig::builder()
///     .parallel(true)
///     .parallel_threshold(16)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Namespace the root element must carry when validating
    ///
    /// Extraction recognizes children by the root's actual namespace.
    pub expected_namespace: String,

    /// Extract requirements on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,

    /// Minimum requirement count before parallel extraction kicks in
    pub parallel_threshold: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            expected_namespace: OSCAL_NAMESPACE.to_string(),
            parallel: cfg!(feature = "parallel"),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ExtractionConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OSCAL_NAMESPACE`: expected root namespace (default: OSCAL 1.0)
    /// - `SSP_PARALLEL`: "true"/"false" (default: "true" when built with `parallel`)
    /// - `SSP_PARALLEL_THRESHOLD`: requirement count (default: 64)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let expected_namespace = std::env::var("OSCAL_NAMESPACE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.expected_namespace);

        let parallel = std::env::var("SSP_PARALLEL")
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(defaults.parallel);

        let parallel_threshold = std::env::var("SSP_PARALLEL_THRESHOLD")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.parallel_threshold);

        Self {
            expected_namespace,
            parallel,
            parallel_threshold,
        }
    }

    /// Create a new builder for programmatic configuration.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

/// Builder for ExtractionConfig
#[derive(Debug, Clone, Default)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    /// Set the expected root namespace.
    pub fn expected_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.expected_namespace = namespace.into();
        self
    }

    /// Enable or disable parallel extraction.
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.config.parallel = enabled;
        self
    }

    /// Set the requirement count at which extraction goes parallel.
    pub fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ExtractionConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.expected_namespace, OSCAL_NAMESPACE);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_builder() {
        let config = ExtractionConfig::builder()
            .expected_namespace("urn:custom")
            .parallel(false)
            .parallel_threshold(2)
            .build();
        assert_eq!(config.expected_namespace, "urn:custom");
        assert!(!config.parallel);
        assert_eq!(config.parallel_threshold, 2);
    }
}

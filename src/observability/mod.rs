//! Observability Infrastructure
//!
//! Library code logs through the standard `tracing` macros and never installs
//! a subscriber itself. Binaries call [`init`] once at startup.
//!
//! # Events
//!
//! | Level | Source | Fields |
//! |-------|--------|--------|
//! | `debug` | extraction | per section, per skipped requirement (`ordinal`) |
//! | `info` | extraction | `controls`, `skipped`, section presence |
//! | `info` | validation | `valid`, `errors`, `warnings` |
//! | `debug` | classification | `value` (unrecognized level), `error` (unparsable input) |
//!
//! # Usage
//!
//! ```ignore
//! use oscal_ssp::observability::{init, LogFormat, ObservabilityConfig};
//!
//! // From environment variables
//! init(&ObservabilityConfig::from_env())?;
//!
//! // Or programmatically
//! let config = ObservabilityConfig::builder()
//!     .log_format(LogFormat::Json)
//!     .log_filter("oscal_ssp=debug")
//!     .build();
//! init(&config)?;
//! ```

mod config;
mod providers;

pub use config::{LogFormat, ObservabilityConfig, ObservabilityConfigBuilder};

use tracing::debug;

/// Install the global tracing subscriber.
///
/// `RUST_LOG`, when set, takes precedence over
/// [`ObservabilityConfig::log_filter`]. Output goes to stderr so that
/// command output on stdout stays machine-readable.
///
/// # Errors
///
/// Returns an error if the filter does not parse or a global subscriber is
/// already installed.
pub fn init(config: &ObservabilityConfig) -> Result<(), ObservabilityError> {
    providers::init_tracing(config)?;

    debug!(
        log_format = ?config.log_format,
        log_filter = %config.log_filter,
        "Observability initialized"
    );

    Ok(())
}

/// Observability initialization errors
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    /// Invalid configuration
    #[error("Observability config error: {0}")]
    Config(String),

    /// Subscriber installation failed
    #[error("Provider error: {0}")]
    Provider(String),
}

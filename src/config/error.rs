//! Configuration errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment could not be read or deserialized
    #[error("Cannot read MEMORIAL__* settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that parsed but is out of its allowed range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    MissingRequired(&'static str),

    #[error("extraction.version_scan_pages must be at least 1")]
    InvalidVersionScanPages,

    #[error("extraction.max_pages must be at least 1")]
    InvalidMaxPages,

    #[error("export.pdf_timeout_secs must be between 1 and 600")]
    InvalidTimeout,

    #[error("logging.level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

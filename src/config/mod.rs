//! Application configuration module
//!
//! Configuration is read from environment variables (and a `.env` file when
//! present) using the `config` and `dotenvy` crates. Variables carry the
//! `MEMORIAL` prefix and nested values use double underscores.
//!
//! # Example
//!
//! ```no_run
//! use memorial_descritivo::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Writing documents to {}", config.export.output_dir.display());
//! ```

mod error;
mod export;
mod extraction;
mod logging;
mod organization;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use extraction::ExtractionConfig;
pub use logging::LoggingConfig;
pub use organization::OrganizationConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment is a valid setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Override persistence (backend, data directory)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Bulletin extraction limits
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Letterhead lines
    #[serde(default)]
    pub organization: OrganizationConfig,

    /// Output directory and PDF conversion
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `MEMORIAL__STORAGE__BACKEND=memory` -> `storage.backend = memory`
    /// - `MEMORIAL__EXPORT__PDF_TIMEOUT_SECS=60` -> `export.pdf_timeout_secs = 60`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEMORIAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.extraction.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

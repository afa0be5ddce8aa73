//! Document export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::document::DEFAULT_PDF_TIMEOUT_SECS;

const MAX_PDF_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Pandoc executable; searched on PATH when unset
    pub pandoc_path: Option<String>,

    #[serde(default = "default_pdf_timeout")]
    pub pdf_timeout_secs: u64,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("export.output_dir"));
        }
        if self.pdf_timeout_secs == 0 || self.pdf_timeout_secs > MAX_PDF_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pandoc_path: None,
            pdf_timeout_secs: default_pdf_timeout(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./out")
}

fn default_pdf_timeout() -> u64 {
    DEFAULT_PDF_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExportConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./out"));
        assert_eq!(config.pdf_timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn timeout_bounds_are_enforced() {
        for secs in [0, 601] {
            let config = ExportConfig {
                pdf_timeout_secs: secs,
                ..Default::default()
            };
            assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
        }
    }
}

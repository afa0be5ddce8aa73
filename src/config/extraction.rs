//! Bulletin extraction configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::extraction::DEFAULT_MAX_PAGES;
use crate::domain::extraction::DEFAULT_VERSION_SCAN_PAGES;

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Leading pages searched for the bulletin number
    #[serde(default = "default_version_scan_pages")]
    pub version_scan_pages: usize,

    /// Larger documents are rejected
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version_scan_pages == 0 {
            return Err(ValidationError::InvalidVersionScanPages);
        }
        if self.max_pages == 0 {
            return Err(ValidationError::InvalidMaxPages);
        }
        Ok(())
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            version_scan_pages: default_version_scan_pages(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_version_scan_pages() -> usize {
    DEFAULT_VERSION_SCAN_PAGES
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_scan_three_pages() {
        let config = ExtractionConfig::default();
        assert_eq!(config.version_scan_pages, 3);
        assert_eq!(config.max_pages, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_values_are_rejected() {
        let config = ExtractionConfig {
            version_scan_pages: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidVersionScanPages));

        let config = ExtractionConfig {
            max_pages: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxPages));
    }
}

//! Letterhead configuration

use serde::Deserialize;

use crate::domain::organization::OrganizationHeader;

/// Header lines printed on the memorial, budget and artifacts.
///
/// Unset lines keep the default letterhead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationConfig {
    pub secretariat: Option<String>,
    pub agency: Option<String>,
    pub division: Option<String>,
    pub finance_division: Option<String>,
}

impl OrganizationConfig {
    pub fn header(&self) -> OrganizationHeader {
        let defaults = OrganizationHeader::default();
        let pick = |value: &Option<String>, fallback: String| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        OrganizationHeader {
            secretariat: pick(&self.secretariat, defaults.secretariat),
            agency: pick(&self.agency, defaults.agency),
            division: pick(&self.division, defaults.division),
            finance_division: pick(&self.finance_division, defaults.finance_division),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_default_header() {
        assert_eq!(OrganizationConfig::default().header(), OrganizationHeader::default());
    }

    #[test]
    fn set_lines_override_defaults() {
        let config = OrganizationConfig {
            agency: Some("PREFEITURA MUNICIPAL".to_string()),
            division: Some("   ".to_string()),
            ..Default::default()
        };
        let header = config.header();
        assert_eq!(header.agency, "PREFEITURA MUNICIPAL");
        assert_eq!(header.division, OrganizationHeader::default().division);
    }
}

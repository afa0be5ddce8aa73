//! CDHU service code value object (`DD.DD.DDD`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

static CODE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{3}$").expect("service code pattern compiles"));

/// Natural key of a catalog item, e.g. `18.06.142`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceCode(String);

impl ServiceCode {
    /// Parses and validates a code.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("code"));
        }
        if !CODE_FORMAT.is_match(trimmed) {
            return Err(ValidationError::invalid_format(
                "code",
                format!("expected DD.DD.DDD, got '{}'", trimmed),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for ServiceCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_codes() {
        assert_eq!(ServiceCode::parse("18.06.142").unwrap().as_str(), "18.06.142");
        assert_eq!(ServiceCode::parse(" 02.08.050 ").unwrap().as_str(), "02.08.050");
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(ServiceCode::parse("18.6.142").is_err());
        assert!(ServiceCode::parse("18.06.1420").is_err());
        assert!(ServiceCode::parse("AA.BB.CCC").is_err());
        assert!(matches!(
            ServiceCode::parse("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn deserialization_validates() {
        let ok: ServiceCode = serde_json::from_str("\"33.10.030\"").unwrap();
        assert_eq!(ok.to_string(), "33.10.030");
        assert!(serde_json::from_str::<ServiceCode>("\"3310030\"").is_err());
    }
}

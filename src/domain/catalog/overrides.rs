//! Price overrides that shadow the reference catalog.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CatalogItem;
use crate::domain::foundation::{Money, ServiceCode, Timestamp};

/// Suffix appended to the description of an overridden item.
pub const MODIFIED_MARKER: &str = " *";

/// Label reported for a stored override set that has no version.
pub const UNLABELED_VERSION: &str = "Personalizado";

// ════════════════════════════════════════════════════════════════════════════════
// PriceOverrides - validated override set
// ════════════════════════════════════════════════════════════════════════════════

/// A validated code → price map with its version label and effective date.
///
/// Every price is strictly positive. An override never removes a catalog
/// entry; it only replaces the price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceOverrides {
    version: Option<String>,
    date: Timestamp,
    prices: BTreeMap<ServiceCode, Money>,
}

impl PriceOverrides {
    /// Builds an override set, dropping non-positive prices.
    pub fn new(
        version: impl Into<String>,
        date: Timestamp,
        prices: impl IntoIterator<Item = (ServiceCode, Money)>,
    ) -> Self {
        let version = version.into();
        Self {
            version: if version.trim().is_empty() { None } else { Some(version) },
            date,
            prices: prices.into_iter().filter(|(_, p)| p.is_positive()).collect(),
        }
    }

    /// Returns the version label, or the generic label when none was stored.
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or(UNLABELED_VERSION)
    }

    /// Returns the effective date.
    pub fn date(&self) -> Timestamp {
        self.date
    }

    /// Returns the override price for a code.
    pub fn price_for(&self, code: &ServiceCode) -> Option<Money> {
        self.prices.get(code).copied()
    }

    /// Returns all overridden prices ordered by code.
    pub fn prices(&self) -> &BTreeMap<ServiceCode, Money> {
        &self.prices
    }

    /// Number of overridden codes.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// True if no code is overridden.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Converts to the persisted record layout.
    pub fn to_record(&self) -> OverrideRecord {
        OverrideRecord {
            version: self.version.clone(),
            date: Some(self.date),
            prices: self
                .prices
                .iter()
                .map(|(code, price)| (code.as_str().to_string(), price.value()))
                .collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// OverrideRecord - persisted layout
// ════════════════════════════════════════════════════════════════════════════════

/// Persisted layout: `{ version, date, prices: { code: number } }`.
///
/// Keys and values are untrusted until converted with
/// [`OverrideRecord::into_overrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideRecord {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub date: Option<Timestamp>,
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
}

/// An entry dropped while converting a persisted record.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedOverride {
    pub code: String,
    pub price: f64,
    pub reason: String,
}

impl OverrideRecord {
    /// Validates the record, returning the accepted set and the dropped entries.
    pub fn into_overrides(self) -> (PriceOverrides, Vec<RejectedOverride>) {
        let mut prices = BTreeMap::new();
        let mut rejected = Vec::new();

        for (raw_code, raw_price) in self.prices {
            match ServiceCode::parse(&raw_code) {
                Ok(code) if raw_price.is_finite() && raw_price > 0.0 => {
                    prices.insert(code, Money::new(raw_price));
                }
                Ok(_) => rejected.push(RejectedOverride {
                    code: raw_code,
                    price: raw_price,
                    reason: "price must be a positive number".to_string(),
                }),
                Err(err) => rejected.push(RejectedOverride {
                    code: raw_code,
                    price: raw_price,
                    reason: err.to_string(),
                }),
            }
        }

        let overrides = PriceOverrides {
            version: self.version.filter(|v| !v.trim().is_empty()),
            date: self.date.unwrap_or_default(),
            prices,
        };
        (overrides, rejected)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Merge
// ════════════════════════════════════════════════════════════════════════════════

/// Merges the reference catalog with an override set.
///
/// Overridden items get the new price and the [`MODIFIED_MARKER`] suffix;
/// all others pass through unchanged. Declaration order is preserved.
pub fn merge_overrides(
    reference: &[CatalogItem],
    overrides: Option<&PriceOverrides>,
) -> Vec<CatalogItem> {
    reference
        .iter()
        .map(|item| match overrides.and_then(|o| o.price_for(&item.code)) {
            Some(price) => CatalogItem {
                price,
                description: format!("{}{}", item.description, MODIFIED_MARKER),
                ..item.clone()
            },
            None => item.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> ServiceCode {
        ServiceCode::parse(raw).unwrap()
    }

    fn item(raw_code: &str, price: f64) -> CatalogItem {
        CatalogItem {
            code: code(raw_code),
            description: format!("Serviço {}", raw_code),
            unit: "m²".to_string(),
            price: Money::new(price),
            category: "Pintura".to_string(),
            detailed_spec: String::new(),
            memorial_def: None,
        }
    }

    #[test]
    fn merge_replaces_price_and_marks_description() {
        let reference = vec![item("33.10.030", 38.0), item("33.11.050", 45.0)];
        let overrides = PriceOverrides::new(
            "CDHU 198",
            Timestamp::now(),
            vec![(code("33.11.050"), Money::new(47.9))],
        );

        let merged = merge_overrides(&reference, Some(&overrides));

        assert_eq!(merged[0], reference[0]);
        assert_eq!(merged[1].price.value(), 47.9);
        assert_eq!(merged[1].description, "Serviço 33.11.050 *");
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_ignores_codes_absent_from_reference() {
        let reference = vec![item("33.10.030", 38.0)];
        let overrides = PriceOverrides::new(
            "CDHU 198",
            Timestamp::now(),
            vec![(code("99.99.999"), Money::new(1.0))],
        );

        assert_eq!(merge_overrides(&reference, Some(&overrides)), reference);
    }

    #[test]
    fn new_drops_zero_prices() {
        let overrides = PriceOverrides::new(
            "v",
            Timestamp::now(),
            vec![(code("33.10.030"), Money::ZERO), (code("33.11.050"), Money::new(2.0))],
        );
        assert_eq!(overrides.len(), 1);
        assert!(overrides.price_for(&code("33.10.030")).is_none());
    }

    #[test]
    fn record_conversion_rejects_bad_entries() {
        let record: OverrideRecord = serde_json::from_str(
            r#"{"version":"CDHU 198","date":"2024-03-01T12:00:00Z",
                "prices":{"18.06.142":90.5,"bogus":3.0,"17.02.020":0.0}}"#,
        )
        .unwrap();

        let (overrides, rejected) = record.into_overrides();

        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.version_label(), "CDHU 198");
        assert_eq!(rejected.len(), 2);
    }

    #[test]
    fn record_without_version_uses_generic_label() {
        let record: OverrideRecord =
            serde_json::from_str(r#"{"prices":{"18.06.142":90.5}}"#).unwrap();
        let (overrides, _) = record.into_overrides();
        assert_eq!(overrides.version_label(), UNLABELED_VERSION);
    }

    #[test]
    fn record_layout_matches_persisted_shape() {
        let overrides = PriceOverrides::new(
            "CDHU 198",
            Timestamp::now(),
            vec![(code("18.06.142"), Money::new(90.5))],
        );
        let json = serde_json::to_value(overrides.to_record()).unwrap();
        assert_eq!(json["version"], "CDHU 198");
        assert_eq!(json["prices"]["18.06.142"], 90.5);
        assert!(json["date"].is_string());
    }
}

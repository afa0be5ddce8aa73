//! The static CDHU reference catalog, embedded at compile time.

use once_cell::sync::Lazy;

use super::CatalogItem;

/// Label reported when no override set is stored.
pub const BASELINE_VERSION_LABEL: &str = "CDHU 197 (Base)";

const CATALOG_YAML: &str = include_str!("cdhu_catalog.yaml");

static REFERENCE_CATALOG: Lazy<Vec<CatalogItem>> = Lazy::new(|| {
    serde_yaml::from_str(CATALOG_YAML).expect("embedded CDHU catalog is valid YAML")
});

/// Returns the reference catalog in declaration order.
pub fn reference_catalog() -> &'static [CatalogItem] {
    &REFERENCE_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn embedded_catalog_parses() {
        assert_eq!(reference_catalog().len(), 26);
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<_> = reference_catalog().iter().map(|i| i.code.clone()).collect();
        assert_eq!(codes.len(), reference_catalog().len());
    }

    #[test]
    fn prices_are_positive() {
        assert!(reference_catalog().iter().all(|i| i.price.is_positive()));
    }

    #[test]
    fn declaration_order_starts_with_preliminary_services() {
        let first = &reference_catalog()[0];
        assert_eq!(first.code.as_str(), "02.08.050");
        assert_eq!(first.category, "Serviços Preliminares");
    }

    #[test]
    fn flooring_item_matches_bulletin() {
        let item = reference_catalog()
            .iter()
            .find(|i| i.code.as_str() == "18.06.142")
            .unwrap();
        assert_eq!(item.price.value(), 85.0);
        assert_eq!(item.category, "Pisos e Revestimentos");
        assert!(item.has_memorial());
    }
}

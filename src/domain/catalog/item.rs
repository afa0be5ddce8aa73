//! Catalog item and structured memorial definition.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, ServiceCode};

/// Authored memorial text for a catalog service.
///
/// Its absence on an item triggers fallback text generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorialDefinition {
    pub object: String,
    pub methodology: Vec<String>,
    pub materials: Vec<String>,
    pub measurement: String,
}

/// One offered service type in the reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub code: ServiceCode,
    pub description: String,
    pub unit: String,
    pub price: Money,
    pub category: String,
    #[serde(default)]
    pub detailed_spec: String,
    #[serde(default, rename = "memorial", skip_serializing_if = "Option::is_none")]
    pub memorial_def: Option<MemorialDefinition>,
}

impl CatalogItem {
    /// Returns true if the item carries authored memorial text.
    pub fn has_memorial(&self) -> bool {
        self.memorial_def.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_memorial() {
        let yaml = r#"
code: "99.99.999"
description: Serviço avulso
unit: un
price: 10.5
category: Outros
"#;
        let item: CatalogItem = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(item.code.as_str(), "99.99.999");
        assert!(!item.has_memorial());
        assert!(item.detailed_spec.is_empty());
    }

    #[test]
    fn rejects_invalid_code() {
        let yaml = "code: '9.9.9'\ndescription: x\nunit: un\nprice: 1.0\ncategory: Outros\n";
        assert!(serde_yaml::from_str::<CatalogItem>(yaml).is_err());
    }
}

//! Service item - a project's concrete budget line.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::MemorialDefinition;
use crate::domain::foundation::{Money, ServiceItemId, ValidationError};

/// Default provenance label for catalog-derived items.
pub const DEFAULT_SOURCE: &str = "CDHU";

/// Category assigned when none is given.
pub const DEFAULT_CATEGORY: &str = "Outros";

/// Finish of a new floor covering, used by the flooring narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorFinish {
    #[default]
    Ceramic,
    Porcelain,
}

impl FloorFinish {
    /// Material description used in memorial text.
    pub fn material_label(&self) -> &'static str {
        match self {
            FloorFinish::Ceramic => "Cerâmica Esmaltada",
            FloorFinish::Porcelain => "Porcelanato Técnico/Esmaltado",
        }
    }
}

/// A line item of the project's service list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: ServiceItemId,
    pub code: String,
    pub source: String,
    pub category: String,
    pub name: String,
    pub unit: String,
    pub quantity: f64,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    pub material_unit_price: Money,
    pub labor_unit_price: Money,
    #[serde(default)]
    pub detailed_spec: String,
    #[serde(default)]
    pub floor_finish: FloorFinish,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memorial_def: Option<MemorialDefinition>,
}

impl ServiceItem {
    /// Creates a manual item with zero prices and default provenance.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            id: ServiceItemId::new(),
            code: code.into(),
            source: DEFAULT_SOURCE.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            name: name.into(),
            unit: unit.into(),
            quantity,
            environment: String::new(),
            brand: String::new(),
            model: String::new(),
            material_unit_price: Money::ZERO,
            labor_unit_price: Money::ZERO,
            detailed_spec: String::new(),
            floor_finish: FloorFinish::default(),
            memorial_def: None,
        }
    }

    pub fn with_prices(mut self, material: f64, labor: f64) -> Self {
        self.material_unit_price = Money::new(material);
        self.labor_unit_price = Money::new(labor);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_reference(mut self, brand: impl Into<String>, model: impl Into<String>) -> Self {
        self.brand = brand.into();
        self.model = model.into();
        self
    }

    pub fn with_memorial(mut self, memorial: MemorialDefinition) -> Self {
        self.memorial_def = Some(memorial);
        self
    }

    pub fn with_detailed_spec(mut self, spec: impl Into<String>) -> Self {
        self.detailed_spec = spec.into();
        self
    }

    pub fn with_floor_finish(mut self, finish: FloorFinish) -> Self {
        self.floor_finish = finish;
        self
    }

    /// Checks the add-time invariants: positive quantity, non-negative prices.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(ValidationError::not_positive("quantity", self.quantity));
        }
        Money::try_new("material_unit_price", self.material_unit_price.value())?;
        Money::try_new("labor_unit_price", self.labor_unit_price.value())?;
        Ok(())
    }

    /// True when a brand or model reference was given.
    pub fn has_reference(&self) -> bool {
        !self.brand.trim().is_empty() || !self.model.trim().is_empty()
    }

    /// `{brand} {model}` with blank parts omitted.
    pub fn reference_label(&self) -> String {
        [self.brand.trim(), self.model.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

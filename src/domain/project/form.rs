//! Service entry form as a pure reducer.
//!
//! Every edit is a [`FormEvent`]; [`ServiceForm::reduce`] returns the next
//! state with derived fields (area quantity, subtotal) already recomputed.

use crate::domain::catalog::{CatalogItem, MemorialDefinition};
use crate::domain::foundation::{round2, Money, ServiceItemId, ValidationError};

use super::service_item::{FloorFinish, ServiceItem, DEFAULT_CATEGORY, DEFAULT_SOURCE};

/// Share of a catalog price attributed to material.
pub const MATERIAL_SHARE: f64 = 0.6;

/// Share of a catalog price attributed to labor.
pub const LABOR_SHARE: f64 = 0.4;

/// Default unit for manual entries.
pub const DEFAULT_UNIT: &str = "m²";

/// A single edit to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    CatalogItemSelected(CatalogItem),
    WidthChanged(Option<f64>),
    LengthChanged(Option<f64>),
    QuantityChanged(Option<f64>),
    EnvironmentChanged(String),
    BrandChanged(String),
    ModelChanged(String),
    SourceChanged(String),
    CodeChanged(String),
    DescriptionChanged(String),
    CategoryChanged(String),
    UnitChanged(String),
    FloorFinishChanged(FloorFinish),
    MaterialPriceChanged(Money),
    LaborPriceChanged(Money),
    Reset,
}

/// State of the service entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceForm {
    pub code: String,
    pub source: String,
    pub category: String,
    pub description: String,
    pub detailed_spec: String,
    pub memorial_def: Option<MemorialDefinition>,
    pub unit: String,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub quantity: Option<f64>,
    pub environment: String,
    pub brand: String,
    pub model: String,
    pub floor_finish: FloorFinish,
    pub material_price: Money,
    pub labor_price: Money,
    /// Derived: `(material + labor) × quantity`.
    pub subtotal: Money,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            source: DEFAULT_SOURCE.to_string(),
            category: String::new(),
            description: String::new(),
            detailed_spec: String::new(),
            memorial_def: None,
            unit: DEFAULT_UNIT.to_string(),
            width: None,
            length: None,
            quantity: None,
            environment: String::new(),
            brand: String::new(),
            model: String::new(),
            floor_finish: FloorFinish::default(),
            material_price: Money::ZERO,
            labor_price: Money::ZERO,
            subtotal: Money::ZERO,
        }
    }
}

impl ServiceForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event and recomputes derived fields.
    pub fn reduce(mut self, event: FormEvent) -> Self {
        match event {
            FormEvent::CatalogItemSelected(item) => {
                self.code = item.code.as_str().to_string();
                self.description = item.description;
                self.detailed_spec = item.detailed_spec;
                self.memorial_def = item.memorial_def;
                self.category = item.category;
                self.unit = item.unit;
                self.material_price = item.price.share(MATERIAL_SHARE);
                self.labor_price = item.price.share(LABOR_SHARE);
                self.width = None;
                self.length = None;
                self.quantity = None;
            }
            FormEvent::WidthChanged(width) => {
                self.width = width;
                self.derive_area();
            }
            FormEvent::LengthChanged(length) => {
                self.length = length;
                self.derive_area();
            }
            FormEvent::QuantityChanged(quantity) => self.quantity = quantity,
            FormEvent::EnvironmentChanged(v) => self.environment = v,
            FormEvent::BrandChanged(v) => self.brand = v,
            FormEvent::ModelChanged(v) => self.model = v,
            FormEvent::SourceChanged(v) => self.source = v,
            FormEvent::CodeChanged(v) => self.code = v,
            FormEvent::DescriptionChanged(v) => self.description = v,
            FormEvent::CategoryChanged(v) => self.category = v,
            FormEvent::UnitChanged(v) => self.unit = v,
            FormEvent::FloorFinishChanged(v) => self.floor_finish = v,
            FormEvent::MaterialPriceChanged(v) => self.material_price = v,
            FormEvent::LaborPriceChanged(v) => self.labor_price = v,
            FormEvent::Reset => return Self::default(),
        }
        self.subtotal = (self.material_price + self.labor_price) * self.quantity.unwrap_or(0.0);
        self
    }

    /// Applies events in order.
    pub fn apply_all(self, events: impl IntoIterator<Item = FormEvent>) -> Self {
        events.into_iter().fold(self, Self::reduce)
    }

    // Area only overrides the quantity when both sides are known.
    fn derive_area(&mut self) {
        if let (Some(w), Some(l)) = (self.width, self.length) {
            if w > 0.0 && l > 0.0 {
                self.quantity = Some(round2(w * l));
            }
        }
    }

    /// Produces a service item from the current state.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotPositive` when the quantity is missing or
    /// not strictly positive, and `EmptyField` when no description was given.
    pub fn submit(&self) -> Result<ServiceItem, ValidationError> {
        let quantity = self.quantity.unwrap_or(0.0);
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(ValidationError::not_positive("quantity", quantity));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }

        let mut name = self.description.trim().to_string();
        let reference = [self.brand.trim(), self.model.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if !reference.is_empty() {
            name.push_str(&format!(" (Ref: {})", reference));
        }

        let category = if self.category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            self.category.clone()
        };

        let item = ServiceItem {
            id: ServiceItemId::new(),
            code: self.code.trim().to_string(),
            source: self.source.clone(),
            category,
            name,
            unit: self.unit.clone(),
            quantity,
            environment: self.environment.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            material_unit_price: self.material_price,
            labor_unit_price: self.labor_price,
            detailed_spec: self.detailed_spec.clone(),
            floor_finish: self.floor_finish,
            memorial_def: self.memorial_def.clone(),
        };
        item.validate()?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::reference_catalog;

    fn tile_item() -> CatalogItem {
        reference_catalog()
            .iter()
            .find(|i| i.code.as_str() == "18.06.142")
            .cloned()
            .unwrap()
    }

    #[test]
    fn selecting_catalog_item_splits_price_sixty_forty() {
        let form = ServiceForm::new().reduce(FormEvent::CatalogItemSelected(tile_item()));

        assert_eq!(form.code, "18.06.142");
        assert_eq!(form.material_price.value(), 51.0);
        assert_eq!(form.labor_price.value(), 34.0);
        assert!(form.memorial_def.is_some());
        assert!(form.quantity.is_none());
    }

    #[test]
    fn split_rounds_each_share_to_centavos() {
        let mut item = tile_item();
        item.price = Money::new(10.01);
        let form = ServiceForm::new().reduce(FormEvent::CatalogItemSelected(item));
        assert_eq!(form.material_price.value(), 6.01);
        assert_eq!(form.labor_price.value(), 4.0);
    }

    #[test]
    fn width_and_length_derive_quantity_and_subtotal() {
        let form = ServiceForm::new().apply_all(vec![
            FormEvent::CatalogItemSelected(tile_item()),
            FormEvent::WidthChanged(Some(2.5)),
            FormEvent::LengthChanged(Some(4.0)),
        ]);

        assert_eq!(form.quantity, Some(10.0));
        assert_eq!(form.subtotal.value(), 850.0);
    }

    #[test]
    fn area_is_rounded_to_two_decimals() {
        let form = ServiceForm::new().apply_all(vec![
            FormEvent::WidthChanged(Some(1.333)),
            FormEvent::LengthChanged(Some(3.0)),
        ]);
        assert_eq!(form.quantity, Some(4.0));
    }

    #[test]
    fn typed_quantity_survives_until_dimensions_change() {
        let form = ServiceForm::new().apply_all(vec![
            FormEvent::WidthChanged(Some(2.0)),
            FormEvent::LengthChanged(Some(2.0)),
            FormEvent::QuantityChanged(Some(7.0)),
        ]);
        assert_eq!(form.quantity, Some(7.0));

        let form = form.reduce(FormEvent::WidthChanged(Some(3.0)));
        assert_eq!(form.quantity, Some(6.0));
    }

    #[test]
    fn submit_rejects_missing_quantity() {
        let form = ServiceForm::new().reduce(FormEvent::CatalogItemSelected(tile_item()));
        assert!(matches!(form.submit(), Err(ValidationError::NotPositive { .. })));
    }

    #[test]
    fn submit_appends_reference_and_defaults_category() {
        let form = ServiceForm::new().apply_all(vec![
            FormEvent::DescriptionChanged("Luminária LED".to_string()),
            FormEvent::QuantityChanged(Some(4.0)),
            FormEvent::BrandChanged("Philips".to_string()),
            FormEvent::ModelChanged("X1".to_string()),
        ]);

        let item = form.submit().unwrap();
        assert_eq!(item.name, "Luminária LED (Ref: Philips X1)");
        assert_eq!(item.category, "Outros");
        assert_eq!(item.source, "CDHU");
    }

    #[test]
    fn reset_restores_defaults() {
        let form = ServiceForm::new().apply_all(vec![
            FormEvent::CatalogItemSelected(tile_item()),
            FormEvent::Reset,
        ]);
        assert_eq!(form, ServiceForm::default());
        assert_eq!(form.unit, "m²");
    }
}

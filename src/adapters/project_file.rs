//! YAML project input for the command-line generator.
//!
//! ```yaml
//! project:
//!   object: Reforma do refeitório
//!   location: Rua das Flores, 100
//!   date: 2024-03-15
//!   unit: 6ª Cia
//! services:
//!   - code: "18.06.142"
//!     width: 5
//!     length: 4
//!     environment: Refeitório
//!     brand: Portobello
//!   - description: Instalação de bancada
//!     unit: un
//!     quantity: 2
//!     material_price: 350
//!     labor_price: 120
//! ```
//!
//! Entries with a `code` are resolved against the effective catalog; the
//! rest are manual entries. Both go through the service form reducer.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::catalog::CatalogItem;
use crate::domain::foundation::Money;
use crate::domain::project::{FloorFinish, FormEvent, ProjectDetails};

#[derive(Debug, Error)]
pub enum ProjectFileError {
    #[error("Failed to read project file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid project file: {0}")]
    Parse(String),
}

/// Parsed project file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFile {
    pub project: ProjectDetails,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

/// One service line as written in the project file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceEntry {
    pub code: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub quantity: Option<f64>,
    pub environment: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub floor_finish: Option<FloorFinish>,
    pub material_price: Option<f64>,
    pub labor_price: Option<f64>,
}

impl ProjectFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, ProjectFileError> {
        serde_yaml::from_str(yaml).map_err(|e| ProjectFileError::Parse(e.to_string()))
    }

    pub async fn load(path: &Path) -> Result<Self, ProjectFileError> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ProjectFileError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Self::from_yaml(&yaml)
    }
}

impl ServiceEntry {
    /// Form events reproducing this entry.
    ///
    /// With a catalog item, the selection comes first so that explicit
    /// fields in the entry override the copied ones.
    pub fn events(&self, catalog_item: Option<&CatalogItem>) -> Vec<FormEvent> {
        let mut events = Vec::new();

        match catalog_item {
            Some(item) => events.push(FormEvent::CatalogItemSelected(item.clone())),
            None => {
                if let Some(code) = &self.code {
                    events.push(FormEvent::CodeChanged(code.clone()));
                }
            }
        }

        let text_fields: [(&Option<String>, fn(String) -> FormEvent); 7] = [
            (&self.source, FormEvent::SourceChanged),
            (&self.description, FormEvent::DescriptionChanged),
            (&self.category, FormEvent::CategoryChanged),
            (&self.unit, FormEvent::UnitChanged),
            (&self.environment, FormEvent::EnvironmentChanged),
            (&self.brand, FormEvent::BrandChanged),
            (&self.model, FormEvent::ModelChanged),
        ];
        for (value, event) in text_fields {
            if let Some(value) = value {
                events.push(event(value.clone()));
            }
        }

        if let Some(finish) = self.floor_finish {
            events.push(FormEvent::FloorFinishChanged(finish));
        }
        if let Some(price) = self.material_price {
            events.push(FormEvent::MaterialPriceChanged(Money::new(price)));
        }
        if let Some(price) = self.labor_price {
            events.push(FormEvent::LaborPriceChanged(Money::new(price)));
        }

        if self.quantity.is_some() {
            events.push(FormEvent::QuantityChanged(self.quantity));
        }
        if self.width.is_some() || self.length.is_some() {
            events.push(FormEvent::WidthChanged(self.width));
            events.push(FormEvent::LengthChanged(self.length));
        }
        events
    }
}

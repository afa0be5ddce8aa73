//! Technical standards inferred from service categories.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::project::ServiceItem;

/// ABNT standards an ETP can cite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechnicalStandard {
    /// Low-voltage electrical installations.
    Nbr5410,
    /// Cold-water building plumbing.
    Nbr5626,
    /// Painting for civil construction.
    Nbr13245,
    /// Ceramic floor and wall tiling.
    Nbr13753,
}

impl TechnicalStandard {
    /// Standard required by a category, if any.
    ///
    /// `Elétrica`, `Hidráulica` and `Pintura` match exactly; any category
    /// containing `Pisos` maps to the tiling standard.
    pub fn for_category(category: &str) -> Option<Self> {
        match category {
            "Elétrica" => Some(Self::Nbr5410),
            "Hidráulica" => Some(Self::Nbr5626),
            "Pintura" => Some(Self::Nbr13245),
            c if c.contains("Pisos") => Some(Self::Nbr13753),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Nbr5410 => "NBR 5410 (Instalações Elétricas de Baixa Tensão)",
            Self::Nbr5626 => "NBR 5626 (Instalações Prediais de Água Fria)",
            Self::Nbr13245 => "NBR 13245 (Pintura para Construção Civil)",
            Self::Nbr13753 => {
                "NBR 13753 (Revestimento de Piso Interno ou Externo com Placas Cerâmicas)"
            }
        }
    }

    /// Distinct standards for a service list, in first-appearance order.
    pub fn applicable(items: &[ServiceItem]) -> Vec<Self> {
        let mut found = Vec::new();
        for standard in items.iter().filter_map(|i| Self::for_category(&i.category)) {
            if !found.contains(&standard) {
                found.push(standard);
            }
        }
        found
    }
}

impl fmt::Display for TechnicalStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

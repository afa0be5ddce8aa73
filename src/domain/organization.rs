//! Issuing organization header lines printed on every document.

use serde::{Deserialize, Serialize};

/// Letterhead lines of the issuing organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationHeader {
    pub secretariat: String,
    pub agency: String,
    /// Technical division, used on the memorial.
    pub division: String,
    /// Finance division, used on the budget.
    pub finance_division: String,
}

impl Default for OrganizationHeader {
    fn default() -> Self {
        Self {
            secretariat: "SECRETARIA DA SEGURANÇA PÚBLICA".to_string(),
            agency: "POLÍCIA MILITAR DO ESTADO DE SÃO PAULO".to_string(),
            division: "CENTRO INTEGRADO DE APOIO PATRIMONIAL - DIVISÃO TÉCNICA".to_string(),
            finance_division: "DIRETORIA DE FINANÇAS - CENTRO INTEGRADO DE APOIO PATRIMONIAL"
                .to_string(),
        }
    }
}

//! Budget Spreadsheet Exporter Port - writes a budget sheet as a workbook.

use async_trait::async_trait;

use super::ExportError;
use crate::domain::budget::BudgetSheet;

/// Port for serializing a [`BudgetSheet`] to spreadsheet bytes.
#[async_trait]
pub trait BudgetSpreadsheetExporter: Send + Sync {
    /// Returns the workbook file contents.
    ///
    /// # Errors
    ///
    /// `ExportError::SpreadsheetFailed` when the workbook cannot be built.
    async fn export(&self, sheet: &BudgetSheet) -> Result<Vec<u8>, ExportError>;
}

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `KeyValueStore` - Durable string values under well-known keys
//! - `CatalogOverrideStore` - The persisted price-override set
//! - `OutputStorage` - Atomic writes of exported documents
//!
//! ## Extraction Ports
//!
//! - `PriceExtractor` - Bulletin document to code → price map
//! - `ProgressReporter` - Page-by-page progress side channel
//!
//! ## Export Ports
//!
//! - `DocumentExportService` - Markdown to HTML/PDF
//! - `BudgetSpreadsheetExporter` - Budget sheet to workbook bytes

mod budget_spreadsheet_exporter;
mod catalog_override_store;
mod document_export_service;
mod key_value_store;
mod output_storage;
mod price_extractor;

pub use budget_spreadsheet_exporter::BudgetSpreadsheetExporter;
pub use catalog_override_store::{CatalogOverrideStore, OverrideStoreError};
pub use document_export_service::{DocumentExportService, ExportError, ExportFormat};
pub use key_value_store::{validate_key, KeyValueError, KeyValueStore};
pub use output_storage::OutputStorage;
pub use price_extractor::{
    ExtractionError, NoProgress, PriceExtractor, ProgressReporter, UNREADABLE_GUIDANCE,
};

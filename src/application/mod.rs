//! Application layer - Catalog Store and command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod catalog_store;
pub mod handlers;

pub use catalog_store::{CatalogStore, CatalogUpdated};
pub use handlers::{
    BuildProjectError, BuildProjectHandler, ExportDocumentsCommand, ExportDocumentsError,
    ExportDocumentsHandler, ExportDocumentsResult, UpdateCatalogCommand, UpdateCatalogError, UpdateCatalogHandler, UpdateCatalogResult,
};

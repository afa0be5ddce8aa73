//! Command handlers.
//!
//! - `UpdateCatalogHandler` - Bulletin upload to applied price overrides
//! - `BuildProjectHandler` - Project file to a validated snapshot
//! - `ExportDocumentsHandler` - Memorial, budget, DFD and ETP files

mod build_project;
mod export_documents;
mod update_catalog;

pub use build_project::{BuildProjectError, BuildProjectHandler};
pub use export_documents::{
    sanitize_file_stem, ExportDocumentsCommand, ExportDocumentsError, ExportDocumentsHandler,
    ExportDocumentsResult, DFD_FILE_STEM, ETP_FILE_STEM,
};
pub use update_catalog::{
    upload_version_label, UpdateCatalogCommand, UpdateCatalogError, UpdateCatalogHandler,
    UpdateCatalogResult,
};

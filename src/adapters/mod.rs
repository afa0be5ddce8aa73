//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Key-value stores, the override store and output files
//! - `extraction` - PDF and text bulletin readers
//! - `document` - Markdown rendering, HTML/PDF export, xlsx budget
//! - `project_file` - YAML project input

pub mod document;
pub mod extraction;
pub mod project_file;
pub mod storage;

pub use document::{MarkdownRenderer, PulldownExportService, XlsxBudgetExporter};
pub use extraction::{PdfPriceExtractor, TextPriceExtractor};
pub use project_file::{ProjectFile, ProjectFileError, ServiceEntry};
pub use storage::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueOverrideStore, LocalOutputStorage,
};

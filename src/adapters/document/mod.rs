//! Document adapters - rendering and export of the printable outputs.
//!
//! - `MarkdownRenderer` - Memorial, DFD and ETP to markdown
//! - `PulldownExportService` - Markdown to HTML (pulldown-cmark) and PDF (Pandoc)
//! - `XlsxBudgetExporter` - Budget sheet to `.xlsx`

mod markdown_renderer;
mod pulldown_export_service;
mod xlsx_budget_exporter;

pub use markdown_renderer::MarkdownRenderer;
pub use pulldown_export_service::{PulldownExportService, DEFAULT_PDF_TIMEOUT_SECS};
pub use xlsx_budget_exporter::XlsxBudgetExporter;

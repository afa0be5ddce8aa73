//! Document Export Service Port - markdown to printable formats.
//!
//! Memorial, DFD and ETP are rendered to markdown first; this port turns
//! that markdown into HTML or PDF.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[async_trait]
pub trait DocumentExportService: Send + Sync {
    /// Full HTML page for the markdown, styled for A4 printing.
    async fn to_html(&self, markdown: &str) -> Result<String, ExportError>;

    /// PDF bytes for the markdown.
    ///
    /// # Errors
    ///
    /// `ServiceUnavailable` when no PDF engine can be reached; the HTML
    /// path is unaffected.
    async fn to_pdf(&self, markdown: &str) -> Result<Vec<u8>, ExportError>;

    /// Whether `to_pdf` can currently succeed.
    async fn is_available(&self) -> bool;
}

/// File formats written by the export pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Markdown,
    Html,
    Pdf,
    /// Budget only
    Xlsx,
}

impl ExportFormat {
    const ALL: [ExportFormat; 4] = [
        ExportFormat::Markdown,
        ExportFormat::Html,
        ExportFormat::Pdf,
        ExportFormat::Xlsx,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Accepts the file extension, case-insensitively, plus `markdown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "markdown" {
            return Ok(ExportFormat::Markdown);
        }
        ExportFormat::ALL
            .into_iter()
            .find(|format| format.extension() == wanted)
            .ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// External converter missing or not runnable.
    #[error("Export service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("PDF conversion failed: {0}")]
    PdfFailed(String),

    #[error("HTML conversion failed: {0}")]
    HtmlFailed(String),

    #[error("Spreadsheet generation failed: {0}")]
    SpreadsheetFailed(String),

    #[error("Conversion timed out after {0} seconds")]
    Timeout(u64),

    #[error("Failed to write export: {0}")]
    Io(String),
}

impl ExportError {
    pub fn service_unavailable(reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable(reason.into())
    }

    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfFailed(reason.into())
    }

    pub fn spreadsheet_failed(reason: impl Into<String>) -> Self {
        Self::SpreadsheetFailed(reason.into())
    }

    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }

    /// Portuguese message shown when an export fails.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::UnsupportedFormat(format) => {
                format!("Formato de exportação não suportado: {}.", format)
            }
            ExportError::ServiceUnavailable(_) => {
                "Conversão para PDF indisponível. Instale o Pandoc ou exporte em HTML.".to_string()
            }
            ExportError::SpreadsheetFailed(_) => {
                "Erro ao gerar a planilha de orçamento. Tente novamente.".to_string()
            }
            ExportError::Timeout(secs) => format!(
                "A geração do documento excedeu {} segundos. Tente novamente.",
                secs
            ),
            ExportError::Io(_) => {
                "Não foi possível gravar o arquivo. Verifique a pasta de saída.".to_string()
            }
            ExportError::PdfFailed(_) | ExportError::HtmlFailed(_) => {
                "Erro ao gerar o documento. Tente novamente.".to_string()
            }
        }
    }
}

impl From<ExportError> for DomainError {
    fn from(err: ExportError) -> Self {
        DomainError::new(ErrorCode::ExportFailed, err.to_string())
    }
}

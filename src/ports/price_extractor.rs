//! Price Extractor Port - bulletin document to price overrides.
//!
//! Extraction is the only slow path in the system. Implementations report
//! progress page by page and stop between pages when the cancel signal
//! flips to `true`.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::extraction::ExtractedPrices;
use crate::domain::foundation::{DomainError, ErrorCode, Percentage};

/// Guidance shown whenever a bulletin cannot be read.
pub const UNREADABLE_GUIDANCE: &str =
    "Erro ao processar o arquivo. Verifique se é um PDF legível (não escaneado).";

/// Errors raised while extracting prices from a bulletin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Input is not a PDF document")]
    NotPdf,

    #[error("Document could not be read: {0}")]
    Unreadable(String),

    /// Pages exist but none yields text, typically a scanned image.
    #[error("Document has no extractable text layer")]
    NoTextLayer,

    #[error("Document has {pages} pages, limit is {max}")]
    TooManyPages { pages: usize, max: usize },

    #[error("No service codes with prices were found")]
    NoPricesFound,

    #[error("Extraction was cancelled")]
    Cancelled,

    #[error("Internal extraction error: {0}")]
    Internal(String),
}

impl ExtractionError {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::Unreadable(reason.into())
    }

    /// Portuguese message for the update screen.
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::NotPdf => "Por favor, envie um arquivo PDF válido.".to_string(),
            ExtractionError::Unreadable(_) | ExtractionError::NoTextLayer => {
                UNREADABLE_GUIDANCE.to_string()
            }
            ExtractionError::TooManyPages { pages, max } => format!(
                "O arquivo possui {} páginas; o limite é {} páginas.",
                pages, max
            ),
            ExtractionError::NoPricesFound => "Nenhum código de serviço com preço foi \
                encontrado. Verifique se o arquivo é um boletim CDHU com texto selecionável."
                .to_string(),
            ExtractionError::Cancelled => "Atualização cancelada.".to_string(),
            ExtractionError::Internal(_) => UNREADABLE_GUIDANCE.to_string(),
        }
    }
}

impl From<ExtractionError> for DomainError {
    fn from(err: ExtractionError) -> Self {
        let code = match err {
            ExtractionError::Cancelled => ErrorCode::ExtractionCancelled,
            _ => ErrorCode::ExtractionFailed,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Receives extraction progress. Values only increase.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, progress: Percentage);
}

impl ProgressReporter for watch::Sender<Percentage> {
    fn report(&self, progress: Percentage) {
        self.send_replace(progress);
    }
}

/// Discards progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _progress: Percentage) {}
}

/// Port for turning a bulletin document into a code → price map.
///
/// # Contract
///
/// - An empty map is a valid result, not an error
/// - Every returned code is `DD.DD.DDD` and every price is positive
/// - `cancel` is checked between pages; a `true` value yields `Cancelled`
#[async_trait]
pub trait PriceExtractor: Send + Sync {
    async fn extract(
        &self,
        document: &[u8],
        progress: &dyn ProgressReporter,
        cancel: watch::Receiver<bool>,
    ) -> Result<ExtractedPrices, ExtractionError>;
}

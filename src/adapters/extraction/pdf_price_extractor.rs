//! PDF bulletin price extractor backed by `lopdf`.
//!
//! Parsing and per-page text extraction are CPU-bound, so each runs on the
//! blocking pool. Between pages the extractor reports progress and checks
//! the cancel signal.

use async_trait::async_trait;
use lopdf::Document;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task;
use tracing::{debug, info, warn};

use crate::domain::extraction::{BulletinScan, ExtractedPrices, DEFAULT_VERSION_SCAN_PAGES};
use crate::domain::foundation::Percentage;
use crate::ports::{ExtractionError, PriceExtractor, ProgressReporter};

/// Every PDF starts with this signature.
const PDF_MAGIC: &[u8] = b"%PDF";

/// Default cap on the number of pages processed.
pub const DEFAULT_MAX_PAGES: usize = 2000;

/// Extracts service prices from the text layer of a PDF bulletin.
///
/// # Example
///
/// ```rust,ignore
/// let extractor = PdfPriceExtractor::new().with_max_pages(500);
/// let (_tx, cancel) = watch::channel(false);
/// let prices = extractor.extract(&bytes, &NoProgress, cancel).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PdfPriceExtractor {
    max_pages: usize,
    version_scan_pages: usize,
}

impl Default for PdfPriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfPriceExtractor {
    pub fn new() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            version_scan_pages: DEFAULT_VERSION_SCAN_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Number of leading pages searched for the bulletin version.
    pub fn with_version_scan_pages(mut self, pages: usize) -> Self {
        self.version_scan_pages = pages;
        self
    }

    async fn load(document: &[u8]) -> Result<Document, ExtractionError> {
        let bytes = document.to_vec();
        task::spawn_blocking(move || Document::load_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::Internal(e.to_string()))?
            .map_err(|e| ExtractionError::unreadable(e.to_string()))
    }

    async fn page_text(document: Arc<Document>, page_number: u32) -> Result<String, ExtractionError> {
        task::spawn_blocking(move || document.extract_text(&[page_number]))
            .await
            .map_err(|e| ExtractionError::Internal(e.to_string()))?
            .or_else(|e| {
                // A single broken page does not spoil the rest of the bulletin.
                warn!(page = page_number, error = %e, "Page text extraction failed");
                Ok(String::new())
            })
    }
}

#[async_trait]
impl PriceExtractor for PdfPriceExtractor {
    async fn extract(
        &self,
        document: &[u8],
        progress: &dyn ProgressReporter,
        cancel: watch::Receiver<bool>,
    ) -> Result<ExtractedPrices, ExtractionError> {
        if !document.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::NotPdf);
        }

        let pdf = Arc::new(Self::load(document).await?);
        let page_numbers: Vec<u32> = pdf.get_pages().keys().copied().collect();
        let total = page_numbers.len();

        if total == 0 {
            return Err(ExtractionError::unreadable("document has no pages"));
        }
        if total > self.max_pages {
            return Err(ExtractionError::TooManyPages {
                pages: total,
                max: self.max_pages,
            });
        }

        info!(pages = total, "Extracting prices from bulletin");
        progress.report(Percentage::ZERO);

        let mut scan = BulletinScan::new(self.version_scan_pages);
        let mut pages_with_text = 0usize;

        for (index, page_number) in page_numbers.into_iter().enumerate() {
            if *cancel.borrow() {
                info!(page = index + 1, "Bulletin extraction cancelled");
                return Err(ExtractionError::Cancelled);
            }

            let text = Self::page_text(Arc::clone(&pdf), page_number).await?;
            if !text.trim().is_empty() {
                pages_with_text += 1;
            }

            let recorded = scan.feed_page(index + 1, &text);
            debug!(page = index + 1, recorded, "Bulletin page scanned");
            progress.report(Percentage::of(index + 1, total));
        }

        if pages_with_text == 0 {
            return Err(ExtractionError::NoTextLayer);
        }

        let extracted = scan.finish();
        info!(
            prices = extracted.len(),
            version = extracted.detected_version.as_deref().unwrap_or("-"),
            "Bulletin extraction finished"
        );
        Ok(extracted)
    }
}

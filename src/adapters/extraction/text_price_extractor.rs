//! Plain-text bulletin extractor.
//!
//! Accepts the text dump of a bulletin (e.g. `pdftotext` output) where pages
//! are separated by form feeds. Shares the scanning rules of the PDF path.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::extraction::{BulletinScan, ExtractedPrices, DEFAULT_VERSION_SCAN_PAGES};
use crate::domain::foundation::Percentage;
use crate::ports::{ExtractionError, PriceExtractor, ProgressReporter};

const PAGE_SEPARATOR: char = '\x0C';

#[derive(Debug, Clone)]
pub struct TextPriceExtractor {
    version_scan_pages: usize,
}

impl Default for TextPriceExtractor {
    fn default() -> Self {
        Self {
            version_scan_pages: DEFAULT_VERSION_SCAN_PAGES,
        }
    }
}

impl TextPriceExtractor {
    pub fn new(version_scan_pages: usize) -> Self {
        Self { version_scan_pages }
    }
}

#[async_trait]
impl PriceExtractor for TextPriceExtractor {
    async fn extract(
        &self,
        document: &[u8],
        progress: &dyn ProgressReporter,
        cancel: watch::Receiver<bool>,
    ) -> Result<ExtractedPrices, ExtractionError> {
        let text = std::str::from_utf8(document)
            .map_err(|e| ExtractionError::unreadable(format!("text is not UTF-8: {}", e)))?;
        if text.trim().is_empty() {
            return Err(ExtractionError::NoTextLayer);
        }

        let pages: Vec<&str> = text.split(PAGE_SEPARATOR).collect();
        let total = pages.len();
        let mut scan = BulletinScan::new(self.version_scan_pages);

        for (index, page) in pages.into_iter().enumerate() {
            if *cancel.borrow() {
                return Err(ExtractionError::Cancelled);
            }
            let recorded = scan.feed_page(index + 1, page);
            debug!(page = index + 1, recorded, "Text page scanned");
            progress.report(Percentage::of(index + 1, total));
        }

        Ok(scan.finish())
    }
}

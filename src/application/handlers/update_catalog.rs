//! UpdateCatalogHandler - applies prices extracted from an uploaded bulletin.

use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::application::CatalogStore;
use crate::domain::foundation::{DomainError, Money, ServiceCode};
use crate::ports::{ExtractionError, OverrideStoreError, PriceExtractor, ProgressReporter};

/// Command to update the catalog from a bulletin document.
#[derive(Debug, Clone)]
pub struct UpdateCatalogCommand {
    pub document: Vec<u8>,
    /// Date used in the fallback version label.
    pub received_on: NaiveDate,
}

/// Outcome reported to the update screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCatalogResult {
    pub updated: usize,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateCatalogError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Failed to store price overrides: {0}")]
    Store(#[from] OverrideStoreError),
}

impl UpdateCatalogError {
    pub fn user_message(&self) -> String {
        match self {
            UpdateCatalogError::Extraction(err) => err.user_message(),
            UpdateCatalogError::Store(_) => {
                "Não foi possível salvar os novos preços. Tente novamente.".to_string()
            }
        }
    }
}

impl From<UpdateCatalogError> for DomainError {
    fn from(err: UpdateCatalogError) -> Self {
        match err {
            UpdateCatalogError::Extraction(e) => e.into(),
            UpdateCatalogError::Store(e) => e.into(),
        }
    }
}

/// Label used when the bulletin carries no version marker.
pub fn upload_version_label(date: NaiveDate) -> String {
    format!("Upload em {}", date.format("%d/%m/%Y"))
}

/// Handler for catalog updates.
pub struct UpdateCatalogHandler {
    extractor: Arc<dyn PriceExtractor>,
    catalog: Arc<CatalogStore>,
}

impl UpdateCatalogHandler {
    pub fn new(extractor: Arc<dyn PriceExtractor>, catalog: Arc<CatalogStore>) -> Self {
        Self { extractor, catalog }
    }

    /// Extracts, validates and applies a new override set.
    ///
    /// Any failure leaves the current override set untouched.
    pub async fn handle(
        &self,
        cmd: UpdateCatalogCommand,
        progress: &dyn ProgressReporter,
        cancel: watch::Receiver<bool>,
    ) -> Result<UpdateCatalogResult, UpdateCatalogError> {
        let extracted = self
            .extractor
            .extract(&cmd.document, progress, cancel)
            .await
            .map_err(|err| {
                warn!(error = %err, "Bulletin extraction failed");
                err
            })?;

        // Extractor output is untrusted.
        let prices: Vec<(ServiceCode, Money)> = extracted
            .prices
            .into_iter()
            .filter(|(code, price)| {
                let valid = price.value().is_finite() && price.is_positive();
                if !valid {
                    warn!(code = %code, price = price.value(), "Discarding extracted price");
                }
                valid
            })
            .collect();

        if prices.is_empty() {
            warn!("Bulletin contained no usable prices");
            return Err(ExtractionError::NoPricesFound.into());
        }

        let version = extracted
            .detected_version
            .unwrap_or_else(|| upload_version_label(cmd.received_on));

        let updated = prices.len();
        let event = self.catalog.apply_overrides(prices, version).await?;

        info!(updated, version = %event.version, "Catalog updated from bulletin");
        Ok(UpdateCatalogResult {
            updated,
            version: event.version,
        })
    }
}

//! Override store backed by a [`KeyValueStore`].
//!
//! The whole override set lives under a single key as a JSON record:
//! `{ "version": ..., "date": ..., "prices": { "<code>": <number> } }`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::catalog::{OverrideRecord, PriceOverrides};
use crate::ports::{CatalogOverrideStore, KeyValueStore, OverrideStoreError};

/// Well-known key of the persisted override record.
pub const OVERRIDE_KEY: &str = "cdhu_update_data";

/// [`CatalogOverrideStore`] persisting the record as JSON in a key-value store.
pub struct KeyValueOverrideStore {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueOverrideStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CatalogOverrideStore for KeyValueOverrideStore {
    async fn load(&self) -> Result<Option<PriceOverrides>, OverrideStoreError> {
        let Some(raw) = self.store.get(OVERRIDE_KEY).await? else {
            return Ok(None);
        };

        let record: OverrideRecord = serde_json::from_str(&raw)
            .map_err(|e| OverrideStoreError::Malformed(e.to_string()))?;

        let (overrides, rejected) = record.into_overrides();
        for entry in &rejected {
            warn!(
                code = %entry.code,
                price = entry.price,
                reason = %entry.reason,
                "Dropping invalid stored price override"
            );
        }
        Ok(Some(overrides))
    }

    async fn save(&self, overrides: &PriceOverrides) -> Result<(), OverrideStoreError> {
        let json = serde_json::to_string(&overrides.to_record())
            .map_err(|e| OverrideStoreError::Serialization(e.to_string()))?;
        self.store.put(OVERRIDE_KEY, &json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), OverrideStoreError> {
        self.store.remove(OVERRIDE_KEY).await?;
        Ok(())
    }
}

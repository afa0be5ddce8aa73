//! Catalog Store - the effective catalog as reference data plus overrides.
//!
//! Reads never fail: the effective catalog is kept in memory and swapped
//! as a whole when a new override set is applied. Persistence happens
//! before the swap, so readers only ever see a set that is also on disk.

use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::domain::catalog::{
    categories, merge_overrides, reference_catalog, CatalogItem, CatalogQuery, PriceOverrides,
    BASELINE_VERSION_LABEL,
};
use crate::domain::foundation::{Money, ServiceCode, Timestamp};
use crate::ports::{CatalogOverrideStore, OverrideStoreError};

/// Capacity of the change-notification channel.
const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Notification sent after the override set changes.
///
/// Consumers re-fetch the catalog; no diff is carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogUpdated {
    pub version: String,
    pub overridden: usize,
}

struct CatalogState {
    overrides: Option<PriceOverrides>,
    effective: Arc<Vec<CatalogItem>>,
}

impl CatalogState {
    fn new(overrides: Option<PriceOverrides>) -> Self {
        let effective = Arc::new(merge_overrides(reference_catalog(), overrides.as_ref()));
        Self {
            overrides,
            effective,
        }
    }

    fn version_label(&self) -> String {
        self.overrides
            .as_ref()
            .map(|o| o.version_label().to_string())
            .unwrap_or_else(|| BASELINE_VERSION_LABEL.to_string())
    }
}

/// Holds the reference catalog and the current override set.
pub struct CatalogStore {
    store: Arc<dyn CatalogOverrideStore>,
    state: RwLock<CatalogState>,
    updates: broadcast::Sender<CatalogUpdated>,
}

impl CatalogStore {
    /// Opens the store, loading any persisted override set.
    ///
    /// Unreadable persisted data is logged and ignored; the store then
    /// serves the baseline catalog.
    pub async fn open(store: Arc<dyn CatalogOverrideStore>) -> Self {
        let overrides = match store.load().await {
            Ok(overrides) => overrides,
            Err(err) => {
                warn!(error = %err, "Ignoring persisted price overrides, using baseline catalog");
                None
            }
        };
        if let Some(o) = &overrides {
            info!(version = o.version_label(), items = o.len(), "Loaded price overrides");
        }

        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            store,
            state: RwLock::new(CatalogState::new(overrides)),
            updates,
        }
    }

    /// Reference items with overrides applied, in declaration order.
    pub async fn effective_catalog(&self) -> Arc<Vec<CatalogItem>> {
        Arc::clone(&self.state.read().await.effective)
    }

    /// Stored version label, or the baseline label without overrides.
    pub async fn version_label(&self) -> String {
        self.state.read().await.version_label()
    }

    pub async fn overrides(&self) -> Option<PriceOverrides> {
        self.state.read().await.overrides.clone()
    }

    /// Replaces the whole override set and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Persistence failures leave both the stored and the in-memory set
    /// unchanged.
    pub async fn apply_overrides(
        &self,
        prices: impl IntoIterator<Item = (ServiceCode, Money)>,
        version_label: impl Into<String>,
    ) -> Result<CatalogUpdated, OverrideStoreError> {
        let overrides = PriceOverrides::new(version_label, Timestamp::now(), prices);
        self.replace(Some(overrides)).await
    }

    /// Drops all overrides, returning to the baseline catalog.
    pub async fn reset(&self) -> Result<CatalogUpdated, OverrideStoreError> {
        self.replace(None).await
    }

    async fn replace(
        &self,
        overrides: Option<PriceOverrides>,
    ) -> Result<CatalogUpdated, OverrideStoreError> {
        let mut state = self.state.write().await;

        match &overrides {
            Some(o) => self.store.save(o).await?,
            None => self.store.clear().await?,
        }
        *state = CatalogState::new(overrides);

        let event = CatalogUpdated {
            version: state.version_label(),
            overridden: state.overrides.as_ref().map_or(0, PriceOverrides::len),
        };
        drop(state);

        info!(version = %event.version, items = event.overridden, "Catalog overrides applied");
        // No subscribers is fine.
        let _ = self.updates.send(event.clone());
        Ok(event)
    }

    pub async fn find(&self, code: &ServiceCode) -> Option<CatalogItem> {
        self.state
            .read()
            .await
            .effective
            .iter()
            .find(|item| &item.code == code)
            .cloned()
    }

    pub async fn query(&self, query: &CatalogQuery) -> Vec<CatalogItem> {
        query.apply(&self.state.read().await.effective)
    }

    pub async fn categories(&self) -> Vec<String> {
        categories(&self.state.read().await.effective)
    }

    /// Receives a [`CatalogUpdated`] after every successful change.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogUpdated> {
        self.updates.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemoryKeyValueStore, KeyValueOverrideStore, OVERRIDE_KEY};
    use crate::domain::catalog::MODIFIED_MARKER;
    use crate::ports::KeyValueStore;
    use async_trait::async_trait;

    fn code(raw: &str) -> ServiceCode {
        ServiceCode::parse(raw).unwrap()
    }

    async fn open_with(kv: InMemoryKeyValueStore) -> CatalogStore {
        CatalogStore::open(Arc::new(KeyValueOverrideStore::new(Arc::new(kv)))).await
    }

    struct FailingStore;

    #[async_trait]
    impl CatalogOverrideStore for FailingStore {
        async fn load(&self) -> Result<Option<PriceOverrides>, OverrideStoreError> {
            Ok(None)
        }
        async fn save(&self, _: &PriceOverrides) -> Result<(), OverrideStoreError> {
            Err(OverrideStoreError::Io("disk full".to_string()))
        }
        async fn clear(&self) -> Result<(), OverrideStoreError> {
            Err(OverrideStoreError::Io("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn baseline_without_overrides() {
        let store = open_with(InMemoryKeyValueStore::new()).await;

        assert_eq!(store.version_label().await, BASELINE_VERSION_LABEL);
        assert_eq!(store.effective_catalog().await.len(), reference_catalog().len());
        assert!(store.overrides().await.is_none());
    }

    #[tokio::test]
    async fn malformed_persisted_data_falls_back_to_baseline() {
        let kv = InMemoryKeyValueStore::new();
        kv.put(OVERRIDE_KEY, "not json at all").await.unwrap();

        let first = open_with(kv.clone()).await;
        let second = open_with(kv).await;

        for store in [&first, &second] {
            assert_eq!(store.version_label().await, BASELINE_VERSION_LABEL);
            assert_eq!(store.effective_catalog().await.as_slice(), reference_catalog());
            assert!(store.overrides().await.is_none());
        }
    }

    #[tokio::test]
    async fn apply_overrides_changes_price_and_marks_item() {
        let store = open_with(InMemoryKeyValueStore::new()).await;

        let event = store
            .apply_overrides(vec![(code("18.06.142"), Money::new(92.4))], "CDHU 198")
            .await
            .unwrap();

        assert_eq!(event, CatalogUpdated { version: "CDHU 198".to_string(), overridden: 1 });
        let item = store.find(&code("18.06.142")).await.unwrap();
        assert_eq!(item.price, Money::new(92.4));
        assert!(item.description.ends_with(MODIFIED_MARKER));
        assert_eq!(store.effective_catalog().await.len(), reference_catalog().len());
    }

    #[tokio::test]
    async fn apply_replaces_previous_set_entirely() {
        let store = open_with(InMemoryKeyValueStore::new()).await;
        store
            .apply_overrides(vec![(code("18.06.142"), Money::new(1.0))], "A")
            .await
            .unwrap();
        store
            .apply_overrides(vec![(code("02.08.050"), Money::new(2.0))], "B")
            .await
            .unwrap();

        let original = reference_catalog()
            .iter()
            .find(|i| i.code == code("18.06.142"))
            .unwrap();
        assert_eq!(store.find(&code("18.06.142")).await.unwrap(), *original);
        assert_eq!(store.version_label().await, "B");
    }

    #[tokio::test]
    async fn overrides_survive_reopen() {
        let kv = InMemoryKeyValueStore::new();
        let store = open_with(kv.clone()).await;
        store
            .apply_overrides(vec![(code("18.06.142"), Money::new(99.0))], "CDHU 198")
            .await
            .unwrap();

        let reopened = open_with(kv).await;

        assert_eq!(reopened.version_label().await, "CDHU 198");
        assert_eq!(reopened.find(&code("18.06.142")).await.unwrap().price, Money::new(99.0));
    }

    #[tokio::test]
    async fn reset_returns_to_baseline_and_notifies() {
        let store = open_with(InMemoryKeyValueStore::new()).await;
        let mut updates = store.subscribe();
        store
            .apply_overrides(vec![(code("18.06.142"), Money::new(99.0))], "X")
            .await
            .unwrap();

        store.reset().await.unwrap();

        assert_eq!(updates.recv().await.unwrap().version, "X");
        let reset = updates.recv().await.unwrap();
        assert_eq!(reset.version, BASELINE_VERSION_LABEL);
        assert_eq!(reset.overridden, 0);
    }

    #[tokio::test]
    async fn failed_save_keeps_current_set() {
        let store = CatalogStore::open(Arc::new(FailingStore)).await;

        let result = store
            .apply_overrides(vec![(code("18.06.142"), Money::new(99.0))], "X")
            .await;

        assert!(result.is_err());
        assert_eq!(store.version_label().await, BASELINE_VERSION_LABEL);
        assert_eq!(store.find(&code("18.06.142")).await.unwrap().price.value(), 85.0);
    }

    #[tokio::test]
    async fn query_and_categories_use_effective_catalog() {
        let store = open_with(InMemoryKeyValueStore::new()).await;

        let floors = store
            .query(&CatalogQuery::all().with_category("Pisos e Revestimentos"))
            .await;
        assert!(floors.iter().all(|i| i.category == "Pisos e Revestimentos"));
        assert!(!floors.is_empty());

        let categories = store.categories().await;
        assert_eq!(categories[0], "Serviços Preliminares");
    }
}

//! In-Memory Key-Value Store Adapter
//!
//! Keeps values in a shared map. Useful for testing and the `memory`
//! storage backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{validate_key, KeyValueError, KeyValueStore};

/// In-memory key-value storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        validate_key(key)?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        validate_key(key)?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueError> {
        validate_key(key)?;
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_returns_value() {
        let store = InMemoryKeyValueStore::new();
        store.put("cdhu_update_data", "{}").await.unwrap();
        assert_eq!(store.get("cdhu_update_data").await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn missing_key_is_none_and_remove_is_idempotent() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.get("absent").await.unwrap().is_none());
        store.remove("absent").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryKeyValueStore::new();
        let other = store.clone();
        store.put("k", "v").await.unwrap();
        assert_eq!(other.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_key_is_rejected() {
        let store = InMemoryKeyValueStore::new();
        assert!(matches!(store.put("a/b", "v").await, Err(KeyValueError::InvalidKey(_))));
    }
}

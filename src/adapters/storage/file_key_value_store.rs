//! File-based Key-Value Store Adapter
//!
//! Stores each key as `{data_dir}/{key}.json`. Writes go through a temp
//! file and a rename, so a crash never leaves a half-written value.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::atomic::write_atomic;
use crate::ports::{validate_key, KeyValueError, KeyValueStore};

/// File-based key-value storage
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_path`.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        validate_key(key)?;
        match fs::read_to_string(self.value_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KeyValueError::io(e.to_string())),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        validate_key(key)?;
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            KeyValueError::io(format!(
                "Failed to create data directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let path = self.value_path(key);
        write_atomic(&path, value.as_bytes())
            .await
            .map_err(|e| KeyValueError::io(format!("Failed to write {}: {}", path.display(), e)))
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueError> {
        validate_key(key)?;
        match fs::remove_file(self.value_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KeyValueError::io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_store() -> (FileKeyValueStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("data"));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn put_creates_directory_and_file() {
        let (store, temp) = create_store();

        store.put("cdhu_update_data", r#"{"prices":{}}"#).await.unwrap();

        let path = temp.path().join("data").join("cdhu_update_data.json");
        assert!(path.exists());
        assert_eq!(
            store.get("cdhu_update_data").await.unwrap().as_deref(),
            Some(r#"{"prices":{}}"#)
        );
    }

    #[tokio::test]
    async fn put_overwrites_existing() {
        let (store, _temp) = create_store();
        store.put("k", "old").await.unwrap();
        store.put("k", "new").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (store, _temp) = create_store();
        assert!(store.get("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_missing() {
        let (store, _temp) = create_store();
        store.put("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let (store, temp) = create_store();
        store.put("k", "persisted").await.unwrap();

        let reopened = FileKeyValueStore::new(temp.path().join("data"));
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn path_like_keys_are_rejected() {
        let (store, _temp) = create_store();
        assert!(store.put("../escape", "v").await.is_err());
    }
}

//! Key-Value Store Port - durable string storage by well-known key.
//!
//! Stands in for the browser's client-side storage: one value per key,
//! surviving process restarts in the durable implementation.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from key-value storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyValueError {
    /// Keys must be non-empty and contain only `[A-Za-z0-9_-]`.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl KeyValueError {
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}

/// Port for durable string values stored under fixed keys.
///
/// # Contract
///
/// - `put` replaces the whole value atomically; readers never see a
///   partial write
/// - `get` on a missing key returns `Ok(None)`
/// - `remove` on a missing key succeeds
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), KeyValueError>;

    async fn remove(&self, key: &str) -> Result<(), KeyValueError>;
}

/// Validates a key for use as a storage name.
pub fn validate_key(key: &str) -> Result<(), KeyValueError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(KeyValueError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_key_accepts_well_known_key() {
        assert!(validate_key("cdhu_update_data").is_ok());
    }

    #[test]
    fn validate_key_rejects_paths_and_empty() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
    }

    #[test]
    fn key_value_store_is_object_safe() {
        fn check<T: KeyValueStore + ?Sized>() {}
        check::<dyn KeyValueStore>();
    }
}

//! Catalog Override Store Port - persistence of the price-override set.

use async_trait::async_trait;
use thiserror::Error;

use super::KeyValueError;
use crate::domain::catalog::PriceOverrides;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors from override persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideStoreError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// The stored record could not be parsed.
    #[error("Stored override record is malformed: {0}")]
    Malformed(String),

    #[error("Failed to serialize override record: {0}")]
    Serialization(String),
}

impl From<KeyValueError> for OverrideStoreError {
    fn from(err: KeyValueError) -> Self {
        OverrideStoreError::Io(err.to_string())
    }
}

impl From<OverrideStoreError> for DomainError {
    fn from(err: OverrideStoreError) -> Self {
        let code = match err {
            OverrideStoreError::Malformed(_) => ErrorCode::MalformedPersistedState,
            OverrideStoreError::Io(_) | OverrideStoreError::Serialization(_) => {
                ErrorCode::StorageError
            }
        };
        DomainError::new(code, err.to_string())
    }
}

/// Port for loading and replacing the persisted override set.
///
/// # Contract
///
/// - `load` returns `Ok(None)` when nothing is stored
/// - `load` returns `Malformed` for unparsable data; callers decide how to
///   recover
/// - `save` replaces the previous set entirely
#[async_trait]
pub trait CatalogOverrideStore: Send + Sync {
    async fn load(&self) -> Result<Option<PriceOverrides>, OverrideStoreError>;

    async fn save(&self, overrides: &PriceOverrides) -> Result<(), OverrideStoreError>;

    async fn clear(&self) -> Result<(), OverrideStoreError>;
}

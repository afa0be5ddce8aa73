//! Local Filesystem Output Storage - Implementation of OutputStorage.
//!
//! Exported documents land flat in one output directory, each written
//! through a temp file that is synced and renamed into place.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::atomic::write_atomic;
use crate::ports::{ExportError, OutputStorage};

/// Maximum size of a single exported file (25 MB).
const MAX_FILE_SIZE_BYTES: usize = 25 * 1024 * 1024;

/// Writes exported files into a directory.
///
/// # Atomic Writes
///
/// 1. Write content to `{name}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{name}`
///
/// A failure at any step removes the temp file.
#[derive(Debug, Clone)]
pub struct LocalOutputStorage {
    base_path: PathBuf,
}

impl LocalOutputStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn ensure_dir(&self) -> Result<(), ExportError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            ExportError::io(format!(
                "Failed to create output directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }
}

/// A file name must be a single plain path component.
fn validate_file_name(file_name: &str) -> Result<(), ExportError> {
    let plain = !file_name.is_empty()
        && file_name != "."
        && file_name != ".."
        && !file_name.contains(['/', '\\', '\0']);
    if plain {
        Ok(())
    } else {
        Err(ExportError::io(format!(
            "Invalid output file name: {:?}",
            file_name
        )))
    }
}

#[async_trait]
impl OutputStorage for LocalOutputStorage {
    async fn write(&self, file_name: &str, content: &[u8]) -> Result<PathBuf, ExportError> {
        validate_file_name(file_name)?;
        if content.len() > MAX_FILE_SIZE_BYTES {
            return Err(ExportError::io(format!(
                "File size {} exceeds maximum {} bytes",
                content.len(),
                MAX_FILE_SIZE_BYTES
            )));
        }

        self.ensure_dir().await?;

        let path = self.base_path.join(file_name);
        write_atomic(&path, content).await.map_err(|e| {
            ExportError::io(format!("Failed to write {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), bytes = content.len(), "Exported file written");
        Ok(path)
    }

    async fn remove(&self, file_name: &str) -> Result<(), ExportError> {
        validate_file_name(file_name)?;
        let path = self.base_path.join(file_name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(path = %path.display(), "Exported file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ExportError::io(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

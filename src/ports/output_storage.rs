//! Output Storage Port - where exported documents are written.

use async_trait::async_trait;
use std::path::PathBuf;

use super::ExportError;

/// Port for writing exported files.
///
/// # Contract
///
/// Implementations must:
/// - Write atomically (temp file + rename); a failed write leaves no file
///   and no temp file behind
/// - Overwrite an existing file of the same name
/// - Treat removing a missing file as success
#[async_trait]
pub trait OutputStorage: Send + Sync {
    /// Writes `content` under `file_name` and returns the final path.
    async fn write(&self, file_name: &str, content: &[u8]) -> Result<PathBuf, ExportError>;

    /// Removes a previously written file.
    async fn remove(&self, file_name: &str) -> Result<(), ExportError>;
}

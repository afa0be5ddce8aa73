//! Atomic file replacement shared by the filesystem adapters.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Temp path next to `target`, e.g. `file.json.tmp`.
pub(crate) fn temp_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Writes `content` to a temp file, syncs it and renames it over `target`.
///
/// On any failure the temp file is removed and `target` is left untouched.
pub(crate) async fn write_atomic(target: &Path, content: &[u8]) -> io::Result<()> {
    let temp = temp_path(target);
    let result = write_then_rename(&temp, target, content).await;
    if result.is_err() {
        let _ = fs::remove_file(&temp).await;
    }
    result
}

async fn write_then_rename(temp: &Path, target: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(temp).await?;
    file.write_all(content).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(temp, target).await
}

use crate::traits::{MetadataStore, StorageError, StorageResult};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use vidmeta_core::MetadataRecord;

/// Base name used when a file name sanitizes to nothing
const FALLBACK_BASE_NAME: &str = "metadata";

/// Derive the stored file's base name from an uploaded file name.
///
/// Characters outside `[A-Za-z0-9-_.]` become `_`, then everything from the
/// last `.` on is dropped.
pub fn sanitize_base_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let base = match cleaned.rfind('.') {
        Some(idx) => &cleaned[..idx],
        None => cleaned.as_str(),
    };

    if base.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        base.to_string()
    }
}

/// Local filesystem metadata store
#[derive(Debug, Clone)]
pub struct LocalMetadataStore {
    base_dir: PathBuf,
}

impl LocalMetadataStore {
    /// Create a store writing into `base_dir`.
    ///
    /// The directory is not touched here; it is created on demand by every save.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, base_name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", base_name))
    }
}

fn create_dir(dir: &Path) -> StorageResult<()> {
    std::fs::create_dir_all(dir).map_err(|e| StorageError::DirectoryCreation {
        path: dir.display().to_string(),
        message: e.to_string(),
    })
}

/// Write `body` beside `target` under a temporary name, then rename it into place.
fn write_atomically(dir: &Path, target: &Path, body: &[u8]) -> StorageResult<()> {
    create_dir(dir)?;

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| {
        StorageError::WriteFailed(format!(
            "Failed to create temp file in {}: {}",
            dir.display(),
            e
        ))
    })?;

    staged
        .write_all(body)
        .and_then(|_| staged.flush())
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to write {}: {}",
                staged.path().display(),
                e
            ))
        })?;

    staged.persist(target).map_err(|e| {
        StorageError::WriteFailed(format!(
            "Failed to persist {}: {}",
            target.display(),
            e.error
        ))
    })?;

    Ok(())
}

#[async_trait]
impl MetadataStore for LocalMetadataStore {
    async fn save(&self, record: &MetadataRecord) -> StorageResult<PathBuf> {
        let base_name = sanitize_base_name(&record.file_name);
        let target = self.path_for(&base_name);
        let body = serde_json::to_vec_pretty(record)?;
        let size = body.len();

        let start = std::time::Instant::now();

        let dir = self.base_dir.clone();
        let destination = target.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &destination, &body))
            .await
            .map_err(|e| StorageError::WriteFailed(format!("Save task failed: {}", e)))??;

        tracing::info!(
            path = %target.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Metadata saved"
        );

        Ok(target)
    }

    async fn check(&self) -> StorageResult<()> {
        let dir = self.base_dir.clone();
        tokio::task::spawn_blocking(move || -> StorageResult<()> {
            create_dir(&dir)?;
            // A scratch file proves the directory accepts writes; it is removed on drop.
            NamedTempFile::new_in(&dir).map_err(|e| {
                StorageError::WriteFailed(format!("{} is not writable: {}", dir.display(), e))
            })?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::WriteFailed(format!("Check task failed: {}", e)))?
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

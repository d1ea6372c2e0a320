//! Metadata store abstraction
//!
//! This module defines the MetadataStore trait that persistence backends implement.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use vidmeta_core::MetadataRecord;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create output directory {path}: {message}")]
    DirectoryCreation { path: String, message: String },

    #[error("Failed to write metadata file: {0}")]
    WriteFailed(String),

    #[error("Failed to serialize metadata: {0}")]
    Serialization(#[from] serde_json::Error),

}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence for extracted metadata records.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Persist a record and return where it was written.
    ///
    /// The target is derived from `record.file_name`; an existing record under
    /// the same name is replaced.
    async fn save(&self, record: &MetadataRecord) -> StorageResult<PathBuf>;

    /// Verify the store can accept writes.
    async fn check(&self) -> StorageResult<()>;

    /// Get the storage backend name (e.g., "local")
    fn backend_name(&self) -> &'static str;
}

//! Multipart upload staging

use axum::extract::Multipart;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use vidmeta_core::AppError;

use crate::error::HttpAppError;

/// Name recorded when the client sends no file name
const UNKNOWN_FILE_NAME: &str = "unknown";

/// Uploaded file written to a temporary location.
///
/// The file is deleted when this value is dropped, whatever the outcome of the request.
#[derive(Debug)]
pub struct StagedUpload {
    pub file: NamedTempFile,
    /// File name as sent by the client
    pub original_name: String,
    pub size_bytes: u64,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Temp file suffix carrying the upload's extension so the prober sees a familiar name.
fn staging_suffix(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

fn create_staging_file(original_name: &str) -> Result<NamedTempFile, AppError> {
    tempfile::Builder::new()
        .prefix("upload_")
        .suffix(&staging_suffix(original_name))
        .tempfile()
        .map_err(|e| AppError::Internal(format!("Failed to create temp file: {}", e)))
}

/// Stream the multipart field named "file" into a temporary file.
/// Only one field named "file" is accepted; multiple file fields are rejected.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<StagedUpload, HttpAppError> {
    let mut staged: Option<StagedUpload> = None;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        if staged.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            )
            .into());
        }

        let original_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_FILE_NAME)
            .to_string();

        let file = create_staging_file(&original_name)?;
        let handle = file.as_file().try_clone().map_err(AppError::from)?;
        let mut writer = tokio::fs::File::from_std(handle);

        let mut size_bytes: u64 = 0;
        while let Some(chunk) = field.chunk().await? {
            writer.write_all(&chunk).await.map_err(AppError::from)?;
            size_bytes += chunk.len() as u64;
        }
        writer.flush().await.map_err(AppError::from)?;

        staged = Some(StagedUpload {
            file,
            original_name,
            size_bytes,
        });
    }

    staged.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()).into())
}

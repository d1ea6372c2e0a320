//! Video metadata extraction: stat → probe → normalize.

use std::path::Path;
use std::sync::Arc;

use vidmeta_core::MetadataRecord;

use crate::error::{ExtractionError, ExtractionResult};
use crate::metadata::{normalize, FileIdentity};
use crate::probe::MediaProber;

/// Runs a [`MediaProber`] against a file and normalizes what it reports.
#[derive(Clone)]
pub struct VideoMetadataExtractor {
    prober: Arc<dyn MediaProber>,
}

impl VideoMetadataExtractor {
    pub fn new(prober: Arc<dyn MediaProber>) -> Self {
        Self { prober }
    }

    pub fn prober_name(&self) -> &'static str {
        self.prober.name()
    }

    /// Extract the metadata record of the file at `path`.
    ///
    /// `original_name` is recorded as the file name; the record's path is the
    /// canonical form of `path`. A missing file fails with
    /// [`ExtractionError::NotFound`] before the prober is started.
    #[tracing::instrument(skip(self), fields(prober = self.prober.name()))]
    pub async fn extract(
        &self,
        path: &Path,
        original_name: &str,
    ) -> ExtractionResult<MetadataRecord> {
        let file_meta = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ExtractionError::NotFound(path.display().to_string()),
            _ => ExtractionError::ExtractionFailed(format!("cannot stat {}: {}", path.display(), e)),
        })?;
        if !file_meta.is_file() {
            return Err(ExtractionError::NotFound(path.display().to_string()));
        }

        let absolute = tokio::fs::canonicalize(path)
            .await
            .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;

        let raw = self.prober.probe(&absolute).await?;

        let identity = FileIdentity {
            name: original_name.to_string(),
            path: absolute,
            size_bytes: file_meta.len(),
        };
        let record = normalize(&raw, &identity)?;

        tracing::info!(
            file_name = %record.file_name,
            video_codec = %record.video_codec,
            width = record.width,
            height = record.height,
            duration_seconds = record.duration_seconds,
            "Video metadata extracted"
        );

        Ok(record)
    }
}

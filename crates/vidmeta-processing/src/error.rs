use thiserror::Error;

/// Failures of the probe and normalize pipeline.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Video file not found: {0}")]
    NotFound(String),

    #[error("Error during video metadata extraction: {0}")]
    ExtractionFailed(String),

    #[error("Failed to parse metadata: {0}")]
    ParseFailed(String),

    #[error("Invalid prober configuration: {0}")]
    InvalidConfiguration(String),
}

pub type ExtractionResult<T> = Result<T, ExtractionError>;

//! Vidmeta Core Library
//!
//! This crate provides the metadata record model, error types and configuration
//! shared across all vidmeta components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ExtractorConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::MetadataRecord;

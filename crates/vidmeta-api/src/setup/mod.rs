//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use vidmeta_core::Config;
use vidmeta_processing::{FfprobeRunner, VideoMetadataExtractor};
use vidmeta_storage::{LocalMetadataStore, MetadataStore};

/// Build the extractor and store from configuration and wire the routes.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    let prober = FfprobeRunner::new(config.ffprobe_path())
        .context("Failed to configure ffprobe runner")?;
    let extractor = VideoMetadataExtractor::new(Arc::new(prober));
    let store = LocalMetadataStore::new(config.metadata_output_dir());

    tracing::info!(
        prober = extractor.prober_name(),
        store = store.backend_name(),
        ffprobe_path = %config.ffprobe_path(),
        metadata_output_dir = %config.metadata_output_dir().display(),
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let state = Arc::new(AppState::new(config.clone(), extractor, Arc::new(store)));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

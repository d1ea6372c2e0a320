//! Application state shared by all handlers.

use std::sync::Arc;
use vidmeta_core::Config;
use vidmeta_processing::VideoMetadataExtractor;
use vidmeta_storage::MetadataStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: VideoMetadataExtractor,
    pub store: Arc<dyn MetadataStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        extractor: VideoMetadataExtractor,
        store: Arc<dyn MetadataStore>,
    ) -> Self {
        Self {
            config,
            extractor,
            store,
        }
    }
}

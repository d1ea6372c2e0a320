//! Test helpers: build AppState and router for integration tests.
//!
//! The real ffprobe is replaced by [`StubProber`], so these tests need no
//! external tools. Run with `cargo test -p vidmeta-api`.

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use vidmeta_api::setup::routes;
use vidmeta_api::state::AppState;
use vidmeta_core::{BaseConfig, Config, ExtractorConfig};
use vidmeta_processing::error::ExtractionResult;
use vidmeta_processing::{ExtractionError, MediaProber, VideoMetadataExtractor};
use vidmeta_storage::LocalMetadataStore;

/// What the stub prober answers with.
#[derive(Debug, Clone)]
pub enum StubReply {
    Output(String),
    Fail(String),
}

/// Prober double that returns a canned reply and counts invocations.
pub struct StubProber {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubProber {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaProber for StubProber {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn probe(&self, path: &Path) -> ExtractionResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(path.is_absolute(), "prober must receive an absolute path");
        match &self.reply {
            StubReply::Output(text) => Ok(text.clone()),
            StubReply::Fail(msg) => Err(ExtractionError::ExtractionFailed(msg.clone())),
        }
    }
}

/// Test application: server plus the resources it owns.
pub struct TestApp {
    pub server: TestServer,
    pub prober: Arc<StubProber>,
    pub output_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config(output_dir: &Path, max_upload_size_bytes: usize) -> Config {
    create_test_config_for("test", output_dir, max_upload_size_bytes)
}

pub fn create_test_config_for(
    environment: &str,
    output_dir: &Path,
    max_upload_size_bytes: usize,
) -> Config {
    Config(Box::new(ExtractorConfig {
        base: BaseConfig {
            server_port: 4000,
            cors_origins: vec!["https://app.example.com".to_string()],
            environment: environment.to_string(),
        },
        ffprobe_path: "ffprobe".to_string(),
        metadata_output_dir: output_dir.to_path_buf(),
        max_upload_size_bytes,
    }))
}

/// Setup a test app whose prober answers with `reply`.
pub fn setup_test_app(reply: StubReply) -> TestApp {
    setup_test_app_with_limit(reply, 10 * 1024 * 1024)
}

pub fn setup_test_app_with_limit(reply: StubReply, max_upload_size_bytes: usize) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("metadata");
    setup_test_app_at(reply, temp_dir, output_dir, max_upload_size_bytes)
}

/// Setup a test app writing records into `output_dir`, which may be unusable on purpose.
pub fn setup_test_app_at(
    reply: StubReply,
    temp_dir: TempDir,
    output_dir: PathBuf,
    max_upload_size_bytes: usize,
) -> TestApp {
    let config = create_test_config(&output_dir, max_upload_size_bytes);
    build_test_app(reply, temp_dir, output_dir, config)
}

/// Setup a test app that renders errors the way a production deployment does.
pub fn setup_production_test_app(reply: StubReply) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("metadata");
    let config = create_test_config_for("production", &output_dir, 10 * 1024 * 1024);
    build_test_app(reply, temp_dir, output_dir, config)
}

fn build_test_app(
    reply: StubReply,
    temp_dir: TempDir,
    output_dir: PathBuf,
    config: Config,
) -> TestApp {
    let prober = Arc::new(StubProber::new(reply));
    let extractor = VideoMetadataExtractor::new(prober.clone());
    let store = Arc::new(LocalMetadataStore::new(&output_dir));
    let state = Arc::new(AppState::new(config.clone(), extractor, store));

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        prober,
        output_dir,
        _temp_dir: temp_dir,
    }
}

//! Configuration module
//!
//! Settings are read from the environment (after loading an optional `.env`
//! file). Only the ffprobe location is essential; everything else has a
//! working default.

use std::env;
use std::path::{Path, PathBuf};

const SERVER_PORT: u16 = 4000;
const MAX_UPLOAD_SIZE_MB: usize = 500;
const DEFAULT_FFPROBE_PATH: &str = "ffprobe";
const DEFAULT_METADATA_OUTPUT_DIR: &str = "metadata";

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Extraction service configuration
#[derive(Clone, Debug)]
pub struct ExtractorConfig {
    pub base: BaseConfig,
    /// Path to the ffprobe executable
    pub ffprobe_path: String,
    /// Directory that receives one JSON file per extracted upload
    pub metadata_output_dir: PathBuf,
    pub max_upload_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ExtractorConfig>);

impl Config {
    fn as_extractor(&self) -> &ExtractorConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_extractor().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ExtractorConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_extractor().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_extractor().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_extractor().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_extractor().base.environment
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.as_extractor().ffprobe_path
    }

    pub fn metadata_output_dir(&self) -> &Path {
        &self.as_extractor().metadata_output_dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_extractor().max_upload_size_bytes
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

/// Upload limit in bytes from a megabyte count; unset means the default.
fn upload_limit_bytes(megabytes: Option<&str>) -> Result<usize, anyhow::Error> {
    let megabytes = match megabytes {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?,
        None => MAX_UPLOAD_SIZE_MB,
    };

    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))
}

impl ExtractorConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        let config = ExtractorConfig {
            base,
            ffprobe_path: env::var("FFPROBE_PATH")
                .unwrap_or_else(|_| DEFAULT_FFPROBE_PATH.to_string()),
            metadata_output_dir: env::var("METADATA_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_METADATA_OUTPUT_DIR)),
            max_upload_size_bytes: upload_limit_bytes(env::var("MAX_UPLOAD_SIZE_MB").ok().as_deref())?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.ffprobe_path.trim().is_empty() {
            return Err(anyhow::anyhow!("FFPROBE_PATH must not be empty"));
        }

        if self.metadata_output_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("METADATA_OUTPUT_DIR must not be empty"));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        Ok(())
    }
}

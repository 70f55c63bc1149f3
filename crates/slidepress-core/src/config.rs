//! Configuration module
//!
//! Configuration is read from the environment once at process start and is
//! read-only afterwards. Remote storage is resolved here into a single
//! `Option<RemoteStorageConfig>`: it is `Some` only when all four of access key,
//! secret key, bucket and region are set and non-empty.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_LOCAL_FILES_PREFIX, DEFAULT_OUTPUT_DIR, DEFAULT_UPLOAD_DIR};

const SERVER_PORT: u16 = 8000;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const CONVERSION_TIMEOUT_SECS: u64 = 300;
const CORS_ORIGINS: &str = "http://localhost:3000";

/// Credentials and location for the remote object store.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteStorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub endpoint_url: Option<String>,
}

impl RemoteStorageConfig {
    /// Build from the four raw values; `None` unless every one is non-empty.
    pub fn from_parts(
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
        bucket: Option<String>,
        region: Option<String>,
    ) -> Option<Self> {
        let non_empty = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        Some(RemoteStorageConfig {
            access_key_id: non_empty(access_key_id)?,
            secret_access_key: non_empty(secret_access_key)?,
            bucket: non_empty(bucket)?,
            region: non_empty(region)?,
            endpoint_url: None,
        })
    }

    pub fn with_endpoint(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url.filter(|s| !s.trim().is_empty());
        self
    }
}

// Secrets stay out of logs.
impl fmt::Debug for RemoteStorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStorageConfig")
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

/// Service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    pub local_files_prefix: String,
    pub public_base_url: Option<String>,
    pub max_upload_size_bytes: usize,
    pub converter_path: String,
    /// `None` disables the conversion timeout.
    pub conversion_timeout_secs: Option<u64>,
    pub remote_storage: Option<RemoteStorageConfig>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn inner(&self) -> &ServiceConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    /// Development configuration rooted at the given directories, with no remote storage.
    /// Reads nothing from the environment.
    pub fn for_directories(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Config(Box::new(ServiceConfig {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec![CORS_ORIGINS.to_string()],
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
            local_files_prefix: DEFAULT_LOCAL_FILES_PREFIX.to_string(),
            public_base_url: None,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            converter_path: "soffice".to_string(),
            conversion_timeout_secs: Some(CONVERSION_TIMEOUT_SECS),
            remote_storage: None,
        }))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().server_port
    }

    pub fn environment(&self) -> &str {
        &self.inner().environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().cors_origins
    }

    pub fn upload_dir(&self) -> &Path {
        &self.inner().upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.inner().output_dir
    }

    pub fn local_files_prefix(&self) -> &str {
        &self.inner().local_files_prefix
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.inner().public_base_url.as_deref()
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn converter_path(&self) -> &str {
        &self.inner().converter_path
    }

    pub fn conversion_timeout_secs(&self) -> Option<u64> {
        self.inner().conversion_timeout_secs
    }

    pub fn remote_storage(&self) -> Option<&RemoteStorageConfig> {
        self.inner().remote_storage.as_ref()
    }
}

fn upload_size_bytes(megabytes: usize) -> Result<usize, anyhow::Error> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large: {}", megabytes))
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| CORS_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let conversion_timeout_secs = env::var("CONVERSION_TIMEOUT_SECS")
            .unwrap_or_else(|_| CONVERSION_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(CONVERSION_TIMEOUT_SECS);

        let remote_storage = RemoteStorageConfig::from_parts(
            env::var("AWS_ACCESS_KEY_ID").ok(),
            env::var("AWS_SECRET_ACCESS_KEY").ok(),
            env::var("AWS_S3_BUCKET").ok(),
            env::var("AWS_REGION").ok(),
        )
        .map(|remote| remote.with_endpoint(env::var("S3_ENDPOINT").ok()));

        let config = ServiceConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            output_dir: env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
                .into(),
            local_files_prefix: env::var("LOCAL_FILES_PREFIX")
                .unwrap_or_else(|_| DEFAULT_LOCAL_FILES_PREFIX.to_string())
                .trim_end_matches('/')
                .to_string(),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty()),
            max_upload_size_bytes: upload_size_bytes(max_upload_size_mb)?,
            converter_path: env::var("CONVERTER_PATH").unwrap_or_else(|_| "soffice".to_string()),
            conversion_timeout_secs: Some(conversion_timeout_secs).filter(|&secs| secs > 0),
            remote_storage,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("PORT cannot be 0"));
        }

        if !self.local_files_prefix.starts_with('/') || self.local_files_prefix.len() < 2 {
            return Err(anyhow::anyhow!(
                "LOCAL_FILES_PREFIX must start with '/' and name a path, got '{}'",
                self.local_files_prefix
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.upload_dir == self.output_dir {
            return Err(anyhow::anyhow!(
                "UPLOAD_DIR and OUTPUT_DIR must be different directories"
            ));
        }

        let env = self.environment.to_lowercase();
        let is_production = env == "production" || env == "prod";
        if is_production && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}

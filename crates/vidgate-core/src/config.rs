//! Configuration module
//!
//! Env-driven configuration for the API and its collaborators: server,
//! authentication, metadata store, object storage, media tooling, and upload
//! limits. Every tunable has a default except `JWT_SECRET`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_MAX_VIDEO_SIZE_BYTES: usize = 1 << 30; // 1 GiB
const DEFAULT_MAX_THUMBNAIL_SIZE_BYTES: usize = 10 << 20; // 10 MiB

/// Where uploaded thumbnails live.
///
/// `Storage` (durable, default) writes them to the object-storage backend under
/// a predictable per-record key. `Memory` keeps them in-process and loses them
/// on restart; it exists for development and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailStoreKind {
    Storage,
    Memory,
}

impl FromStr for ThumbnailStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "storage" => Ok(ThumbnailStoreKind::Storage),
            "memory" => Ok(ThumbnailStoreKind::Memory),
            other => Err(format!("Unknown thumbnail store kind: {}", other)),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub jwt_secret: String,
    /// Postgres connection string; when absent the API runs on the in-memory
    /// metadata store (development mode).
    pub database_url: Option<String>,
    // Object storage
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    /// Base URL this API is reachable at; used for in-process thumbnail URLs.
    pub public_base_url: String,
    // Media tooling
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    /// Upper bound on concurrent ffmpeg/ffprobe children. 0 = unbounded.
    pub max_concurrent_jobs: usize,
    /// Root for per-request scratch directories; system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
    // Upload limits
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
    pub video_allowed_content_types: Vec<String>,
    pub thumbnail_allowed_content_types: Vec<String>,
    pub thumbnail_store: ThumbnailStoreKind,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_parse("VIDGATE_PORT", DEFAULT_SERVER_PORT)?;
        let public_base_url = env::var("VIDGATE_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port));

        Ok(Config {
            server_port,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            database_url: env_opt("DATABASE_URL"),
            storage_backend: env_opt("STORAGE_BACKEND")
                .map(|s| s.parse().map_err(anyhow::Error::msg))
                .transpose()?,
            s3_bucket: env_opt("S3_BUCKET"),
            s3_region: env_opt("S3_REGION").or_else(|| env_opt("AWS_REGION")),
            s3_endpoint: env_opt("S3_ENDPOINT"),
            local_storage_path: env_opt("LOCAL_STORAGE_PATH"),
            local_storage_base_url: env_opt("LOCAL_STORAGE_BASE_URL"),
            public_base_url,
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            max_concurrent_jobs: env_parse("VIDGATE_MAX_CONCURRENT_JOBS", 0)?,
            scratch_dir: env_opt("VIDGATE_SCRATCH_DIR").map(PathBuf::from),
            max_video_size_bytes: env_parse(
                "VIDGATE_MAX_VIDEO_SIZE_BYTES",
                DEFAULT_MAX_VIDEO_SIZE_BYTES,
            )?,
            max_thumbnail_size_bytes: env_parse(
                "VIDGATE_MAX_THUMBNAIL_SIZE_BYTES",
                DEFAULT_MAX_THUMBNAIL_SIZE_BYTES,
            )?,
            video_allowed_content_types: env_list(
                "VIDGATE_VIDEO_CONTENT_TYPES",
                &["video/mp4"],
            ),
            thumbnail_allowed_content_types: env_list(
                "VIDGATE_THUMBNAIL_CONTENT_TYPES",
                &["image/jpeg", "image/png"],
            ),
            thumbnail_store: env_opt("VIDGATE_THUMBNAIL_STORE")
                .map(|s| s.parse().map_err(anyhow::Error::msg))
                .transpose()?
                .unwrap_or(ThumbnailStoreKind::Storage),
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", key, e)),
        None => Ok(default),
    }
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    match env_opt(key) {
        Some(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

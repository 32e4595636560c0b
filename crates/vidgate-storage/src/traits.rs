//! Storage abstraction trait
//!
//! This module defines the Storage trait that all object-storage backends must
//! implement.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use vidgate_core::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object-storage abstraction
///
/// All backends (S3, local filesystem) implement this trait so the upload
/// pipeline can work against any of them without coupling to implementation
/// details.
///
/// **Key format:** `{orientation}/{random}.{ext}` for media,
/// `thumbnails/{video_id}.{ext}` for thumbnails. See the `keys` module.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store a byte buffer under `key` and return the public URL.
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Store a local file under `key` without buffering it in memory and
    /// return the public URL. This is the path the upload pipeline hands its
    /// remuxed temp file to.
    async fn put_file(
        &self,
        key: &str,
        content_type: &str,
        path: &Path,
    ) -> StorageResult<String>;

    /// Fetch an object by key.
    async fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete an object by key. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Generate a time-limited URL granting retrieval access to an otherwise
    /// private object. Backends without signing return their public URL.
    async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

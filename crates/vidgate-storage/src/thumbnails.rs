//! Injected thumbnail store abstraction.
//!
//! Thumbnails follow a parallel path to video uploads: no subprocess step and a
//! predictable per-record key. The store is injected so it can be backed by the
//! durable object store (default) or kept in-process for development; the
//! in-memory variant loses everything on restart by design.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::keys;
use crate::traits::{Storage, StorageResult};

/// A thumbnail held by an in-process store.
#[derive(Debug, Clone)]
pub struct StoredThumbnail {
    pub content_type: String,
    pub data: Bytes,
}

/// Keyed thumbnail storage for video records.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Store the thumbnail for `video_id`, replacing any previous one, and
    /// return its access URL.
    async fn put(
        &self,
        video_id: Uuid,
        extension: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Fetch the thumbnail bytes for `video_id` if this store can serve them
    /// directly. Stores whose URLs point at an external backend return `None`.
    async fn get(&self, video_id: Uuid) -> StorageResult<Option<StoredThumbnail>>;
}

/// Durable store: thumbnails live in the object-storage backend under
/// `thumbnails/{video_id}.{ext}`.
pub struct ObjectThumbnailStore {
    storage: Arc<dyn Storage>,
}

impl ObjectThumbnailStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl ThumbnailStore for ObjectThumbnailStore {
    async fn put(
        &self,
        video_id: Uuid,
        extension: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let key = keys::thumbnail_key(video_id, extension);
        self.storage.put(&key, content_type, data).await
    }

    async fn get(&self, _video_id: Uuid) -> StorageResult<Option<StoredThumbnail>> {
        // Clients retrieve via the URL returned from put; nothing is served
        // from process memory.
        Ok(None)
    }
}

/// In-process store: a concurrency-safe map from video id to thumbnail bytes.
/// Writers targeting the same id serialize on the lock.
pub struct MemoryThumbnailStore {
    base_url: String,
    inner: RwLock<HashMap<Uuid, StoredThumbnail>>,
}

impl MemoryThumbnailStore {
    /// `base_url` is the public base URL of the API serving
    /// `GET /thumbnails/{video_id}`.
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            inner: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl ThumbnailStore for MemoryThumbnailStore {
    async fn put(
        &self,
        video_id: Uuid,
        _extension: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let thumbnail = StoredThumbnail {
            content_type: content_type.to_string(),
            data: Bytes::from(data),
        };
        self.inner.write().await.insert(video_id, thumbnail);
        Ok(format!(
            "{}/thumbnails/{}",
            self.base_url.trim_end_matches('/'),
            video_id
        ))
    }

    async fn get(&self, video_id: Uuid) -> StorageResult<Option<StoredThumbnail>> {
        Ok(self.inner.read().await.get(&video_id).cloned())
    }
}

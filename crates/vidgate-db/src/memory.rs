//! In-memory video repository for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use vidgate_core::models::VideoRecord;
use vidgate_core::AppError;

use crate::repository::VideoRepository;

/// Process-local repository. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryVideoRepository {
    inner: RwLock<HashMap<Uuid, VideoRecord>>,
}

impl MemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn create(&self, user_id: Uuid, title: String) -> Result<VideoRecord, AppError> {
        let record = VideoRecord::new(user_id, title);
        self.inner
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn update(&self, mut record: VideoRecord) -> Result<VideoRecord, AppError> {
        let mut guard = self.inner.write().await;
        if !guard.contains_key(&record.id) {
            return Err(AppError::NotFound(format!("Video {} not found", record.id)));
        }
        record.updated_at = Utc::now();
        guard.insert(record.id, record.clone());
        Ok(record)
    }
}

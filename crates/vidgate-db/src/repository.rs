use async_trait::async_trait;
use uuid::Uuid;
use vidgate_core::models::VideoRecord;
use vidgate_core::AppError;

/// Key-value capability over video records.
///
/// Records are created before any upload and never deleted by the pipeline;
/// `update` persists reference changes (media/thumbnail URLs) and refreshes
/// `updated_at`.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Create a new record owned by `user_id`.
    async fn create(&self, user_id: Uuid, title: String) -> Result<VideoRecord, AppError>;

    /// Fetch a record by id.
    async fn get(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError>;

    /// Persist an updated record and return it with a fresh `updated_at`.
    /// Fails with `NotFound` if the record no longer exists.
    async fn update(&self, record: VideoRecord) -> Result<VideoRecord, AppError>;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video record in the metadata store.
///
/// Created by the create-video flow; `media_url` is set exactly once per
/// successful upload. Records are never deleted by the upload pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoRecord {
    pub fn new(user_id: Uuid, title: String) -> Self {
        let now = Utc::now();
        VideoRecord {
            id: Uuid::new_v4(),
            user_id,
            title,
            thumbnail_url: None,
            media_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VideoResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<VideoRecord> for VideoResponse {
    fn from(record: VideoRecord) -> Self {
        VideoResponse {
            id: record.id,
            user_id: record.user_id,
            title: record.title,
            thumbnail_url: record.thumbnail_url,
            media_url: record.media_url,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

//! Postgres-backed video repository.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use vidgate_core::models::VideoRecord;
use vidgate_core::AppError;

use crate::repository::VideoRepository;

const MAX_CONNECTIONS: u32 = 10;

/// Connect to Postgres and run pending migrations.
pub async fn connect(database_url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .map_err(|e| AppError::Database(format!("Failed to connect: {}", e)))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;

    tracing::info!("Connected to metadata store and applied migrations");

    Ok(pool)
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn create(&self, user_id: Uuid, title: String) -> Result<VideoRecord, AppError> {
        let record = VideoRecord::new(user_id, title);

        let created: VideoRecord = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            INSERT INTO videos (id, user_id, title, thumbnail_url, media_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, title, thumbnail_url, media_url, created_at, updated_at
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.title)
        .bind(&record.thumbnail_url)
        .bind(&record.media_url)
        .bind(record.created_at)
        .bind(record.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            SELECT id, user_id, title, thumbnail_url, media_url, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn update(&self, record: VideoRecord) -> Result<VideoRecord, AppError> {
        let updated: Option<VideoRecord> = sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            UPDATE videos
            SET title = $2, thumbnail_url = $3, media_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, title, thumbnail_url, media_url, created_at, updated_at
            "#,
        )
        .bind(record.id)
        .bind(&record.title)
        .bind(&record.thumbnail_url)
        .bind(&record.media_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        updated.ok_or_else(|| AppError::NotFound(format!("Video {} not found", record.id)))
    }
}

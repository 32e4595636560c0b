//! Collaborator construction from configuration.

use std::sync::Arc;

use vidgate_core::{Config, ThumbnailStoreKind};
use vidgate_db::{MemoryVideoRepository, PgVideoRepository, VideoRepository};
use vidgate_processing::{FfmpegEngine, MediaEngine};
use vidgate_storage::{MemoryThumbnailStore, ObjectThumbnailStore, ThumbnailStore};

use crate::state::AppState;

pub async fn build_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let repository: Arc<dyn VideoRepository> = match &config.database_url {
        Some(url) => {
            let pool = vidgate_db::connect(url).await?;
            Arc::new(PgVideoRepository::new(pool))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set; using in-memory metadata store (records are lost on restart)"
            );
            Arc::new(MemoryVideoRepository::new())
        }
    };

    let storage = vidgate_storage::create_storage(&config).await?;

    let thumbnails: Arc<dyn ThumbnailStore> = match config.thumbnail_store {
        ThumbnailStoreKind::Storage => Arc::new(ObjectThumbnailStore::new(storage.clone())),
        ThumbnailStoreKind::Memory => {
            tracing::warn!("In-memory thumbnail store selected; thumbnails are lost on restart");
            Arc::new(MemoryThumbnailStore::new(config.public_base_url.clone()))
        }
    };

    let engine: Arc<dyn MediaEngine> = Arc::new(
        FfmpegEngine::new(config.ffprobe_path.clone(), config.ffmpeg_path.clone())?
            .with_max_concurrent(config.max_concurrent_jobs),
    );

    Ok(Arc::new(AppState {
        config,
        repository,
        storage,
        thumbnails,
        engine,
    }))
}

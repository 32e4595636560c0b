//! Application state shared by all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use vidgate_core::{AppError, Config};
use vidgate_db::VideoRepository;
use vidgate_processing::MediaEngine;
use vidgate_storage::{Storage, ThumbnailStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: Arc<dyn VideoRepository>,
    pub storage: Arc<dyn Storage>,
    pub thumbnails: Arc<dyn ThumbnailStore>,
    pub engine: Arc<dyn MediaEngine>,
}

impl AppState {
    fn scratch_root(&self) -> PathBuf {
        self.config
            .scratch_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Create the per-request scratch directory.
    ///
    /// Dropping the returned guard removes the directory and everything inside
    /// it, including the upload input and any remux output. That drop is what
    /// guarantees cleanup on every exit path of the pipeline.
    pub fn new_scratch_dir(&self) -> Result<TempDir, AppError> {
        let root = self.scratch_root();
        std::fs::create_dir_all(&root)
            .map_err(|e| AppError::Internal(format!("Failed to create scratch root: {}", e)))?;
        tempfile::Builder::new()
            .prefix("vidgate-upload-")
            .tempdir_in(&root)
            .map_err(|e| AppError::Internal(format!("Failed to create scratch directory: {}", e)))
    }
}

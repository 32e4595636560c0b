#![allow(dead_code)]

pub mod engine;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;
use uuid::Uuid;
use vidgate_api::auth::create_token;
use vidgate_api::setup::routes::setup_routes;
use vidgate_api::AppState;
use vidgate_core::models::VideoResponse;
use vidgate_core::{Config, StorageBackend, ThumbnailStoreKind};
use vidgate_db::MemoryVideoRepository;
use vidgate_processing::MediaEngine;
use vidgate_storage::{
    LocalStorage, MemoryThumbnailStore, ObjectThumbnailStore, Storage, ThumbnailStore,
};

pub const TEST_JWT_SECRET: &str = "test-secret";

/// A running test application with real local storage, an in-memory metadata
/// store, and an injected media engine.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub storage_dir: TempDir,
    pub scratch_dir: TempDir,
}

fn test_config(storage_dir: &Path, scratch_dir: &Path, thumbnails: ThumbnailStoreKind) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        database_url: None,
        storage_backend: Some(StorageBackend::Local),
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some(storage_dir.to_string_lossy().to_string()),
        local_storage_base_url: Some("http://localhost:8080/media".to_string()),
        public_base_url: "http://localhost:8080".to_string(),
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        max_concurrent_jobs: 0,
        scratch_dir: Some(scratch_dir.to_path_buf()),
        max_video_size_bytes: 1024 * 1024,
        max_thumbnail_size_bytes: 64 * 1024,
        video_allowed_content_types: vec!["video/mp4".to_string()],
        thumbnail_allowed_content_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
        ],
        thumbnail_store: thumbnails,
    }
}

pub async fn spawn_app(engine: Arc<dyn MediaEngine>) -> TestApp {
    spawn_app_with_thumbnails(engine, ThumbnailStoreKind::Memory).await
}

pub async fn spawn_app_with_thumbnails(
    engine: Arc<dyn MediaEngine>,
    thumbnail_kind: ThumbnailStoreKind,
) -> TestApp {
    let storage_dir = tempfile::tempdir().expect("Failed to create storage directory");
    let scratch_dir = tempfile::tempdir().expect("Failed to create scratch directory");

    let config = test_config(storage_dir.path(), scratch_dir.path(), thumbnail_kind);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(
            storage_dir.path(),
            config.local_storage_base_url.clone().unwrap(),
        )
        .await
        .expect("Failed to create local storage"),
    );

    let thumbnails: Arc<dyn ThumbnailStore> = match thumbnail_kind {
        ThumbnailStoreKind::Storage => Arc::new(ObjectThumbnailStore::new(storage.clone())),
        ThumbnailStoreKind::Memory => {
            Arc::new(MemoryThumbnailStore::new(config.public_base_url.clone()))
        }
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        repository: Arc::new(MemoryVideoRepository::new()),
        storage,
        thumbnails,
        engine,
    });

    let router = setup_routes(&config, state.clone()).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        state,
        storage_dir,
        scratch_dir,
    }
}

pub fn token_for(user_id: Uuid) -> String {
    create_token(user_id, TEST_JWT_SECRET, chrono::Duration::hours(1))
        .expect("Failed to mint test token")
}

impl TestApp {
    /// Create a record through the API as `user_id` and return it.
    pub async fn create_video(&self, user_id: Uuid, title: &str) -> VideoResponse {
        let response = self
            .server
            .post("/videos")
            .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
            .json(&serde_json::json!({ "title": title }))
            .await;
        assert_eq!(response.status_code(), 200, "create_video failed");
        response.json::<VideoResponse>()
    }

    /// Keys of every object currently in local storage, relative to its root.
    pub fn stored_object_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_files(self.storage_dir.path(), self.storage_dir.path(), &mut keys);
        keys.sort();
        keys
    }

    /// Number of entries left under the scratch root; zero after every
    /// completed request.
    pub fn scratch_entries(&self) -> usize {
        std::fs::read_dir(self.scratch_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

fn collect_files(root: &Path, dir: &Path, keys: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, keys);
        } else if let Ok(relative) = path.strip_prefix(root) {
            keys.push(relative_key(relative));
        }
    }
}

fn relative_key(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn fake_mp4_bytes() -> Vec<u8> {
    // Enough bytes to look like a small upload; the fake engine never parses
    // them.
    let mut data = b"\x00\x00\x00\x18ftypmp42".to_vec();
    data.extend(std::iter::repeat(0u8).take(2048));
    data
}

pub fn multipart_file(
    field_name: &str,
    file_name: &str,
    content_type: &str,
    data: Vec<u8>,
) -> axum_test::multipart::MultipartForm {
    axum_test::multipart::MultipartForm::new().add_part(
        field_name.to_string(),
        axum_test::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_type(content_type.to_string()),
    )
}

/// Path buffer helper for assertions on storage contents.
pub fn storage_file(app: &TestApp, key: &str) -> PathBuf {
    app.storage_dir.path().join(key)
}

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use uuid::Uuid;
use vidgate_core::models::VideoResponse;
use vidgate_core::ThumbnailStoreKind;

use helpers::engine::FakeEngine;
use helpers::{multipart_file, spawn_app, spawn_app_with_thumbnails, token_for};

fn engine() -> Arc<FakeEngine> {
    Arc::new(FakeEngine::WithVideo {
        width: 1920,
        height: 1080,
    })
}

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake image payload";

#[tokio::test]
async fn test_upload_thumbnail_memory_store_round_trip() {
    let app = spawn_app(engine()).await;
    let user_id = Uuid::new_v4();
    let video = app.create_video(user_id, "clip").await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
        .multipart(multipart_file(
            "thumbnail",
            "thumb.png",
            "image/png",
            PNG_BYTES.to_vec(),
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let updated = response.json::<VideoResponse>();
    let thumbnail_url = updated.thumbnail_url.expect("thumbnail_url must be set");
    assert_eq!(
        thumbnail_url,
        format!("http://localhost:8080/thumbnails/{}", video.id)
    );

    // The in-process store serves the bytes back through the public endpoint.
    let fetched = app
        .server
        .get(&format!("/thumbnails/{}", video.id))
        .await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(
        fetched
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(fetched.as_bytes().as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn test_upload_thumbnail_durable_store_writes_predictable_key() {
    let app = spawn_app_with_thumbnails(engine(), ThumbnailStoreKind::Storage).await;
    let user_id = Uuid::new_v4();
    let video = app.create_video(user_id, "clip").await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
        .multipart(multipart_file(
            "thumbnail",
            "thumb.jpeg",
            "image/jpeg",
            b"jpeg payload".to_vec(),
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let updated = response.json::<VideoResponse>();
    let expected_key = format!("thumbnails/{}.jpeg", video.id);
    assert!(updated.thumbnail_url.unwrap().ends_with(&expected_key));

    assert_eq!(app.stored_object_keys(), vec![expected_key]);

    // The durable store does not serve bytes in-process.
    let fetched = app.server.get(&format!("/thumbnails/{}", video.id)).await;
    assert_eq!(fetched.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_thumbnail_unsupported_type() {
    let app = spawn_app(engine()).await;
    let user_id = Uuid::new_v4();
    let video = app.create_video(user_id, "clip").await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
        .multipart(multipart_file(
            "thumbnail",
            "thumb.gif",
            "image/gif",
            b"gif payload".to_vec(),
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let fetched = app.server.get(&format!("/thumbnails/{}", video.id)).await;
    assert_eq!(fetched.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_thumbnail_forbidden_for_non_owner() {
    let app = spawn_app(engine()).await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner, "clip").await;

    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .add_header("Authorization", format!("Bearer {}", token_for(Uuid::new_v4())))
        .multipart(multipart_file(
            "thumbnail",
            "thumb.png",
            "image/png",
            PNG_BYTES.to_vec(),
        ))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_upload_thumbnail_too_large() {
    let app = spawn_app(engine()).await;
    let user_id = Uuid::new_v4();
    let video = app.create_video(user_id, "clip").await;

    // Config caps thumbnails at 64 KiB in tests; send 128 KiB.
    let oversized = vec![0u8; 128 * 1024];
    let response = app
        .server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
        .multipart(multipart_file("thumbnail", "thumb.png", "image/png", oversized))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_get_thumbnail_missing_is_not_found() {
    let app = spawn_app(engine()).await;
    let response = app
        .server
        .get(&format!("/thumbnails/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_thumbnail_and_video_references_are_independent() {
    let app = spawn_app(engine()).await;
    let user_id = Uuid::new_v4();
    let video = app.create_video(user_id, "clip").await;

    app.server
        .post(&format!("/videos/{}/thumbnail", video.id))
        .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
        .multipart(multipart_file(
            "thumbnail",
            "thumb.png",
            "image/png",
            PNG_BYTES.to_vec(),
        ))
        .await;

    let response = app
        .server
        .post(&format!("/videos/{}/video", video.id))
        .add_header("Authorization", format!("Bearer {}", token_for(user_id)))
        .multipart(multipart_file(
            "video",
            "clip.mp4",
            "video/mp4",
            helpers::fake_mp4_bytes(),
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let record = response.json::<VideoResponse>();
    assert!(record.thumbnail_url.is_some());
    assert!(record.media_url.is_some());
}

//! The upload orchestrator: buffer, probe, remux, name, store, persist.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use vidgate_core::models::{Orientation, VideoResponse};
use vidgate_core::AppError;
use vidgate_processing::aspect;
use vidgate_storage::keys;

use crate::auth::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::{
    parse_video_id, receive_video_upload, resolve_owned_record, BufferedUpload,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/videos/{id}/video",
    tag = "videos",
    params(
        ("id" = String, Path, description = "Target video record id")
    ),
    responses(
        (status = 200, description = "Video uploaded and record updated", body = VideoResponse),
        (status = 400, description = "Malformed id or form", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the record", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Content type not allowed", body = ErrorResponse),
        (status = 500, description = "Probe, remux, storage, or metadata failure", body = ErrorResponse)
    )
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = parse_video_id(&id)?;
    let mut record = resolve_owned_record(&state, video_id, auth.user_id).await?;

    // `_scratch` is the cleanup guard: every exit path below drops it,
    // removing the buffered upload and the remux output.
    let BufferedUpload {
        scratch: _scratch,
        input_path,
        content_type,
        size_bytes,
    } = receive_video_upload(&state, &mut multipart, "video").await?;

    let extension = keys::extension_for(&content_type)
        .ok_or_else(|| {
            AppError::UnsupportedMediaType(format!(
                "Content type '{}' has no subtype",
                content_type
            ))
        })?
        .to_string();

    tracing::debug!(video_id = %video_id, size_bytes, "Upload buffered to scratch file");

    let probe = state.engine.probe(&input_path).await?;
    let orientation = match probe.first_video_dimensions()? {
        Some((width, height)) => {
            let orientation = aspect::classify(width, height);
            tracing::debug!(
                video_id = %video_id,
                width,
                height,
                orientation = %orientation,
                "Stream geometry classified"
            );
            orientation
        }
        // No video stream descriptor: unknown orientation, not an error.
        None => Orientation::Other,
    };

    let remuxed_path = state.engine.remux_faststart(&input_path).await?;

    let random: [u8; keys::KEY_RANDOM_BYTES] = rand::random();
    let key = keys::object_key(orientation, &random, &extension);

    let media_url = state
        .storage
        .put_file(&key, &content_type, &remuxed_path)
        .await?;

    // Metadata is updated only after a confirmed upload, so a storage failure
    // never leaves a dangling reference. An update failure after a
    // successful put leaves an orphaned object; accepted, no compensating
    // delete.
    record.media_url = Some(media_url);
    let updated = state.repository.update(record).await?;

    tracing::info!(
        video_id = %video_id,
        key = %key,
        orientation = %orientation,
        size_bytes,
        "Video upload complete"
    );

    Ok(Json(VideoResponse::from(updated)))
}

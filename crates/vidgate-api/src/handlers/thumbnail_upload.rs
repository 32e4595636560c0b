//! Thumbnail upload: the parallel path with no subprocess step.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use vidgate_core::models::VideoResponse;
use vidgate_core::AppError;
use vidgate_storage::keys;

use crate::auth::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::{parse_video_id, receive_thumbnail_upload, resolve_owned_record};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/videos/{id}/thumbnail",
    tag = "videos",
    params(
        ("id" = String, Path, description = "Target video record id")
    ),
    responses(
        (status = 200, description = "Thumbnail stored and record updated", body = VideoResponse),
        (status = 400, description = "Malformed id or form", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the record", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Content type not allowed", body = ErrorResponse),
        (status = 500, description = "Storage or metadata failure", body = ErrorResponse)
    )
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = parse_video_id(&id)?;
    let mut record = resolve_owned_record(&state, video_id, auth.user_id).await?;

    let (content_type, data) =
        receive_thumbnail_upload(&state, &mut multipart, "thumbnail").await?;

    let extension = keys::extension_for(&content_type)
        .ok_or_else(|| {
            AppError::UnsupportedMediaType(format!(
                "Content type '{}' has no subtype",
                content_type
            ))
        })?
        .to_string();

    let size_bytes = data.len();

    let thumbnail_url = state
        .thumbnails
        .put(video_id, &extension, &content_type, data)
        .await?;

    record.thumbnail_url = Some(thumbnail_url);
    let updated = state.repository.update(record).await?;

    tracing::info!(video_id = %video_id, size_bytes, "Thumbnail upload complete");

    Ok(Json(VideoResponse::from(updated)))
}

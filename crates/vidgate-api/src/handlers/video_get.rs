use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use vidgate_core::models::VideoResponse;

use crate::auth::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::{parse_video_id, resolve_owned_record};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/videos/{id}",
    tag = "videos",
    params(
        ("id" = String, Path, description = "Video record id")
    ),
    responses(
        (status = 200, description = "Video record", body = VideoResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the record", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse)
    )
)]
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = parse_video_id(&id)?;
    let record = resolve_owned_record(&state, video_id, auth.user_id).await?;
    Ok(Json(VideoResponse::from(record)))
}

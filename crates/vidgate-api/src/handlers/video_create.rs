use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use vidgate_core::models::VideoResponse;
use vidgate_core::AppError;

use crate::auth::AuthContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVideoRequest {
    pub title: String,
}

#[utoipa::path(
    post,
    path = "/videos",
    tag = "videos",
    responses(
        (status = 200, description = "Video record created", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    )
)]
pub async fn create_video(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Json(body): Json<CreateVideoRequest>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let title = body.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title must not be empty".to_string()).into());
    }

    let record = state.repository.create(auth.user_id, title).await?;

    tracing::info!(video_id = %record.id, user_id = %auth.user_id, "Video record created");

    Ok(Json(VideoResponse::from(record)))
}

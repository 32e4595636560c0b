use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use vidgate_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::parse_video_id;
use crate::state::AppState;

/// Serve thumbnail bytes held by an in-process store. Durable stores return
/// nothing here; their URLs point at the object storage backend directly.
#[utoipa::path(
    get,
    path = "/thumbnails/{id}",
    tag = "thumbnails",
    params(
        ("id" = String, Path, description = "Video record id")
    ),
    responses(
        (status = 200, description = "Thumbnail bytes"),
        (status = 404, description = "No thumbnail held for this record", body = ErrorResponse)
    )
)]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, HttpAppError> {
    let video_id = parse_video_id(&id)?;

    match state.thumbnails.get(video_id).await? {
        Some(thumbnail) => Ok((
            [(header::CONTENT_TYPE, thumbnail.content_type)],
            thumbnail.data,
        )
            .into_response()),
        None => Err(AppError::NotFound(format!(
            "No thumbnail stored for video {}",
            video_id
        ))
        .into()),
    }
}

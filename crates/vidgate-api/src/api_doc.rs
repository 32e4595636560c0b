//! OpenAPI document.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::handlers::video_create::CreateVideoRequest;
use vidgate_core::models::{Orientation, VideoResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vidgate API",
        description = "Video ingestion: probe, faststart remux, object storage placement"
    ),
    paths(
        handlers::video_create::create_video,
        handlers::video_get::get_video,
        handlers::video_upload::upload_video,
        handlers::thumbnail_upload::upload_thumbnail,
        handlers::thumbnail_get::get_thumbnail,
    ),
    components(schemas(VideoResponse, ErrorResponse, CreateVideoRequest, Orientation)),
    tags(
        (name = "videos", description = "Video records and media upload"),
        (name = "thumbnails", description = "Thumbnail retrieval")
    )
)]
pub struct ApiDoc;

//! HTTP handlers.

pub mod thumbnail_get;
pub mod thumbnail_upload;
pub mod video_create;
pub mod video_get;
pub mod video_upload;

use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, Multipart};
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;
use vidgate_core::models::VideoRecord;
use vidgate_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Parse a path segment as a record id.
pub(crate) fn parse_video_id(raw: &str) -> Result<Uuid, HttpAppError> {
    Uuid::parse_str(raw)
        .map_err(|_| HttpAppError(AppError::BadRequest(format!("Invalid video id: {}", raw))))
}

/// Resolve the target record and enforce ownership. Runs before any file is
/// written, so rejected requests leave nothing to clean up.
pub(crate) async fn resolve_owned_record(
    state: &AppState,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<VideoRecord, HttpAppError> {
    let record = state
        .repository
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video_id)))?;

    if !record.is_owned_by(user_id) {
        return Err(AppError::Forbidden(
            "Only the owner may modify this video".to_string(),
        )
        .into());
    }

    Ok(record)
}

/// The declared content type of a field, checked against an allow-list.
///
/// The type is trusted from the client header, not sniffed from the bytes.
/// This is a known weak validation, kept as-is deliberately.
pub(crate) fn validated_content_type(
    field: &Field<'_>,
    allowed: &[String],
) -> Result<String, HttpAppError> {
    let content_type = field
        .content_type()
        .map(str::to_string)
        .ok_or_else(|| AppError::UnsupportedMediaType("Missing content type".to_string()))?;

    if !allowed
        .iter()
        .any(|ct| ct.eq_ignore_ascii_case(&content_type))
    {
        return Err(AppError::UnsupportedMediaType(format!(
            "Content type '{}' not allowed; allowed types: {}",
            content_type,
            allowed.join(", ")
        ))
        .into());
    }

    Ok(content_type)
}

fn multipart_read_error(e: axum::extract::multipart::MultipartError) -> HttpAppError {
    HttpAppError(AppError::BadRequest(format!(
        "Failed to read multipart form: {}",
        e
    )))
}

fn missing_field_error(field_name: &str) -> HttpAppError {
    HttpAppError(AppError::BadRequest(format!(
        "Missing multipart field '{}'",
        field_name
    )))
}

/// A video upload buffered into a per-request scratch directory.
///
/// Dropping `scratch` removes the buffered input and any remux output derived
/// from it. This is the single cleanup mechanism for every exit path after
/// this point.
pub(crate) struct BufferedUpload {
    pub scratch: TempDir,
    pub input_path: PathBuf,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Drive the multipart form to the file field named `field_name`, validate its
/// declared content type, and stream it into a scratch file. Validation runs
/// before the scratch directory is created, so rejected uploads write nothing.
pub(crate) async fn receive_video_upload(
    state: &AppState,
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<BufferedUpload, HttpAppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_read_error)? {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type =
            validated_content_type(&field, &state.config.video_allowed_content_types)?;

        let scratch = state.new_scratch_dir()?;
        let input_path = scratch.path().join("upload.mp4");
        let size_bytes =
            stream_field_to_file(field, &input_path, state.config.max_video_size_bytes).await?;

        return Ok(BufferedUpload {
            scratch,
            input_path,
            content_type,
            size_bytes,
        });
    }

    Err(missing_field_error(field_name))
}

/// Drive the multipart form to the file field named `field_name`, validate its
/// declared content type, and buffer it in memory (no subprocess step follows,
/// so no scratch file is needed).
pub(crate) async fn receive_thumbnail_upload(
    state: &AppState,
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<(String, Vec<u8>), HttpAppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_read_error)? {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type =
            validated_content_type(&field, &state.config.thumbnail_allowed_content_types)?;
        let data = read_field_capped(field, state.config.max_thumbnail_size_bytes).await?;

        return Ok((content_type, data));
    }

    Err(missing_field_error(field_name))
}

/// Stream a multipart field to a local file, enforcing the byte cap while
/// copying.
pub(crate) async fn stream_field_to_file(
    mut field: Field<'_>,
    path: &Path,
    max_bytes: usize,
) -> Result<u64, HttpAppError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload file: {}", e)))?;

    let mut written: u64 = 0;
    while let Some(chunk) = field.chunk().await.map_err(multipart_read_error)? {
        written += chunk.len() as u64;
        if written > max_bytes as u64 {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload exceeds maximum size of {} bytes",
                max_bytes
            ))
            .into());
        }
        file.write_all(&chunk)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write upload file: {}", e)))?;
    }

    file.flush()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to flush upload file: {}", e)))?;

    Ok(written)
}

/// Buffer a multipart field in memory, enforcing the byte cap.
pub(crate) async fn read_field_capped(
    mut field: Field<'_>,
    max_bytes: usize,
) -> Result<Vec<u8>, HttpAppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_read_error)? {
        if data.len() + chunk.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload exceeds maximum size of {} bytes",
                max_bytes
            ))
            .into());
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

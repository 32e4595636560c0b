//! Shared key generation for storage backends.
//!
//! Media keys: `{orientation}/{base64url(random)}.{ext}`. The orientation
//! bucket groups objects for operational convenience, the 256-bit random leaf
//! makes keys globally unique without a collision check, and keys are never
//! renamed once assigned. Thumbnail keys are predictable per record:
//! `thumbnails/{video_id}.{ext}`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use uuid::Uuid;
use vidgate_core::models::Orientation;

/// Number of random bytes in a media key leaf (256 bits).
pub const KEY_RANDOM_BYTES: usize = 32;

/// Derive the object key for an uploaded video.
pub fn object_key(orientation: Orientation, random: &[u8; KEY_RANDOM_BYTES], extension: &str) -> String {
    format!(
        "{}/{}.{}",
        orientation.prefix(),
        URL_SAFE_NO_PAD.encode(random),
        extension
    )
}

/// Derive the object key for a record's thumbnail.
pub fn thumbnail_key(video_id: Uuid, extension: &str) -> String {
    format!("thumbnails/{}.{}", video_id, extension)
}

/// File extension for a declared media type, taken from its subtype
/// (`video/mp4` -> `mp4`). Parameters after `;` are ignored.
pub fn extension_for(content_type: &str) -> Option<&str> {
    let essence = content_type.split(';').next()?.trim();
    let subtype = essence.split('/').nth(1)?;
    if subtype.is_empty() {
        None
    } else {
        Some(subtype)
    }
}

//! ffprobe output parsing.
//!
//! Parsing is separate from subprocess execution so it can be tested without
//! the binary.

use serde::Deserialize;

use crate::error::MediaError;

/// One stream descriptor from probe output. Width and height are only present
/// for video streams.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamInfo {
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Parsed stream listing for a media file. Ephemeral: produced and consumed
/// within a single upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeResult {
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
}

/// Parse raw probe stdout into a [`ProbeResult`].
pub fn parse_probe_output(stdout: &[u8]) -> Result<ProbeResult, MediaError> {
    serde_json::from_slice(stdout).map_err(|e| MediaError::ProbeParse(e.to_string()))
}

impl ProbeResult {
    /// Geometry of the first video stream.
    ///
    /// `Ok(None)` when no video stream exists; callers must treat this as
    /// "unknown orientation", not as an error. `InvalidDimensions` when a
    /// video stream is present but its width or height is zero or missing.
    pub fn first_video_dimensions(&self) -> Result<Option<(u32, u32)>, MediaError> {
        for stream in &self.streams {
            if stream.codec_type.as_deref() == Some("video") {
                return match (stream.width, stream.height) {
                    (Some(w), Some(h)) if w > 0 && h > 0 => Ok(Some((w, h))),
                    _ => Err(MediaError::InvalidDimensions),
                };
            }
        }
        Ok(None)
    }
}

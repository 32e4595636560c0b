//! Injected media engines for tests: no real binaries involved.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use vidgate_processing::{MediaEngine, MediaError, ProbeResult, StreamInfo};

/// Scripted engine behaviors.
pub enum FakeEngine {
    /// Probe reports one video stream with this geometry; remux copies the
    /// input to a faststart sibling.
    WithVideo { width: u32, height: u32 },
    /// Probe reports only an audio stream (unknown orientation).
    NoVideoStream,
    /// Probe reports a video stream with zero dimensions.
    ZeroDimensions,
    /// Probe fails as if the subprocess exited non-zero.
    ProbeFails,
    /// Probe succeeds (1080p) but remux fails.
    RemuxFails,
}

#[async_trait]
impl MediaEngine for FakeEngine {
    async fn probe(&self, path: &Path) -> Result<ProbeResult, MediaError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(MediaError::ProbeExecution(format!(
                "input file missing: {}",
                path.display()
            )));
        }

        match self {
            FakeEngine::WithVideo { width, height } => Ok(ProbeResult {
                streams: vec![
                    StreamInfo {
                        codec_type: Some("video".to_string()),
                        width: Some(*width),
                        height: Some(*height),
                    },
                    StreamInfo {
                        codec_type: Some("audio".to_string()),
                        width: None,
                        height: None,
                    },
                ],
            }),
            FakeEngine::NoVideoStream => Ok(ProbeResult {
                streams: vec![StreamInfo {
                    codec_type: Some("audio".to_string()),
                    width: None,
                    height: None,
                }],
            }),
            FakeEngine::ZeroDimensions => Ok(ProbeResult {
                streams: vec![StreamInfo {
                    codec_type: Some("video".to_string()),
                    width: Some(0),
                    height: Some(1080),
                }],
            }),
            FakeEngine::ProbeFails => Err(MediaError::ProbeExecution(
                "ffprobe exited with exit status: 1".to_string(),
            )),
            FakeEngine::RemuxFails => Ok(ProbeResult {
                streams: vec![StreamInfo {
                    codec_type: Some("video".to_string()),
                    width: Some(1920),
                    height: Some(1080),
                }],
            }),
        }
    }

    async fn remux_faststart(&self, input: &Path) -> Result<PathBuf, MediaError> {
        if matches!(self, FakeEngine::RemuxFails) {
            return Err(MediaError::Remux(
                "ffmpeg exited with exit status: 1".to_string(),
            ));
        }

        let mut os = input.as_os_str().to_os_string();
        os.push(".faststart");
        let output = PathBuf::from(os);
        tokio::fs::copy(input, &output).await?;
        Ok(output)
    }
}

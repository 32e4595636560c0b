//! Subprocess-backed media engine.
//!
//! Probing and remuxing are modeled as a capability trait so the upload
//! pipeline and its tests never depend on real binaries directly.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::MediaError;
use crate::probe::{parse_probe_output, ProbeResult};

/// Suffix appended to the input path for the remuxed sibling file.
const FASTSTART_SUFFIX: &str = ".faststart";

/// Media inspection and container rewriting capability.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Inspect a local file and return its stream listing.
    async fn probe(&self, path: &Path) -> Result<ProbeResult, MediaError>;

    /// Rewrite a local MP4 so the moov atom sits at the front of the file,
    /// copying all stream data verbatim. Returns the path of the new sibling
    /// file; the caller owns its cleanup along with the input.
    async fn remux_faststart(&self, input: &Path) -> Result<PathBuf, MediaError>;
}

/// Validate that a binary path doesn't contain shell metacharacters or
/// traversal sequences.
fn validate_binary_path(path: &str) -> Result<()> {
    if !path.chars().all(|c| {
        c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
    }) {
        return Err(anyhow!("Binary path contains unsafe characters: {}", path));
    }
    if path.contains("..") {
        return Err(anyhow!("Binary path contains directory traversal: {}", path));
    }
    Ok(())
}

/// ffprobe/ffmpeg implementation of [`MediaEngine`].
pub struct FfmpegEngine {
    ffprobe_path: String,
    ffmpeg_path: String,
    permits: Option<Arc<Semaphore>>,
}

impl FfmpegEngine {
    pub fn new(ffprobe_path: String, ffmpeg_path: String) -> Result<Self> {
        validate_binary_path(&ffprobe_path).context("Invalid ffprobe path")?;
        validate_binary_path(&ffmpeg_path).context("Invalid ffmpeg path")?;

        Ok(Self {
            ffprobe_path,
            ffmpeg_path,
            permits: None,
        })
    }

    /// Bound concurrent subprocess invocations. `0` leaves them unbounded.
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.permits = (max > 0).then(|| Arc::new(Semaphore::new(max)));
        self
    }

    async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        match &self.permits {
            // The semaphore is never closed, so acquire only fails on closure.
            Some(s) => s.clone().acquire_owned().await.ok(),
            None => None,
        }
    }
}

/// Arguments for the inspection process: error-level logging only, JSON
/// output, full stream listing.
fn probe_args(path: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-v"),
        OsString::from("error"),
        OsString::from("-print_format"),
        OsString::from("json"),
        OsString::from("-show_streams"),
        path.as_os_str().to_os_string(),
    ]
}

/// Arguments for the remux process: copy every stream, relocate the moov atom,
/// explicit MP4 container.
fn remux_args(input: &Path, output: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-i"),
        input.as_os_str().to_os_string(),
        OsString::from("-c"),
        OsString::from("copy"),
        OsString::from("-movflags"),
        OsString::from("faststart"),
        OsString::from("-f"),
        OsString::from("mp4"),
        output.as_os_str().to_os_string(),
    ]
}

fn faststart_output_path(input: &Path) -> PathBuf {
    let mut os = input.as_os_str().to_os_string();
    os.push(FASTSTART_SUFFIX);
    PathBuf::from(os)
}

#[async_trait]
impl MediaEngine for FfmpegEngine {
    async fn probe(&self, path: &Path) -> Result<ProbeResult, MediaError> {
        let _permit = self.acquire().await;
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(probe_args(path))
            .output()
            .await
            .map_err(|e| {
                MediaError::ProbeExecution(format!("failed to run {}: {}", self.ffprobe_path, e))
            })?;

        if !output.status.success() {
            return Err(MediaError::ProbeExecution(format!(
                "{} exited with {}: {}",
                self.ffprobe_path,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let result = parse_probe_output(&output.stdout)?;

        tracing::debug!(
            path = %path.display(),
            streams = result.streams.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Probe completed"
        );

        Ok(result)
    }

    async fn remux_faststart(&self, input: &Path) -> Result<PathBuf, MediaError> {
        let _permit = self.acquire().await;
        let start = std::time::Instant::now();
        let output_path = faststart_output_path(input);

        let output = Command::new(&self.ffmpeg_path)
            .args(remux_args(input, &output_path))
            .output()
            .await
            .map_err(|e| {
                MediaError::Remux(format!("failed to run {}: {}", self.ffmpeg_path, e))
            })?;

        if !output.status.success() {
            // ffmpeg can leave a partial output behind on failure.
            let _ = tokio::fs::remove_file(&output_path).await;
            return Err(MediaError::Remux(format!(
                "{} exited with {}: {}",
                self.ffmpeg_path,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        tracing::debug!(
            input = %input.display(),
            output = %output_path.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Remux completed"
        );

        Ok(output_path)
    }
}

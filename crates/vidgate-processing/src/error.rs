//! Media processing errors.

use thiserror::Error;

/// Failures from the probe and remux steps of the pipeline.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The inspection process could not be run or exited non-zero.
    #[error("Probe execution failed: {0}")]
    ProbeExecution(String),

    /// The inspection process produced output that is not valid probe JSON.
    #[error("Probe output could not be parsed: {0}")]
    ProbeParse(String),

    /// A video stream exists but its width or height is zero or missing; the
    /// file is unusable for orientation placement.
    #[error("Video stream has missing or zero dimensions")]
    InvalidDimensions,

    /// The remux process exited non-zero.
    #[error("Remux failed: {0}")]
    Remux(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

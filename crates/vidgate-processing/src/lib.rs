//! Media inspection and container rewriting.
//!
//! The [`MediaEngine`] trait is the capability boundary the upload pipeline
//! works against: `probe` extracts stream geometry, `remux_faststart` rewrites
//! an MP4 container for progressive playback. [`FfmpegEngine`] implements it
//! with ffprobe/ffmpeg subprocesses; tests substitute fakes.

pub mod aspect;
pub mod engine;
pub mod error;
pub mod probe;

pub use aspect::classify;
pub use engine::{FfmpegEngine, MediaEngine};
pub use error::MediaError;
pub use probe::{parse_probe_output, ProbeResult, StreamInfo};

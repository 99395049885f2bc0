//! Video tooling error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from probing or decoding a video file
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("{0} not found on PATH; install FFmpeg")]
    ToolMissing(&'static str),

    #[error("probe failed for {path}: {message}")]
    ProbeFailed { path: PathBuf, message: String },

    #[error("no video stream in {0}")]
    NoVideoStream(PathBuf),

    #[error("frame extraction produced no output at {timestamp:.3}s")]
    EmptyFrame { timestamp: f64 },

    #[error("frame extraction failed at {timestamp:.3}s: {message}")]
    ExtractionFailed { timestamp: f64, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VideoError>;

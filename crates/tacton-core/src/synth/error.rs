//! Synthesis error types

use thiserror::Error;

/// Errors from a synthesis attempt
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("synthesis API key is not configured (set GEMINI_API_KEY or config.yaml)")]
    MissingApiKey,

    /// Transport or service failure; one catch-all, the user just retries
    #[error("synthesis request failed: {0}")]
    Request(String),

    #[error("synthesis response contained no text candidate")]
    EmptyResponse,

    /// The service answered, but not with parseable pattern JSON.
    /// Kept distinct from [`SynthesisError::Request`] so the UI can say so.
    #[error("invalid output format")]
    InvalidOutputFormat(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SynthesisError>;

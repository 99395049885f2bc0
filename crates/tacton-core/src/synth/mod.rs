//! Pattern synthesis against a generative vision service
//!
//! One request per synthesis attempt: sampled frames plus a free-text
//! directive go out with a declared response schema, and a validated
//! [`crate::pattern::HapticPattern`] comes back. No retries, no streaming.

mod client;
mod error;
mod schema;

pub use client::SynthesisClient;
pub use error::{Result, SynthesisError};
pub use schema::response_schema;

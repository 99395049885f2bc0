//! Core types and services for the Tacton haptic studio
//!
//! This crate contains everything that is not UI:
//!
//! - [`pattern`]: the AHAP pattern document model. The in-memory document is
//!   also the wire format, so synthesis responses deserialize straight into
//!   it and export is a plain pretty-print.
//! - [`video`]: ffprobe-based metadata probing and the sequential frame
//!   sampler that feeds the synthesis request.
//! - [`synth`]: the one-shot generative synthesis client with its declared
//!   response schema.

pub mod pattern;
pub mod synth;
pub mod video;

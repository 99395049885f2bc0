//! Tacton Studio - turn a video into an editable haptic pattern
//!
//! The studio loads a video, samples frames from it, asks a generative
//! vision service for a matching AHAP pattern, then lets the user fine-tune
//! event intensities on an interactive waveform before exporting a `.ahap`
//! file for playback on an iPhone.

pub mod config;
pub mod export;
pub mod ui;

//! Waveform widget for Tacton
//!
//! This crate provides the iced canvas widget that projects a haptic
//! pattern onto a time/value plane and turns pointer gestures back into
//! document edits.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **State structs**: pure data ([`waveform::WaveformState`])
//! - **View functions**: take state references, return `Element<WaveformEvent>`
//! - **Canvas Program**: handles rendering and event-to-message translation;
//!   gesture state (idle vs dragging a handle) lives in the canvas-local state

pub mod theme;
pub mod waveform;

pub use waveform::{haptic_waveform, WaveformEvent, WaveformState};

//! Application messages
//!
//! All message types that can be dispatched in the tacton-studio application.

use std::path::PathBuf;

use tacton_core::pattern::HapticPattern;
use tacton_widgets::WaveformEvent;

use super::session::LoadedVideo;

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Video
    PickVideo,
    VideoSelected(Option<PathBuf>),
    VideoLoaded(Result<LoadedVideo, String>),
    ResetSession,

    // Synthesis
    SetDirective(String),
    Synthesize,
    SynthesisComplete(Result<HapticPattern, String>),

    // Waveform editor
    Waveform(WaveformEvent),

    // Transport
    Play,
    Pause,
    Stop,
    Tick,
    /// Scrub preview frame finished decoding
    PreviewFrameLoaded {
        position: f64,
        result: Result<Vec<u8>, String>,
    },

    // Export
    ExportPattern,
    ExportDestinationSelected(Option<PathBuf>),
    ExportComplete(Result<PathBuf, String>),
}

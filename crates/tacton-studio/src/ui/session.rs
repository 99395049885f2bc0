//! Session state: the loaded video, the current document, and playback
//!
//! One session at a time. The pattern document is owned here and only
//! mutated through the app's message handlers; the waveform editor reports
//! proposed edits upward instead of touching it.

use std::path::PathBuf;
use std::time::Instant;

use iced::widget::image;

use tacton_core::pattern::HapticPattern;
use tacton_core::video::{self, extract_preview_frame, VideoMetadata};

/// A probed video ready for synthesis
#[derive(Debug, Clone)]
pub struct LoadedVideo {
    pub path: PathBuf,
    pub metadata: VideoMetadata,
    /// JPEG poster frame for the preview pane, when extraction succeeded
    pub poster: Option<Vec<u8>>,
}

impl LoadedVideo {
    /// Base name for status lines
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Probe a video file and grab its first frame as a poster.
///
/// A missing poster is not an error: the session still loads, the preview
/// pane just stays empty.
pub fn load_video(path: PathBuf, max_width: u32) -> video::Result<LoadedVideo> {
    let metadata = VideoMetadata::probe(&path)?;
    let poster = match extract_preview_frame(&path, 0.0, max_width) {
        Ok(jpeg) => Some(jpeg),
        Err(e) => {
            log::warn!("poster frame unavailable for {:?}: {}", path, e);
            None
        }
    };
    Ok(LoadedVideo {
        path,
        metadata,
        poster,
    })
}

/// Wall-clock playback transport.
///
/// There is no decode loop to follow, so while playing the playhead is the
/// frozen position plus the time elapsed since `play`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackState {
    position: f64,
    /// Set while playing; elapsed time since it counts into `position()`
    anchor: Option<Instant>,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.anchor.is_some()
    }

    /// Current playhead in seconds
    pub fn position(&self) -> f64 {
        self.position
            + self
                .anchor
                .map(|anchor| anchor.elapsed().as_secs_f64())
                .unwrap_or(0.0)
    }

    pub fn play(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        self.position = self.position();
        self.anchor = None;
    }

    pub fn stop(&mut self) {
        self.position = 0.0;
        self.anchor = None;
    }

    /// Jump to a position, preserving the playing/paused state
    pub fn seek(&mut self, time: f64) {
        let playing = self.is_playing();
        self.position = time.max(0.0);
        self.anchor = playing.then(Instant::now);
    }

    /// Pin the playhead to the end once it runs past `duration`.
    ///
    /// Returns true when playback just ended.
    pub fn clamp_to_end(&mut self, duration: f64) -> bool {
        if duration > 0.0 && self.position() >= duration {
            self.position = duration;
            self.anchor = None;
            true
        } else {
            false
        }
    }
}

/// All mutable state for the current session
#[derive(Debug, Default)]
pub struct SessionState {
    pub video: Option<LoadedVideo>,
    /// The haptic pattern being displayed/edited, once synthesis succeeded
    pub document: Option<HapticPattern>,
    pub playback: PlaybackState,
    /// Frame shown in the preview pane (poster, or the last scrub frame)
    pub preview: Option<image::Handle>,
}

impl SessionState {
    /// Video duration in seconds, zero before a video is loaded
    pub fn duration(&self) -> f64 {
        self.video.as_ref().map(|v| v.metadata.duration).unwrap_or(0.0)
    }

    /// Discard everything: video, document, playback, preview
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//! Haptic pattern waveform renderer/editor
//!
//! Maps a pattern's events to x/y coordinates (time on x, normalized value
//! on y), draws a filled envelope plus per-event drag handles, and
//! translates drag/click gestures back into edits:
//!
//! - dragging a handle rewrites that event's intensity, published live on
//!   every cursor move
//! - clicking the background (while no drag is active) publishes a scrub
//!   request so the host can seek playback

mod geometry;
mod state;
mod view;

pub use geometry::{nearest_handle, Mapping};
pub use state::WaveformState;
pub use view::{haptic_waveform, WaveformEvent};

/// Widget height in pixels
pub const WAVEFORM_HEIGHT: f32 = 200.0;

/// Padding between the canvas edge and the graph area
pub const PADDING: f32 = 10.0;

/// Drawn radius of an event handle
pub const HANDLE_RADIUS: f32 = 4.5;

/// Hit-test radius around a handle center
pub const HANDLE_HIT_RADIUS: f32 = 9.0;

/// Width of the pulse drawn for a transient event
pub const TRANSIENT_PULSE_WIDTH: f32 = 5.0;

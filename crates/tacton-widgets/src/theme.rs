//! Shared theme constants for the Tacton widgets

use iced::Color;

/// Canvas background
pub const WAVEFORM_BG: Color = Color::from_rgb(0.08, 0.08, 0.1);

/// Envelope fill (lime, semi-transparent)
pub const ENVELOPE_FILL: Color = Color::from_rgba(0.83, 1.0, 0.0, 0.22);

/// Envelope outline
pub const ENVELOPE_LINE: Color = Color::from_rgb(0.83, 1.0, 0.0);

/// Per-event stem line
pub const STEM_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.35);

/// Drag handle fill
pub const HANDLE_COLOR: Color = Color::from_rgb(0.9, 0.9, 0.9);

/// Drag handle under the cursor or being dragged
pub const HANDLE_ACTIVE_COLOR: Color = Color::from_rgb(1.0, 0.75, 0.2);

/// Playhead line
pub const PLAYHEAD_COLOR: Color = Color::from_rgb(1.0, 1.0, 1.0);

/// Baseline / axis line
pub const BASELINE_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.15);

/// Tooltip text
pub const TOOLTIP_COLOR: Color = Color::from_rgb(0.95, 0.95, 0.95);

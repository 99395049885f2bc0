//! Coordinate mapping between pattern space and canvas pixels
//!
//! Pattern space is seconds on the time axis and [0, 1] on the value axis;
//! pixel space is the canvas bounds minus a fixed padding. All inverse
//! mappings clamp to valid ranges, and a zero (or garbage) duration maps
//! everything to the origin instead of dividing by it: the video's metadata
//! may simply not be loaded yet.

use super::{HANDLE_HIT_RADIUS, PADDING};
use tacton_core::pattern::{round_to, HapticPattern, EDIT_PRECISION};

/// Time/value to pixel mapping for one canvas layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping {
    graph_width: f32,
    graph_height: f32,
    duration: f64,
}

impl Mapping {
    /// Build a mapping for canvas bounds of `width` x `height`
    pub fn new(width: f32, height: f32, duration: f64) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        Self {
            graph_width: (width - 2.0 * PADDING).max(0.0),
            graph_height: (height - 2.0 * PADDING).max(0.0),
            duration,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Seconds to x pixel; zero duration pins everything to the left edge
    pub fn time_to_x(&self, time: f64) -> f32 {
        if self.duration <= 0.0 {
            return PADDING;
        }
        let ratio = (time / self.duration).clamp(0.0, 1.0) as f32;
        PADDING + ratio * self.graph_width
    }

    /// X pixel to seconds, clamped to [0, duration]
    pub fn x_to_time(&self, x: f32) -> f64 {
        if self.duration <= 0.0 || self.graph_width <= 0.0 {
            return 0.0;
        }
        let ratio = ((x - PADDING) / self.graph_width).clamp(0.0, 1.0);
        ratio as f64 * self.duration
    }

    /// Normalized value to y pixel (1.0 at the top of the graph area)
    pub fn value_to_y(&self, value: f64) -> f32 {
        let value = value.clamp(0.0, 1.0) as f32;
        PADDING + self.graph_height * (1.0 - value)
    }

    /// Y pixel to normalized value, clamped to [0, 1]
    pub fn y_to_value(&self, y: f32) -> f64 {
        if self.graph_height <= 0.0 {
            return 0.0;
        }
        (1.0 - (y - PADDING) / self.graph_height).clamp(0.0, 1.0) as f64
    }

    /// Y pixel of the zero-value baseline
    pub fn baseline_y(&self) -> f32 {
        self.value_to_y(0.0)
    }

    /// Intensity a drag at `y` writes: clamped and rounded for the document
    pub fn drag_value(&self, y: f32) -> f64 {
        round_to(self.y_to_value(y), EDIT_PRECISION)
    }

    /// Handle center per event, in document index order
    pub fn handle_positions(&self, pattern: &HapticPattern) -> Vec<(f32, f32)> {
        pattern
            .events()
            .map(|event| (self.time_to_x(event.time), self.value_to_y(event.intensity())))
            .collect()
    }
}

/// Index of the handle closest to the cursor within the hit radius
pub fn nearest_handle(positions: &[(f32, f32)], x: f32, y: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &(hx, hy)) in positions.iter().enumerate() {
        let dist2 = (hx - x).powi(2) + (hy - y).powi(2);
        if dist2 <= HANDLE_HIT_RADIUS * HANDLE_HIT_RADIUS
            && best.map(|(_, d)| dist2 < d).unwrap_or(true)
        {
            best = Some((index, dist2));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacton_core::pattern::{HapticEvent, HapticPattern, PatternEntry};

    const WIDTH: f32 = 1000.0;
    const HEIGHT: f32 = 200.0;

    #[test]
    fn test_time_roundtrip() {
        let mapping = Mapping::new(WIDTH, HEIGHT, 12.5);
        for t in [0.0, 0.1, 3.7, 6.25, 12.5] {
            let back = mapping.x_to_time(mapping.time_to_x(t));
            assert!((back - t).abs() < 1e-3, "t={} back={}", t, back);
        }
    }

    #[test]
    fn test_value_roundtrip() {
        let mapping = Mapping::new(WIDTH, HEIGHT, 10.0);
        for v in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let back = mapping.y_to_value(mapping.value_to_y(v));
            assert!((back - v).abs() < 1e-4, "v={} back={}", v, back);
        }
    }

    #[test]
    fn test_inverse_mappings_clamp() {
        let mapping = Mapping::new(WIDTH, HEIGHT, 10.0);
        assert_eq!(mapping.x_to_time(-50.0), 0.0);
        assert_eq!(mapping.x_to_time(WIDTH + 50.0), 10.0);
        assert_eq!(mapping.y_to_value(-50.0), 1.0);
        assert_eq!(mapping.y_to_value(HEIGHT + 50.0), 0.0);
    }

    #[test]
    fn test_zero_duration_is_guarded() {
        for duration in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let mapping = Mapping::new(WIDTH, HEIGHT, duration);
            assert_eq!(mapping.time_to_x(5.0), PADDING);
            assert_eq!(mapping.x_to_time(300.0), 0.0);
        }
    }

    #[test]
    fn test_drag_value_midpoint() {
        // Cursor at half the graph height reads 0.5
        let mapping = Mapping::new(WIDTH, HEIGHT, 10.0);
        let graph_height = HEIGHT - 2.0 * PADDING;
        assert_eq!(mapping.drag_value(PADDING + graph_height / 2.0), 0.5);
    }

    #[test]
    fn test_drag_value_rounds_to_three_places() {
        let mapping = Mapping::new(WIDTH, HEIGHT, 10.0);
        let value = mapping.drag_value(57.3);
        assert_eq!(value, round_to(value, 3));
        assert!((0.0..=1.0).contains(&value));
        // Above / below the graph clamp to the extremes
        assert_eq!(mapping.drag_value(0.0), 1.0);
        assert_eq!(mapping.drag_value(HEIGHT), 0.0);
    }

    #[test]
    fn test_handle_positions_follow_events() {
        let pattern = HapticPattern {
            version: 1.0,
            pattern: vec![
                PatternEntry { event: HapticEvent::transient(0.0, 1.0, 0.5) },
                PatternEntry { event: HapticEvent::transient(10.0, 0.0, 0.5) },
            ],
        };
        let mapping = Mapping::new(WIDTH, HEIGHT, 10.0);
        let positions = mapping.handle_positions(&pattern);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0], (PADDING, PADDING));
        assert_eq!(positions[1], (WIDTH - PADDING, HEIGHT - PADDING));
    }

    #[test]
    fn test_nearest_handle() {
        let positions = vec![(100.0, 50.0), (110.0, 50.0), (400.0, 50.0)];
        // Closest of two overlapping hit areas wins
        assert_eq!(nearest_handle(&positions, 106.0, 50.0), Some(1));
        assert_eq!(nearest_handle(&positions, 102.0, 50.0), Some(0));
        // Outside every hit radius
        assert_eq!(nearest_handle(&positions, 250.0, 50.0), None);
        assert_eq!(nearest_handle(&[], 0.0, 0.0), None);
    }
}

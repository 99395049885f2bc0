//! Waveform view state
//!
//! Pure data held at the application level; the pattern document itself
//! stays owned by the session controller and is passed to the view function
//! by reference each frame.

/// Timeline state for the waveform view
#[derive(Debug, Clone, Copy)]
pub struct WaveformState {
    /// Timeline length in seconds (zero until video metadata is known)
    duration: f64,
    /// Playhead position in seconds
    position: f64,
}

impl WaveformState {
    pub fn new() -> Self {
        Self {
            duration: 0.0,
            position: 0.0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Set the timeline length; the playhead is re-clamped to fit
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        self.position = self.position.clamp(0.0, self.duration);
    }

    /// Move the playhead, clamped to [0, duration]
    pub fn set_position(&mut self, position: f64) {
        self.position = if position.is_finite() {
            position.clamp(0.0, self.duration)
        } else {
            0.0
        };
    }
}

impl Default for WaveformState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_clamps_to_duration() {
        let mut state = WaveformState::new();
        state.set_duration(8.0);
        state.set_position(12.0);
        assert_eq!(state.position(), 8.0);
        state.set_position(-1.0);
        assert_eq!(state.position(), 0.0);
    }

    #[test]
    fn test_shrinking_duration_reclamps_position() {
        let mut state = WaveformState::new();
        state.set_duration(10.0);
        state.set_position(9.0);
        state.set_duration(5.0);
        assert_eq!(state.position(), 5.0);
    }

    #[test]
    fn test_non_finite_inputs() {
        let mut state = WaveformState::new();
        state.set_duration(f64::NAN);
        assert_eq!(state.duration(), 0.0);
        state.set_duration(4.0);
        state.set_position(f64::INFINITY);
        assert_eq!(state.position(), 0.0);
    }
}

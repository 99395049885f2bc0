//! AHAP pattern document model
//!
//! A pattern is an ordered list of timed haptic events, each transient or
//! continuous, each carrying normalized intensity/sharpness parameters.
//! Field names serialize exactly as Core Haptics expects (`Version`,
//! `Pattern`, `Event`, `EventType`, ...), so the same types cover the
//! synthesis response, in-memory editing, and `.ahap` export.

use serde::{Deserialize, Serialize};

/// Schema version written to every pattern
pub const PATTERN_VERSION: f64 = 1.0;

/// Ceiling on events kept from a synthesis response
pub const MAX_PATTERN_EVENTS: usize = 512;

/// Decimal places kept when a drag edit writes a parameter value
pub const EDIT_PRECISION: u32 = 3;

/// Event type tags recognized by Core Haptics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "HapticTransient")]
    Transient,
    #[serde(rename = "HapticContinuous")]
    Continuous,
}

/// Parameter identifiers recognized by Core Haptics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterId {
    #[serde(rename = "HapticIntensity")]
    Intensity,
    #[serde(rename = "HapticSharpness")]
    Sharpness,
}

/// One named parameter on an event, value constrained to [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventParameter {
    #[serde(rename = "ParameterID")]
    pub id: ParameterId,
    #[serde(rename = "ParameterValue")]
    pub value: f64,
}

/// A single timed haptic event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HapticEvent {
    #[serde(rename = "EventType")]
    pub kind: EventKind,
    /// Start time in seconds, >= 0
    #[serde(rename = "Time")]
    pub time: f64,
    /// Seconds; carried by continuous events only, absent means zero
    #[serde(rename = "EventDuration", skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(rename = "EventParameters")]
    pub parameters: Vec<EventParameter>,
}

impl HapticEvent {
    /// Create a transient pulse at `time`
    pub fn transient(time: f64, intensity: f64, sharpness: f64) -> Self {
        Self {
            kind: EventKind::Transient,
            time,
            duration: None,
            parameters: vec![
                EventParameter { id: ParameterId::Intensity, value: intensity.clamp(0.0, 1.0) },
                EventParameter { id: ParameterId::Sharpness, value: sharpness.clamp(0.0, 1.0) },
            ],
        }
    }

    /// Create a continuous effect spanning `[time, time + duration]`
    pub fn continuous(time: f64, duration: f64, intensity: f64, sharpness: f64) -> Self {
        Self {
            kind: EventKind::Continuous,
            time,
            duration: Some(duration.max(0.0)),
            parameters: vec![
                EventParameter { id: ParameterId::Intensity, value: intensity.clamp(0.0, 1.0) },
                EventParameter { id: ParameterId::Sharpness, value: sharpness.clamp(0.0, 1.0) },
            ],
        }
    }

    /// Look up a parameter value by id
    pub fn parameter(&self, id: ParameterId) -> Option<f64> {
        self.parameters.iter().find(|p| p.id == id).map(|p| p.value)
    }

    /// Intensity parameter, zero when absent
    pub fn intensity(&self) -> f64 {
        self.parameter(ParameterId::Intensity).unwrap_or(0.0)
    }

    /// Sharpness parameter, zero when absent
    pub fn sharpness(&self) -> f64 {
        self.parameter(ParameterId::Sharpness).unwrap_or(0.0)
    }

    /// Set a parameter, clamped to [0, 1]; inserts the entry if missing
    pub fn set_parameter(&mut self, id: ParameterId, value: f64) {
        let value = value.clamp(0.0, 1.0);
        match self.parameters.iter_mut().find(|p| p.id == id) {
            Some(p) => p.value = value,
            None => self.parameters.push(EventParameter { id, value }),
        }
    }

    /// Duration in seconds; transient events and absent durations read as zero
    pub fn effective_duration(&self) -> f64 {
        match self.kind {
            EventKind::Transient => 0.0,
            EventKind::Continuous => self.duration.unwrap_or(0.0).max(0.0),
        }
    }
}

/// Wrapper matching the AHAP `{"Event": {...}}` entry shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntry {
    #[serde(rename = "Event")]
    pub event: HapticEvent,
}

/// A full haptic pattern document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HapticPattern {
    #[serde(rename = "Version")]
    pub version: f64,
    #[serde(rename = "Pattern")]
    pub pattern: Vec<PatternEntry>,
}

impl HapticPattern {
    /// Create an empty pattern at the current schema version
    pub fn new() -> Self {
        Self {
            version: PATTERN_VERSION,
            pattern: Vec::new(),
        }
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Event at a document index
    pub fn event(&self, index: usize) -> Option<&HapticEvent> {
        self.pattern.get(index).map(|entry| &entry.event)
    }

    /// Iterate events in document (creation) order
    pub fn events(&self) -> impl Iterator<Item = &HapticEvent> {
        self.pattern.iter().map(|entry| &entry.event)
    }

    /// Document indices sorted by start time for display.
    ///
    /// The document itself keeps creation order; only the returned index
    /// list is ordered. The sort is stable so simultaneous events keep
    /// their relative order.
    pub fn display_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.pattern.len()).collect();
        order.sort_by(|&a, &b| {
            self.pattern[a]
                .event
                .time
                .partial_cmp(&self.pattern[b].event.time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }

    /// End of the last event in seconds (start + duration), zero when empty
    pub fn span(&self) -> f64 {
        self.events()
            .map(|e| e.time + e.effective_duration())
            .fold(0.0, f64::max)
    }

    /// Apply a drag edit: set one event's intensity, clamped to [0, 1] and
    /// rounded to [`EDIT_PRECISION`] decimals. No other event is touched.
    ///
    /// Returns false when the index is out of range.
    pub fn set_intensity(&mut self, index: usize, value: f64) -> bool {
        let Some(entry) = self.pattern.get_mut(index) else {
            return false;
        };
        entry
            .event
            .set_parameter(ParameterId::Intensity, round_to(value.clamp(0.0, 1.0), EDIT_PRECISION));
        true
    }

    /// Enforce document invariants after deserializing a synthesis response:
    ///
    /// - parameter values clamped to [0, 1], negative times to zero
    /// - duplicate parameter ids collapsed (first occurrence wins)
    /// - transient events stripped of any duration the service emitted
    /// - events without any parameter dropped
    /// - documents beyond [`MAX_PATTERN_EVENTS`] truncated
    pub fn normalize(&mut self) {
        if self.pattern.len() > MAX_PATTERN_EVENTS {
            log::warn!(
                "pattern has {} events, truncating to {}",
                self.pattern.len(),
                MAX_PATTERN_EVENTS
            );
            self.pattern.truncate(MAX_PATTERN_EVENTS);
        }

        self.pattern.retain(|entry| !entry.event.parameters.is_empty());

        for entry in &mut self.pattern {
            let event = &mut entry.event;
            if event.time < 0.0 {
                event.time = 0.0;
            }
            match event.kind {
                EventKind::Transient => event.duration = None,
                EventKind::Continuous => {
                    if let Some(d) = event.duration {
                        event.duration = Some(d.max(0.0));
                    }
                }
            }

            let mut seen: Vec<ParameterId> = Vec::with_capacity(2);
            event.parameters.retain(|p| {
                if seen.contains(&p.id) {
                    false
                } else {
                    seen.push(p.id);
                    true
                }
            });
            for p in &mut event.parameters {
                p.value = p.value.clamp(0.0, 1.0);
            }
        }
    }
}

impl Default for HapticPattern {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pattern() -> HapticPattern {
        HapticPattern {
            version: PATTERN_VERSION,
            pattern: vec![
                PatternEntry { event: HapticEvent::continuous(2.0, 1.5, 0.4, 0.2) },
                PatternEntry { event: HapticEvent::transient(0.5, 0.9, 0.7) },
            ],
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(sample_pattern()).unwrap();
        assert!(json.get("Version").is_some());
        let entries = json.get("Pattern").unwrap().as_array().unwrap();
        let event = entries[1].get("Event").unwrap();
        assert_eq!(event.get("EventType").unwrap(), "HapticTransient");
        assert_eq!(event.get("Time").unwrap().as_f64().unwrap(), 0.5);
        let params = event.get("EventParameters").unwrap().as_array().unwrap();
        assert_eq!(params[0].get("ParameterID").unwrap(), "HapticIntensity");
        assert_eq!(params[0].get("ParameterValue").unwrap().as_f64().unwrap(), 0.9);
    }

    #[test]
    fn test_transient_omits_duration() {
        let json = serde_json::to_value(HapticEvent::transient(0.0, 1.0, 1.0)).unwrap();
        assert!(json.get("EventDuration").is_none());

        let json = serde_json::to_value(HapticEvent::continuous(0.0, 2.0, 1.0, 1.0)).unwrap();
        assert_eq!(json.get("EventDuration").unwrap().as_f64().unwrap(), 2.0);
    }

    #[test]
    fn test_display_order_is_non_destructive() {
        let pattern = sample_pattern();
        assert_eq!(pattern.display_order(), vec![1, 0]);
        // Document order unchanged
        assert_eq!(pattern.event(0).unwrap().time, 2.0);
        assert_eq!(pattern.event(1).unwrap().time, 0.5);
    }

    #[test]
    fn test_set_intensity_clamps_and_rounds() {
        let mut pattern = sample_pattern();
        assert!(pattern.set_intensity(0, 1.7));
        assert_eq!(pattern.event(0).unwrap().intensity(), 1.0);

        assert!(pattern.set_intensity(0, 0.123456));
        assert_eq!(pattern.event(0).unwrap().intensity(), 0.123);

        // Out-of-range index is rejected
        assert!(!pattern.set_intensity(5, 0.5));
    }

    #[test]
    fn test_set_intensity_touches_only_target() {
        let mut pattern = sample_pattern();
        let before = pattern.event(1).unwrap().clone();
        pattern.set_intensity(0, 0.111);
        assert_eq!(pattern.event(1).unwrap(), &before);
        assert_eq!(pattern.event(0).unwrap().sharpness(), 0.2);
    }

    #[test]
    fn test_normalize_strips_transient_duration() {
        let mut pattern = HapticPattern::new();
        let mut event = HapticEvent::transient(1.0, 0.5, 0.5);
        event.duration = Some(0.25);
        pattern.pattern.push(PatternEntry { event });

        pattern.normalize();
        assert_eq!(pattern.event(0).unwrap().duration, None);
    }

    #[test]
    fn test_normalize_clamps_values_and_times() {
        let mut pattern = HapticPattern::new();
        pattern.pattern.push(PatternEntry {
            event: HapticEvent {
                kind: EventKind::Continuous,
                time: -3.0,
                duration: Some(-1.0),
                parameters: vec![
                    EventParameter { id: ParameterId::Intensity, value: 2.5 },
                    EventParameter { id: ParameterId::Intensity, value: 0.1 },
                ],
            },
        });

        pattern.normalize();
        let event = pattern.event(0).unwrap();
        assert_eq!(event.time, 0.0);
        assert_eq!(event.duration, Some(0.0));
        // Duplicate ids collapse to the first occurrence, clamped
        assert_eq!(event.parameters.len(), 1);
        assert_eq!(event.intensity(), 1.0);
    }

    #[test]
    fn test_normalize_drops_parameterless_events() {
        let mut pattern = HapticPattern::new();
        pattern.pattern.push(PatternEntry {
            event: HapticEvent {
                kind: EventKind::Transient,
                time: 0.0,
                duration: None,
                parameters: Vec::new(),
            },
        });
        pattern.pattern.push(PatternEntry { event: HapticEvent::transient(1.0, 0.5, 0.5) });

        pattern.normalize();
        assert_eq!(pattern.len(), 1);
        assert_eq!(pattern.event(0).unwrap().time, 1.0);
    }

    #[test]
    fn test_normalize_truncates_oversized_patterns() {
        let mut pattern = HapticPattern::new();
        for i in 0..(MAX_PATTERN_EVENTS + 40) {
            pattern
                .pattern
                .push(PatternEntry { event: HapticEvent::transient(i as f64 * 0.01, 0.5, 0.5) });
        }
        pattern.normalize();
        assert_eq!(pattern.len(), MAX_PATTERN_EVENTS);
    }

    #[test]
    fn test_span() {
        assert_eq!(HapticPattern::new().span(), 0.0);
        assert_eq!(sample_pattern().span(), 3.5);
    }

    #[test]
    fn test_deserialize_wire_format() {
        let text = r#"{
            "Version": 1.0,
            "Pattern": [
                {"Event": {"EventType": "HapticContinuous", "Time": 0.2,
                           "EventDuration": 1.0,
                           "EventParameters": [{"ParameterID": "HapticSharpness", "ParameterValue": 0.3}]}}
            ]
        }"#;
        let pattern: HapticPattern = serde_json::from_str(text).unwrap();
        assert_eq!(pattern.version, 1.0);
        assert_eq!(pattern.event(0).unwrap().kind, EventKind::Continuous);
        assert_eq!(pattern.event(0).unwrap().sharpness(), 0.3);
        assert_eq!(pattern.event(0).unwrap().intensity(), 0.0);
    }
}

//! Generative synthesis client

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::{json, Value};

use super::schema::response_schema;
use super::{Result, SynthesisError};
use crate::pattern::HapticPattern;
use crate::video::SampledFrame;

/// Fixed design brief sent ahead of the user's directive
const SYSTEM_PROMPT: &str = "You are a world-class haptic designer for Apple iOS. \
Analyze these video frames and the user's description. \
Create a precise Apple Haptic and Audio Pattern (AHAP) that synchronizes with the action.\n\
- Identify impacts (Transient haptics).\n\
- Identify continuous motion, vibrations, or textures (Continuous haptics).\n\
- Use appropriate Intensity (strength) and Sharpness (crisp vs dull).\n\
- Ensure timing is accurate relative to the video.";

/// Client for a Gemini-style `generateContent` endpoint.
///
/// Blocking; the caller runs it inside a background task and keeps exactly
/// one request outstanding.
#[derive(Debug, Clone)]
pub struct SynthesisClient {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl SynthesisClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Override the request timeout (the service occasionally stalls;
    /// without a deadline the processing state would hang forever)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one synthesis attempt: frames + directive in, validated pattern out.
    pub fn synthesize(&self, frames: &[SampledFrame], directive: &str) -> Result<HapticPattern> {
        if self.api_key.is_empty() {
            return Err(SynthesisError::MissingApiKey);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        let body = build_request(frames, directive);

        log::info!(
            "synthesizing pattern: {} frames, {} byte directive, model {}",
            frames.len(),
            directive.len(),
            self.model
        );

        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .post(&url)
            .set("x-goog-api-key", &self.api_key)
            .send_json(body)
            .map_err(|e| SynthesisError::Request(e.to_string()))?;

        let value: Value = response
            .into_json()
            .map_err(|e| SynthesisError::Request(e.to_string()))?;

        let text = candidate_text(&value).ok_or(SynthesisError::EmptyResponse)?;
        parse_pattern(&text)
    }
}

/// Build the `generateContent` request body: design brief + directive as the
/// leading text part, then one inline JPEG part per sampled frame, plus the
/// declared response schema.
fn build_request(frames: &[SampledFrame], directive: &str) -> Value {
    let mut parts = Vec::with_capacity(frames.len() + 1);
    parts.push(json!({
        "text": format!(
            "{}\n\nDescription: {}\n\nOutput ONLY valid AHAP JSON.",
            SYSTEM_PROMPT, directive
        )
    }));
    for frame in frames {
        parts.push(json!({
            "inlineData": {
                "mimeType": "image/jpeg",
                "data": BASE64.encode(&frame.jpeg)
            }
        }));
    }

    json!({
        "contents": [{ "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

/// First text part of the first candidate, if any
fn candidate_text(response: &Value) -> Option<String> {
    response["candidates"][0]["content"]["parts"]
        .as_array()?
        .iter()
        .find_map(|part| part["text"].as_str())
        .map(str::to_string)
}

/// Parse and normalize the raw response text as a pattern document
fn parse_pattern(text: &str) -> Result<HapticPattern> {
    let mut pattern: HapticPattern = serde_json::from_str(text).map_err(|e| {
        log::error!("unparsable synthesis output: {}", e);
        SynthesisError::InvalidOutputFormat(e)
    })?;
    pattern.normalize();
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(bytes: &[u8], timestamp: f64) -> SampledFrame {
        SampledFrame { jpeg: bytes.to_vec(), timestamp }
    }

    #[test]
    fn test_build_request_parts() {
        let frames = vec![frame(b"aa", 0.0), frame(b"bb", 1.0)];
        let body = build_request(&frames, "metal impacts");

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        let text = parts[0]["text"].as_str().unwrap();
        assert!(text.contains("Description: metal impacts"));
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], BASE64.encode(b"aa"));

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_build_request_with_empty_directive() {
        let body = build_request(&[], "");
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 1);
        assert!(parts[0]["text"].as_str().unwrap().contains("Description: \n"));
    }

    #[test]
    fn test_candidate_text_extraction() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"Version\":1.0,\"Pattern\":[]}" }] }
            }]
        });
        assert_eq!(
            candidate_text(&response).as_deref(),
            Some("{\"Version\":1.0,\"Pattern\":[]}")
        );

        assert_eq!(candidate_text(&json!({"candidates": []})), None);
        assert_eq!(candidate_text(&json!({})), None);
    }

    #[test]
    fn test_parse_pattern_valid() {
        let text = r#"{
            "Version": 1.0,
            "Pattern": [
                {"Event": {"EventType": "HapticTransient", "Time": 0.4,
                           "EventParameters": [{"ParameterID": "HapticIntensity", "ParameterValue": 0.8}]}}
            ]
        }"#;
        let pattern = parse_pattern(text).unwrap();
        assert_eq!(pattern.len(), 1);
        assert_eq!(pattern.event(0).unwrap().intensity(), 0.8);
    }

    #[test]
    fn test_parse_pattern_invalid_output() {
        let err = parse_pattern("I am not JSON, sorry").unwrap_err();
        assert!(matches!(err, SynthesisError::InvalidOutputFormat(_)));
        assert!(err.to_string().contains("invalid output format"));
    }

    #[test]
    fn test_parse_pattern_normalizes() {
        // Service emitted an out-of-range value and a transient duration
        let text = r#"{
            "Version": 1.0,
            "Pattern": [
                {"Event": {"EventType": "HapticTransient", "Time": 0.1, "EventDuration": 0.5,
                           "EventParameters": [{"ParameterID": "HapticIntensity", "ParameterValue": 1.4}]}}
            ]
        }"#;
        let pattern = parse_pattern(text).unwrap();
        let event = pattern.event(0).unwrap();
        assert_eq!(event.duration, None);
        assert_eq!(event.intensity(), 1.0);
    }

    #[test]
    fn test_missing_api_key() {
        let client = SynthesisClient::new("https://example.invalid/v1beta", "model", "");
        let err = client.synthesize(&[], "").unwrap_err();
        assert!(matches!(err, SynthesisError::MissingApiKey));
    }
}

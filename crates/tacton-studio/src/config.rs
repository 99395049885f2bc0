//! Global configuration for tacton-studio
//!
//! Configuration is stored as YAML in the platform config directory.
//! Default location: ~/.config/tacton/config.yaml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Remote synthesis service settings
    pub synthesis: SynthesisConfig,
    /// Frame sampling settings
    pub sampling: SamplingConfig,
}

/// Synthesis service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// API credential; the GEMINI_API_KEY environment variable wins when set
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Service base URL
    pub endpoint: String,
    /// Request deadline in seconds (5-600)
    pub timeout_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::from("gemini-3-flash-preview"),
            endpoint: String::from("https://generativelanguage.googleapis.com/v1beta"),
            timeout_secs: 60,
        }
    }
}

impl SynthesisConfig {
    /// Clamp values to supported ranges
    pub fn validate(&mut self) {
        self.timeout_secs = self.timeout_secs.clamp(5, 600);
        if self.model.trim().is_empty() {
            self.model = SynthesisConfig::default().model;
        }
        if self.endpoint.trim().is_empty() {
            self.endpoint = SynthesisConfig::default().endpoint;
        }
    }

    /// Credential to send: environment override, then the config file
    pub fn resolved_api_key(&self) -> String {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| self.api_key.clone())
    }
}

/// Frame sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Frames sent per synthesis request (1-60)
    pub frame_count: usize,
    /// Maximum width of sampled frames in pixels; height keeps aspect
    pub max_width: u32,
    /// ffmpeg mjpeg quality scale, 2 (best) to 31
    pub jpeg_quality: u8,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            frame_count: 10,
            max_width: 640,
            jpeg_quality: 7,
        }
    }
}

impl SamplingConfig {
    /// Clamp values to supported ranges
    pub fn validate(&mut self) {
        self.frame_count = self.frame_count.clamp(1, 60);
        self.max_width = self.max_width.clamp(160, 1920);
        self.jpeg_quality = self.jpeg_quality.clamp(2, 31);
    }
}

impl Config {
    pub fn validate(&mut self) {
        self.synthesis.validate();
        self.sampling.validate();
    }
}

/// Get the default config file path
///
/// Returns: <config dir>/tacton/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tacton")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> Config {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
            Ok(mut config) => {
                config.validate();
                config
            }
            Err(e) => {
                log::warn!("load_config: Failed to parse config: {}, using defaults", e);
                Config::default()
            }
        },
        Err(e) => {
            log::warn!("load_config: Failed to read config file: {}, using defaults", e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sampling.frame_count, 10);
        assert_eq!(config.synthesis.timeout_secs, 60);
        assert!(config.synthesis.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_validation_clamps_values() {
        let mut config = Config {
            synthesis: SynthesisConfig {
                timeout_secs: 0,
                model: String::from("  "),
                ..SynthesisConfig::default()
            },
            sampling: SamplingConfig {
                frame_count: 500,
                max_width: 20,
                jpeg_quality: 0,
            },
        };
        config.validate();
        assert_eq!(config.synthesis.timeout_secs, 5);
        assert_eq!(config.synthesis.model, "gemini-3-flash-preview");
        assert_eq!(config.sampling.frame_count, 60);
        assert_eq!(config.sampling.max_width, 160);
        assert_eq!(config.sampling.jpeg_quality, 2);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = Config {
            synthesis: SynthesisConfig {
                api_key: String::from("k"),
                model: String::from("gemini-test"),
                endpoint: String::from("https://example.test/v1"),
                timeout_secs: 120,
            },
            sampling: SamplingConfig {
                frame_count: 16,
                max_width: 800,
                jpeg_quality: 5,
            },
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.synthesis.model, "gemini-test");
        assert_eq!(parsed.synthesis.timeout_secs, 120);
        assert_eq!(parsed.sampling.frame_count, 16);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let parsed: Config =
            serde_yaml::from_str("synthesis:\n  model: custom-model\n").unwrap();
        assert_eq!(parsed.synthesis.model, "custom-model");
        assert_eq!(parsed.sampling.frame_count, 10);
    }
}

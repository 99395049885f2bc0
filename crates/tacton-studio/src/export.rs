//! `.ahap` pattern export
//!
//! Serializes the in-memory document exactly as held (field order and
//! values) as pretty-printed JSON with 2-space indentation; re-parsing an
//! exported file yields an equal document.

use anyhow::{Context, Result};
use std::path::Path;

use tacton_core::pattern::HapticPattern;

/// File name for an exported pattern: the source video's base name with the
/// `.ahap` suffix, or `track.ahap` when no video name is available.
pub fn export_file_name(video_path: Option<&Path>) -> String {
    video_path
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| format!("{}.ahap", s))
        .unwrap_or_else(|| String::from("track.ahap"))
}

/// Serialize a pattern for export
pub fn serialize_pattern(pattern: &HapticPattern) -> Result<String> {
    serde_json::to_string_pretty(pattern).context("Failed to serialize pattern")
}

/// Write a pattern to disk as a `.ahap` file
pub fn export_pattern(path: &Path, pattern: &HapticPattern) -> Result<()> {
    let json = serialize_pattern(pattern)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write pattern file: {:?}", path))?;
    log::info!("exported {} events to {:?}", pattern.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tacton_core::pattern::{HapticEvent, HapticPattern, PatternEntry};

    fn sample_pattern() -> HapticPattern {
        HapticPattern {
            version: 1.0,
            pattern: vec![
                PatternEntry { event: HapticEvent::transient(0.25, 0.8, 0.6) },
                PatternEntry { event: HapticEvent::continuous(1.0, 2.0, 0.5, 0.3) },
            ],
        }
    }

    #[test]
    fn test_export_file_name() {
        let path = PathBuf::from("/videos/crash test.mp4");
        assert_eq!(export_file_name(Some(&path)), "crash test.ahap");
        assert_eq!(export_file_name(None), "track.ahap");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let pattern = sample_pattern();
        let json = serialize_pattern(&pattern).unwrap();
        let parsed: HapticPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pattern);
    }

    #[test]
    fn test_serialization_is_indented() {
        let json = serialize_pattern(&sample_pattern()).unwrap();
        // 2-space pretty printing with top-level keys in declaration order
        assert!(json.contains("\n  \"Version\""));
        assert!(json.contains("\n  \"Pattern\""));
        assert!(json.find("\"Version\"").unwrap() < json.find("\"Pattern\"").unwrap());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = std::env::temp_dir().join("tacton-export-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("clip.ahap");

        let pattern = sample_pattern();
        export_pattern(&path, &pattern).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: HapticPattern = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, pattern);

        std::fs::remove_file(&path).unwrap();
    }
}

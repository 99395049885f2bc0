//! Video metadata via ffprobe

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{Result, VideoError};

/// Metadata for a loaded video source
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    /// Duration in seconds
    pub duration: f64,
    pub fps: f64,
}

impl VideoMetadata {
    /// Probe a video file with ffprobe.
    ///
    /// Reads the first video stream plus the container format section;
    /// duration is taken from the format section when present (more
    /// reliable than per-stream duration for most containers).
    pub fn probe(path: &Path) -> Result<Self> {
        let ffprobe = find_tool("ffprobe").ok_or(VideoError::ToolMissing("ffprobe"))?;

        let output = Command::new(&ffprobe)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
                "-select_streams",
                "v:0",
            ])
            .arg(path)
            .output()?;

        if !output.status.success() {
            return Err(VideoError::ProbeFailed {
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let json: serde_json::Value =
            serde_json::from_slice(&output.stdout).map_err(|e| VideoError::ProbeFailed {
                path: path.to_path_buf(),
                message: format!("unparsable ffprobe output: {}", e),
            })?;

        parse_probe_output(&json, path)
    }
}

/// Parse ffprobe's JSON document into metadata
fn parse_probe_output(json: &serde_json::Value, path: &Path) -> Result<VideoMetadata> {
    let stream = json["streams"]
        .as_array()
        .and_then(|s| s.first())
        .ok_or_else(|| VideoError::NoVideoStream(path.to_path_buf()))?;

    let width = stream["width"].as_u64().unwrap_or(0) as u32;
    let height = stream["height"].as_u64().unwrap_or(0) as u32;

    // Frame rate arrives as "30/1" or "29.97"
    let fps = parse_frame_rate(
        stream["r_frame_rate"]
            .as_str()
            .or_else(|| stream["avg_frame_rate"].as_str())
            .unwrap_or("30/1"),
    );

    let duration = json["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| stream["duration"].as_str().and_then(|s| s.parse::<f64>().ok()))
        .unwrap_or(0.0);

    Ok(VideoMetadata {
        width,
        height,
        duration,
        fps,
    })
}

/// Parse a frame rate string like "30/1" or "29.97"
fn parse_frame_rate(rate: &str) -> f64 {
    if let Some((num, den)) = rate.split_once('/') {
        let num: f64 = num.parse().unwrap_or(30.0);
        let den: f64 = den.parse().unwrap_or(1.0);
        if den > 0.0 {
            return num / den;
        }
    }
    rate.parse::<f64>().unwrap_or(30.0)
}

/// Locate an FFmpeg binary.
///
/// Checks a `TACTON_<TOOL>` env override first, then the system PATH.
pub fn find_tool(name: &'static str) -> Option<PathBuf> {
    let env_key = format!("TACTON_{}", name.to_uppercase());
    if let Ok(path) = std::env::var(&env_key) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        log::warn!("{} points at {:?}, which does not exist", env_key, path);
    }

    let binary = if cfg!(windows) {
        format!("{}.exe", name)
    } else {
        name.to_string()
    };

    let finder = if cfg!(windows) { "where" } else { "which" };
    let output = Command::new(finder).arg(&binary).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let path_str = String::from_utf8_lossy(&output.stdout);
    let first_line = path_str.lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return None;
    }
    let path = PathBuf::from(first_line);
    path.exists().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("30/1"), 30.0);
        assert_eq!(parse_frame_rate("60000/1001"), 60000.0 / 1001.0);
        assert_eq!(parse_frame_rate("29.97"), 29.97);
        // Degenerate inputs fall back to 30
        assert_eq!(parse_frame_rate("garbage"), 30.0);
        assert_eq!(parse_frame_rate("30/0"), 30.0);
    }

    #[test]
    fn test_parse_probe_output() {
        let json: serde_json::Value = serde_json::from_str(
            r#"{
                "streams": [{"width": 1920, "height": 1080, "r_frame_rate": "25/1", "duration": "9.5"}],
                "format": {"duration": "10.020000"}
            }"#,
        )
        .unwrap();

        let meta = parse_probe_output(&json, Path::new("clip.mp4")).unwrap();
        assert_eq!(meta.width, 1920);
        assert_eq!(meta.height, 1080);
        assert_eq!(meta.fps, 25.0);
        // Format-level duration wins over the stream's
        assert!((meta.duration - 10.02).abs() < 1e-9);
    }

    #[test]
    fn test_parse_probe_output_without_stream() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"streams": [], "format": {}}"#).unwrap();
        assert!(matches!(
            parse_probe_output(&json, Path::new("clip.mp4")),
            Err(VideoError::NoVideoStream(_))
        ));
    }

    #[test]
    fn test_parse_probe_output_stream_duration_fallback() {
        let json: serde_json::Value = serde_json::from_str(
            r#"{"streams": [{"width": 640, "height": 360, "avg_frame_rate": "24/1", "duration": "4.0"}],
                "format": {}}"#,
        )
        .unwrap();
        let meta = parse_probe_output(&json, Path::new("clip.webm")).unwrap();
        assert_eq!(meta.duration, 4.0);
        assert_eq!(meta.fps, 24.0);
    }
}

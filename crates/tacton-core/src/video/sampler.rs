//! Fixed-stride frame sampling
//!
//! The sampler seeks a video to N evenly spaced timestamps and captures a
//! downscaled JPEG at each. Seeks are strictly sequential: one ffmpeg child
//! runs at a time, and the next is only spawned after the previous exits.
//! The timestamp recorded per frame is the one the decoder actually landed
//! on (parsed from `showinfo` on stderr), not the requested one.

use std::path::Path;
use std::process::Command;

use super::probe::find_tool;
use super::{Result, VideoError};

/// A still frame captured from the video at a given instant
#[derive(Debug, Clone)]
pub struct SampledFrame {
    /// JPEG-encoded image data
    pub jpeg: Vec<u8>,
    /// Observed video-relative capture time in seconds
    pub timestamp: f64,
}

/// Evenly spaced frame sampler
#[derive(Debug, Clone)]
pub struct FrameSampler {
    frame_count: usize,
    max_width: u32,
    /// ffmpeg mjpeg quality scale, 2 (best) to 31
    jpeg_quality: u8,
}

impl FrameSampler {
    pub fn new(frame_count: usize, max_width: u32, jpeg_quality: u8) -> Self {
        Self {
            frame_count: frame_count.max(1),
            max_width: max_width.max(16),
            jpeg_quality: jpeg_quality.clamp(2, 31),
        }
    }

    /// Sample `frame_count` frames at `i * duration / frame_count`.
    ///
    /// Degrades to an empty sequence when ffmpeg is unavailable or the
    /// duration is not yet known; a single failed extraction is logged and
    /// skipped. Returned timestamps are non-decreasing within [0, duration].
    pub fn sample(&self, video: &Path, duration: f64) -> Vec<SampledFrame> {
        let times = sample_times(duration, self.frame_count);
        if times.is_empty() {
            log::warn!("frame sampling skipped: video duration is {:.3}s", duration);
            return Vec::new();
        }

        let Some(ffmpeg) = find_tool("ffmpeg") else {
            log::warn!("frame sampling skipped: ffmpeg not found on PATH");
            return Vec::new();
        };

        let mut frames = Vec::with_capacity(times.len());
        let mut previous = 0.0_f64;

        for requested in times {
            match extract_frame(&ffmpeg, video, requested, self.max_width, self.jpeg_quality) {
                Ok((jpeg, observed)) => {
                    let timestamp =
                        clamp_monotonic(previous, observed.unwrap_or(requested), duration);
                    previous = timestamp;
                    frames.push(SampledFrame { jpeg, timestamp });
                }
                Err(e) => {
                    log::warn!("skipping frame at {:.3}s: {}", requested, e);
                }
            }
        }

        log::info!("sampled {} frames from {:?}", frames.len(), video);
        frames
    }
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new(10, 640, 7)
    }
}

/// Requested sample timestamps: `i * duration / count` for `i = 0..count`.
///
/// Empty when the duration is zero, negative, or not finite.
pub fn sample_times(duration: f64, count: usize) -> Vec<f64> {
    if !duration.is_finite() || duration <= 0.0 || count == 0 {
        return Vec::new();
    }
    let step = duration / count as f64;
    (0..count).map(|i| i as f64 * step).collect()
}

/// Extract the frame nearest the playhead for display in the preview pane
pub fn extract_preview_frame(video: &Path, timestamp: f64, max_width: u32) -> Result<Vec<u8>> {
    let ffmpeg = find_tool("ffmpeg").ok_or(VideoError::ToolMissing("ffmpeg"))?;
    extract_frame(&ffmpeg, video, timestamp.max(0.0), max_width, 5).map(|(jpeg, _)| jpeg)
}

/// Decode one frame at `timestamp` to JPEG bytes.
///
/// `-copyts` keeps the demuxer's timestamps, so the `pts_time` that
/// `showinfo` prints for the selected frame is video-relative and can be
/// recorded as the observed capture time.
fn extract_frame(
    ffmpeg: &Path,
    video: &Path,
    timestamp: f64,
    max_width: u32,
    quality: u8,
) -> Result<(Vec<u8>, Option<f64>)> {
    let output = Command::new(ffmpeg)
        .args(["-hide_banner", "-loglevel", "info", "-ss"])
        .arg(format_timestamp(timestamp))
        .arg("-copyts")
        .arg("-i")
        .arg(video)
        .args(["-frames:v", "1", "-vf"])
        .arg(format!("showinfo,scale='min({},iw)':-2", max_width))
        .args(["-f", "image2pipe", "-c:v", "mjpeg", "-q:v"])
        .arg(quality.to_string())
        .arg("-")
        .output()?;

    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        return Err(VideoError::ExtractionFailed {
            timestamp,
            message: stderr.lines().last().unwrap_or("ffmpeg exited with error").to_string(),
        });
    }
    if output.stdout.is_empty() {
        return Err(VideoError::EmptyFrame { timestamp });
    }

    Ok((output.stdout, parse_pts_time(&stderr)))
}

/// Pull the selected frame's `pts_time` out of showinfo's stderr chatter.
///
/// showinfo logs one line per frame passing the filter; with `-frames:v 1`
/// there is exactly one, but take the last match in case the decoder
/// flushed extras.
fn parse_pts_time(stderr: &str) -> Option<f64> {
    stderr
        .match_indices("pts_time:")
        .filter_map(|(idx, tag)| {
            let rest = &stderr[idx + tag.len()..];
            let end = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
                .unwrap_or(rest.len());
            rest[..end].parse::<f64>().ok()
        })
        .last()
}

/// Clamp an observed timestamp into [previous, duration].
///
/// Seek precision can land a frame slightly before the requested time;
/// recorded timestamps must stay non-decreasing and inside the video.
fn clamp_monotonic(previous: f64, observed: f64, duration: f64) -> f64 {
    observed.clamp(previous, duration.max(previous))
}

/// Seconds to ffmpeg's HH:MM:SS.mmm argument form
fn format_timestamp(secs: f64) -> String {
    let secs = secs.max(0.0);
    let hours = (secs / 3600.0).floor() as u32;
    let minutes = ((secs % 3600.0) / 60.0).floor() as u32;
    let seconds = secs % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours, minutes, seconds)
}

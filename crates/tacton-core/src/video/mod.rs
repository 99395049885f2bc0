//! Video probing and frame extraction
//!
//! Both pieces shell out to the FFmpeg binaries found on PATH: `ffprobe`
//! answers metadata queries as JSON, `ffmpeg` decodes single frames to JPEG
//! through a pipe. Nothing here links against libav.

mod error;
mod probe;
mod sampler;

pub use error::{Result, VideoError};
pub use probe::{find_tool, VideoMetadata};
pub use sampler::{extract_preview_frame, sample_times, FrameSampler, SampledFrame};

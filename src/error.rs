//! Error handling module for clipjoin

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for clipjoin operations
#[derive(Error, Debug)]
pub enum JoinError {
    /// Source directory does not exist
    #[error("can NOT match the source folder \"{path}\"")]
    SourceDirNotFound { path: PathBuf },

    /// Input extension is not a supported container
    #[error("\"{format}\" is NOT supported for input")]
    UnsupportedInputFormat { format: String },

    /// Output extension is not a supported container
    #[error("\"{format}\" is NOT supported for output")]
    UnsupportedOutputFormat { format: String },

    /// Preset name is not one of the x264 tiers
    #[error("\"{name}\" is NOT supported for preset type")]
    UnsupportedPreset { name: String },

    /// CRF outside the 0-51 scale (also the sentinel for unparseable input)
    #[error("\"{value}\" is out of CRF scale range (the value should be 0-51)")]
    CrfOutOfRange { value: i32 },

    /// Audio quality outside 0.1-10.0 (also the sentinel for unparseable input)
    #[error("\"{value}\" is out of audio quality range (the value should be 0.1-10.0)")]
    AudioQualityOutOfRange { value: f64 },

    /// ffmpeg binary not found on PATH
    #[error("ffmpeg not found in PATH")]
    FfmpegNotFound,

    /// ffprobe binary not found on PATH
    #[error("ffprobe not found in PATH")]
    FfprobeNotFound,

    /// ffmpeg exited with a non-zero status
    #[error("ffmpeg failed: {message}")]
    FfmpegFailed { message: String, code: Option<i32> },

    /// ffprobe could not report a duration for an input
    #[error("failed to probe \"{path}\": {message}")]
    ProbeFailed { path: PathBuf, message: String },

    /// Run interrupted by the user
    #[error("interrupted")]
    Cancelled,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ffprobe output could not be parsed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for clipjoin operations
pub type JoinResult<T> = std::result::Result<T, JoinError>;

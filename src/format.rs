//! Supported container formats
//!
//! A static, explicit set checked by direct membership test; input and
//! output extensions from the command line must resolve to one of these.

use std::fmt;

/// Container formats accepted for input and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Mov,
    Mp4,
    Mkv,
    Avi,
    Flv,
    Webm,
    Mpeg,
    MpegTs,
    Wmv,
    M4v,
}

impl MediaFormat {
    /// Resolve a lowercased, dot-stripped extension to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "mov" => Some(Self::Mov),
            "mp4" => Some(Self::Mp4),
            "mkv" => Some(Self::Mkv),
            "avi" => Some(Self::Avi),
            "flv" => Some(Self::Flv),
            "webm" => Some(Self::Webm),
            "mpeg" | "mpg" => Some(Self::Mpeg),
            "ts" | "mpegts" => Some(Self::MpegTs),
            "wmv" => Some(Self::Wmv),
            "m4v" => Some(Self::M4v),
            _ => None,
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mov => "mov",
            Self::Mp4 => "mp4",
            Self::Mkv => "mkv",
            Self::Avi => "avi",
            Self::Flv => "flv",
            Self::Webm => "webm",
            Self::Mpeg => "mpeg",
            Self::MpegTs => "ts",
            Self::Wmv => "wmv",
            Self::M4v => "m4v",
        }
    }

    /// FFmpeg muxer name passed with `-f` for the output container.
    pub fn muxer(&self) -> &'static str {
        match self {
            Self::Mov => "mov",
            Self::Mp4 | Self::M4v => "mp4",
            Self::Mkv => "matroska",
            Self::Avi => "avi",
            Self::Flv => "flv",
            Self::Webm => "webm",
            Self::Mpeg => "mpeg",
            Self::MpegTs => "mpegts",
            Self::Wmv => "asf",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

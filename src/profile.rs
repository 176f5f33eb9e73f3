//! Encoder profile: the codec/quality parameters applied uniformly to every
//! join job in a run. Constructed once from defaults plus command-line
//! overrides, validated before any job starts, then shared read-only.

use std::fmt;

use crate::error::{JoinError, JoinResult};

/// x264 speed/quality tiers, ordered fastest to slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    UltraFast,
    SuperFast,
    VeryFast,
    Faster,
    Fast,
    #[default]
    Medium,
    Slow,
    Slower,
    VerySlow,
}

impl Preset {
    /// Case-insensitive tier lookup.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ultrafast" => Some(Self::UltraFast),
            "superfast" => Some(Self::SuperFast),
            "veryfast" => Some(Self::VeryFast),
            "faster" => Some(Self::Faster),
            "fast" => Some(Self::Fast),
            "medium" => Some(Self::Medium),
            "slow" => Some(Self::Slow),
            "slower" => Some(Self::Slower),
            "veryslow" => Some(Self::VerySlow),
            _ => None,
        }
    }

    /// The lowercased name ffmpeg expects after `-preset`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UltraFast => "ultrafast",
            Self::SuperFast => "superfast",
            Self::VeryFast => "veryfast",
            Self::Faster => "faster",
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
            Self::Slower => "slower",
            Self::VerySlow => "veryslow",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable codec/quality configuration shared by all jobs.
#[derive(Debug, Clone)]
pub struct EncodeProfile {
    /// Video encoder; fixed.
    pub video_codec: &'static str,
    /// Audio encoder; fixed.
    pub audio_codec: &'static str,
    pub preset: Preset,
    /// Constant rate factor, valid range 0-51. 18 is visually lossless.
    pub crf: i32,
    /// Audio quality, valid range 0.1-10.0, stored with one decimal.
    pub audio_quality: f64,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            video_codec: "libx264",
            audio_codec: "aac",
            preset: Preset::Medium,
            crf: 18,
            audio_quality: 10.0,
        }
    }
}

impl EncodeProfile {
    /// Range checks; any violation aborts the run before the first job.
    pub fn validate(&self) -> JoinResult<()> {
        if !(0..=51).contains(&self.crf) {
            return Err(JoinError::CrfOutOfRange { value: self.crf });
        }
        if !(0.1..=10.0).contains(&self.audio_quality) {
            return Err(JoinError::AudioQualityOutOfRange {
                value: self.audio_quality,
            });
        }
        Ok(())
    }

    /// Audio quality as rendered: a whole number, rounded away from zero,
    /// even though the stored value keeps one decimal.
    fn audio_quality_rendered(&self) -> i64 {
        self.audio_quality.round() as i64
    }

    /// Encoder argument tokens appended to each concat invocation.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-c:v".into(),
            self.video_codec.into(),
            "-preset".into(),
            self.preset.as_str().into(),
            "-crf".into(),
            self.crf.to_string(),
            "-c:a".into(),
            self.audio_codec.into(),
            "-q:a".into(),
            self.audio_quality_rendered().to_string(),
        ]
    }

    /// The argument line as a single string; pure function of field values.
    pub fn render(&self) -> String {
        self.args().join(" ")
    }
}

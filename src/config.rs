//! Run configuration
//!
//! The explicit, passed-down settings for one invocation. Numeric flags keep
//! out-of-range sentinels when the raw input does not parse; `validate`
//! resolves everything into typed values or the first fatal configuration
//! error, before any listing or job starts.

use std::path::PathBuf;

use crate::error::{JoinError, JoinResult};
use crate::format::MediaFormat;
use crate::profile::{EncodeProfile, Preset};

/// Default grouping threshold in minutes.
pub const DEFAULT_INTERVAL_MINUTES: i64 = 3;

/// Raw run settings as collected from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: PathBuf,
    /// Lowercased, dot-stripped input extension.
    pub input_format: String,
    /// Lowercased, dot-stripped output extension.
    pub output_format: String,
    pub interval_minutes: i64,
    pub preset: String,
    /// -1 sentinel when the flag did not parse as an integer.
    pub crf: i32,
    /// -1.0 sentinel when the flag did not parse as a decimal.
    pub audio_quality: f64,
}

/// Fully validated settings, ready for the orchestrator.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub source: PathBuf,
    pub input_format: MediaFormat,
    pub output_format: MediaFormat,
    pub interval_minutes: i64,
    pub profile: EncodeProfile,
}

impl RunConfig {
    /// Check everything that is run-fatal, in the order the user sees it:
    /// source directory, input format, output format, preset, CRF range,
    /// audio quality range.
    pub fn validate(&self) -> JoinResult<ValidatedConfig> {
        if !self.source.is_dir() {
            return Err(JoinError::SourceDirNotFound {
                path: self.source.clone(),
            });
        }
        let input_format = MediaFormat::from_extension(&self.input_format).ok_or_else(|| {
            JoinError::UnsupportedInputFormat {
                format: self.input_format.to_uppercase(),
            }
        })?;
        let output_format = MediaFormat::from_extension(&self.output_format).ok_or_else(|| {
            JoinError::UnsupportedOutputFormat {
                format: self.output_format.to_uppercase(),
            }
        })?;
        let preset = Preset::parse(&self.preset).ok_or_else(|| JoinError::UnsupportedPreset {
            name: self.preset.to_uppercase(),
        })?;

        let profile = EncodeProfile {
            preset,
            crf: self.crf,
            audio_quality: self.audio_quality,
            ..EncodeProfile::default()
        };
        profile.validate()?;

        Ok(ValidatedConfig {
            source: self.source.clone(),
            input_format,
            output_format,
            interval_minutes: self.interval_minutes,
            profile,
        })
    }
}

/// Parse an interval flag; invalid input silently falls back to the default.
pub fn parse_interval(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(DEFAULT_INTERVAL_MINUTES)
}

/// Parse a CRF flag; unparseable input becomes the -1 sentinel so validation
/// reports it as out of range.
pub fn parse_crf(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(-1)
}

/// Parse an audio-quality flag, rounded to one decimal away from zero;
/// unparseable input becomes the -1.0 sentinel.
pub fn parse_audio_quality(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) => (value * 10.0).round() / 10.0,
        Err(_) => -1.0,
    }
}

/// Normalize an extension flag: lowercase, leading dot stripped.
pub fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path) -> RunConfig {
        RunConfig {
            source: dir.to_path_buf(),
            input_format: "mov".to_string(),
            output_format: "mp4".to_string(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            preset: "medium".to_string(),
            crf: 18,
            audio_quality: 10.0,
        }
    }

    #[test]
    fn interval_falls_back_to_default() {
        assert_eq!(parse_interval("5"), 5);
        assert_eq!(parse_interval("-2"), -2);
        assert_eq!(parse_interval("soon"), DEFAULT_INTERVAL_MINUTES);
        assert_eq!(parse_interval(""), DEFAULT_INTERVAL_MINUTES);
    }

    #[test]
    fn crf_sentinel_on_bad_input() {
        assert_eq!(parse_crf("23"), 23);
        assert_eq!(parse_crf("high"), -1);
    }

    #[test]
    fn audio_quality_rounds_to_one_decimal_away_from_zero() {
        assert_eq!(parse_audio_quality("0.25"), 0.3);
        assert_eq!(parse_audio_quality("9.94"), 9.9);
        assert_eq!(parse_audio_quality("10"), 10.0);
        assert_eq!(parse_audio_quality("loud"), -1.0);
    }

    #[test]
    fn extension_is_normalized() {
        assert_eq!(normalize_extension(".MOV"), "mov");
        assert_eq!(normalize_extension("Mp4"), "mp4");
        assert_eq!(normalize_extension("mkv"), "mkv");
    }

    #[test]
    fn validate_accepts_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let validated = config_in(dir.path()).validate().unwrap();
        assert_eq!(validated.input_format, MediaFormat::Mov);
        assert_eq!(validated.output_format, MediaFormat::Mp4);
        assert_eq!(validated.profile.crf, 18);
    }

    #[test]
    fn validate_rejects_missing_source() {
        let mut config = config_in(std::path::Path::new("/no/such/folder"));
        config.source = PathBuf::from("/no/such/folder");
        assert!(matches!(
            config.validate(),
            Err(JoinError::SourceDirNotFound { .. })
        ));
    }

    #[test]
    fn validate_rejects_unsupported_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.input_format = "exe".to_string();
        assert!(matches!(
            config.validate(),
            Err(JoinError::UnsupportedInputFormat { .. })
        ));

        let mut config = config_in(dir.path());
        config.output_format = "docx".to_string();
        assert!(matches!(
            config.validate(),
            Err(JoinError::UnsupportedOutputFormat { .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_preset() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.preset = "turbo".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, JoinError::UnsupportedPreset { ref name } if name == "TURBO"));
    }

    #[test]
    fn validate_rejects_crf_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.crf = parse_crf("not-a-number");
        assert!(matches!(
            config.validate(),
            Err(JoinError::CrfOutOfRange { value: -1 })
        ));
    }
}

//! CLI module for clipjoin
//!
//! Command-line surface and its conversion into a run configuration.

use std::env;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, RunConfig};

/// Join timestamp-named video clips into per-session files
///
/// Clips named `YYYYMMDD_HHMMSS.<ext>` are clustered by timestamp proximity
/// and each cluster is merged into `<source>/Joins/` with FFmpeg.
#[derive(Parser, Debug)]
#[command(name = "clipjoin")]
#[command(about = "Join timestamp-named video clips into per-session files")]
#[command(version)]
pub struct Cli {
    /// Source directory holding the clips (default: current directory)
    #[arg(short = 'p', long = "path")]
    pub path: Option<PathBuf>,

    /// Input extension filter (leading dot accepted)
    #[arg(long = "inputs_type", visible_alias = "it", default_value = "mov")]
    pub inputs_type: String,

    /// Output container extension
    #[arg(long = "output_type", default_value = "mp4")]
    pub output_type: String,

    /// Grouping threshold in minutes (invalid input falls back to 3)
    #[arg(short = 'i', long = "interval", default_value = "3")]
    pub interval: String,

    /// x264 speed/quality tier, case-insensitive
    #[arg(long, default_value = "medium")]
    pub preset: String,

    /// Constant rate factor, 0-51
    #[arg(long, default_value = "18")]
    pub crf: String,

    /// Audio quality, 0.1-10.0, rounded to one decimal
    #[arg(long, default_value = "10")]
    pub aq: String,
}

/// Rewrite the two-letter `-it` short form, which clap cannot express,
/// into its long flag before parsing. Everything else passes through.
pub fn normalize_argv<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            if arg == "-it" {
                "--inputs_type".to_string()
            } else {
                arg
            }
        })
        .collect()
}

impl Cli {
    /// Collect the raw flags into the run configuration, applying the
    /// sentinel rules for unparseable numeric input.
    pub fn into_config(self) -> RunConfig {
        let source = self
            .path
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        RunConfig {
            source,
            input_format: config::normalize_extension(&self.inputs_type),
            output_format: config::normalize_extension(&self.output_type),
            interval_minutes: config::parse_interval(&self.interval),
            preset: self.preset,
            crf: config::parse_crf(&self.crf),
            audio_quality: config::parse_audio_quality(&self.aq),
        }
    }
}

//! Media duration probing via ffprobe.
//!
//! The concat runner needs the summed input duration to turn FFmpeg's
//! processed-time stream into a percentage.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::error::{JoinError, JoinResult};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Container duration of `path` in milliseconds, from `ffprobe -show_format`.
pub async fn probe_duration_ms(path: &Path) -> JoinResult<i64> {
    which::which("ffprobe").map_err(|_| JoinError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(JoinError::ProbeFailed {
            path: path.to_path_buf(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;
    let seconds = probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| JoinError::ProbeFailed {
            path: path.to_path_buf(),
            message: "no duration in probe output".to_string(),
        })?;

    debug!(path = %path.display(), seconds, "probed input duration");
    Ok((seconds * 1000.0) as i64)
}

/// Summed duration of a session's inputs, the total for one join job.
pub async fn total_duration_ms(paths: &[PathBuf]) -> JoinResult<i64> {
    let mut total = 0;
    for path in paths {
        total += probe_duration_ms(path).await?;
    }
    Ok(total)
}

//! FFmpeg concat command builder and runner.
//!
//! One `ConcatCommand` merges a session's inputs into a single output file
//! through the concat demuxer, re-encoding with the run's profile arguments.
//! The runner parses FFmpeg's `-progress` stream from stderr and honors a
//! cancellation signal by killing the child process.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::NamedTempFile;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::watch;
use tracing::debug;

use crate::engine::progress::{parse_progress_line, JobProgress};
use crate::error::{JoinError, JoinResult};
use crate::format::MediaFormat;
use crate::profile::EncodeProfile;

/// How many non-progress stderr lines to keep for the failure message.
const DIAGNOSTIC_TAIL: usize = 8;

/// One concat invocation: a session's inputs merged into `output`.
#[derive(Debug, Clone)]
pub struct ConcatCommand {
    inputs: Vec<PathBuf>,
    output: PathBuf,
    output_format: MediaFormat,
    encoder_args: Vec<String>,
}

impl ConcatCommand {
    pub fn new(
        inputs: Vec<PathBuf>,
        output: PathBuf,
        output_format: MediaFormat,
        profile: &EncodeProfile,
    ) -> Self {
        Self {
            inputs,
            output,
            output_format,
            encoder_args: profile.args(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Write the concat demuxer list: one `file '...'` line per input, in
    /// session order.
    fn write_list_file(&self) -> JoinResult<NamedTempFile> {
        let mut list = NamedTempFile::new()?;
        for input in &self.inputs {
            writeln!(list, "file '{}'", escape_concat_path(input))?;
        }
        list.flush()?;
        Ok(list)
    }

    /// Full argument vector, given the path of the written list file.
    fn build_args(&self, list_path: &Path) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-y".into(),
            "-v".into(),
            "error".into(),
            "-progress".into(),
            "pipe:2".into(),
            "-f".into(),
            "concat".into(),
            "-safe".into(),
            "0".into(),
            "-i".into(),
            list_path.display().to_string(),
        ];
        args.extend(self.encoder_args.iter().cloned());
        args.push("-f".into());
        args.push(self.output_format.muxer().into());
        args.push(self.output.display().to_string());
        args
    }
}

/// Quote a path for an ffmpeg concat list entry: the whole path sits in
/// single quotes, embedded quotes become `'\''`.
fn escape_concat_path(path: &Path) -> String {
    path.display().to_string().replace('\'', "'\\''")
}

/// Runs concat commands one at a time, forwarding progress events and
/// honoring a cancellation signal.
#[derive(Default)]
pub struct FfmpegRunner {
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl FfmpegRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cancellation signal observed while a child is running.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Run `cmd`, invoking `on_progress` once per FFmpeg progress block with
    /// non-decreasing `processed_ms`. Blocks the caller until the child
    /// exits, fails, or is killed by cancellation; the list file is the only
    /// transient artifact and is removed on drop either way.
    pub async fn run<F>(&self, cmd: &ConcatCommand, total_ms: i64, mut on_progress: F) -> JoinResult<()>
    where
        F: FnMut(JobProgress) + Send,
    {
        which::which("ffmpeg").map_err(|_| JoinError::FfmpegNotFound)?;

        let list = cmd.write_list_file()?;
        let args = cmd.build_args(list.path());
        debug!("running ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stderr = child.stderr.take().expect("stderr not captured");
        let mut lines = BufReader::new(stderr).lines();

        let mut current = JobProgress {
            total_ms,
            ..JobProgress::default()
        };
        let mut diagnostics: Vec<String> = Vec::new();
        let mut cancel_rx = self.cancel_rx.clone();

        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if let Some(event) = parse_progress_line(&line, &mut current) {
                            on_progress(event);
                        } else if !line.contains('=') && !line.trim().is_empty() {
                            if diagnostics.len() == DIAGNOSTIC_TAIL {
                                diagnostics.remove(0);
                            }
                            diagnostics.push(line.trim().to_string());
                        }
                    }
                    None => break,
                },
                _ = cancelled(cancel_rx.as_mut()) => {
                    let _ = child.kill().await;
                    return Err(JoinError::Cancelled);
                }
            }
        }

        let status = tokio::select! {
            status = child.wait() => status?,
            _ = cancelled(cancel_rx.as_mut()) => {
                let _ = child.kill().await;
                return Err(JoinError::Cancelled);
            }
        };

        if status.success() {
            Ok(())
        } else {
            let message = if diagnostics.is_empty() {
                "exited with non-zero status".to_string()
            } else {
                diagnostics.join("; ")
            };
            Err(JoinError::FfmpegFailed {
                message,
                code: status.code(),
            })
        }
    }
}

/// Resolves once the cancellation flag is raised; pends forever when no
/// signal is wired up or the sender goes away without cancelling.
async fn cancelled(cancel_rx: Option<&mut watch::Receiver<bool>>) {
    match cancel_rx {
        Some(rx) => {
            if *rx.borrow() {
                return;
            }
            while rx.changed().await.is_ok() {
                if *rx.borrow() {
                    return;
                }
            }
            std::future::pending::<()>().await;
        }
        None => std::future::pending::<()>().await,
    }
}

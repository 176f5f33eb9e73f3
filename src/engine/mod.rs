//! Conversion orchestration: one sequential FFmpeg job per session.
//!
//! The run walks `Listing → Grouping → Processing (per session) →
//! Summarized`. Jobs are strictly sequential; the external encoder already
//! saturates the machine for a single merge. A session's failure is logged
//! and the run moves on to the next session.

pub mod command;
pub mod progress;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::ValidatedConfig;
use crate::engine::command::{ConcatCommand, FfmpegRunner};
use crate::error::{JoinError, JoinResult};
use crate::probe;
use crate::registry;
use crate::report;
use crate::session::{self, Session};

/// Output subfolder created under the source directory.
pub const OUTPUT_DIR_NAME: &str = "Joins";

/// Aggregate result of one run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Sessions merged successfully.
    pub joined: usize,
    /// Sessions whose job failed.
    pub failed: usize,
    /// Clips excluded by name validation.
    pub rejected: usize,
    /// Sum of per-job wall-clock times.
    pub job_elapsed: Duration,
    /// Wall-clock time of the whole run.
    pub run_elapsed: Duration,
}

/// Drives a whole run: listing, grouping, then one join job per session.
pub struct Orchestrator {
    config: ValidatedConfig,
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl Orchestrator {
    pub fn new(config: ValidatedConfig) -> Self {
        Self {
            config,
            cancel_rx: None,
        }
    }

    /// Wire up the interrupt signal; observed before each job starts and
    /// forwarded into the runner so an in-flight job can be killed.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    pub async fn run(&self) -> JoinResult<RunSummary> {
        let begin = Instant::now();

        info!("parse the folder structure");
        let clips = registry::discover_clips(&self.config.source, self.config.input_format)?;
        let grouping = session::group_sessions(clips, self.config.interval_minutes);

        report::print_session_tree(&self.config.source, &grouping, self.config.input_format);
        for rejected in &grouping.rejected {
            warn!("skipped \"{}\": {} name format", rejected.name, rejected.reason);
        }

        let output_dir = self.config.source.join(OUTPUT_DIR_NAME);
        let mut summary = RunSummary {
            rejected: grouping.rejected.len(),
            ..RunSummary::default()
        };

        for session in &grouping.sessions {
            if self.is_cancelled() {
                return Err(JoinError::Cancelled);
            }

            let output_name = format!(
                "{}.{}",
                session.key(),
                self.config.output_format.extension()
            );
            match self.join_session(session, &output_dir, &output_name).await {
                Ok(elapsed) => {
                    summary.joined += 1;
                    summary.job_elapsed += elapsed;
                    info!(
                        "join video in {} took{}",
                        output_name,
                        report::format_elapsed(elapsed)
                    );
                }
                Err(JoinError::Cancelled) => return Err(JoinError::Cancelled),
                Err(e) => {
                    summary.failed += 1;
                    error!("join video in {} ({})", output_name, e);
                }
            }
        }

        summary.run_elapsed = begin.elapsed();
        info!(
            "process exited in{} ({} joined, {} failed)",
            report::format_elapsed(summary.run_elapsed),
            summary.joined,
            summary.failed
        );
        Ok(summary)
    }

    /// One job: ensure the output folder, probe the total duration, then run
    /// the concat command while forwarding progress to the bar. Every error
    /// here is per-job; the caller logs it and continues.
    async fn join_session(
        &self,
        session: &Session,
        output_dir: &Path,
        output_name: &str,
    ) -> JoinResult<Duration> {
        tokio::fs::create_dir_all(output_dir).await?;

        info!("preparing to join video in {}", output_name);

        let inputs: Vec<PathBuf> = session.clips().iter().map(|c| c.path.clone()).collect();
        let total_ms = probe::total_duration_ms(&inputs).await?;

        let cmd = ConcatCommand::new(
            inputs,
            output_dir.join(output_name),
            self.config.output_format,
            &self.config.profile,
        );

        let mut runner = FfmpegRunner::new();
        if let Some(cancel_rx) = &self.cancel_rx {
            runner = runner.with_cancel(cancel_rx.clone());
        }

        let bar = report::JobBar::new(output_name);
        let started = Instant::now();
        let result = runner.run(&cmd, total_ms, |event| bar.update(&event)).await;

        match result {
            Ok(()) => {
                bar.finish();
                Ok(started.elapsed())
            }
            Err(e) => {
                bar.abandon();
                Err(e)
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_rx
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }
}

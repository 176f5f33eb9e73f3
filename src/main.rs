//! clipjoin
//!
//! Batch-join timestamp-named video clips into continuous recording
//! sessions. Clips named `YYYYMMDD_HHMMSS.<ext>` are clustered by timestamp
//! proximity; each cluster becomes one FFmpeg concat job writing into
//! `<source>/Joins/`.
//!
//! # Usage
//!
//! ```bash
//! clipjoin --path /media/dashcam
//! clipjoin -p /media/dashcam --inputs_type mov --output_type mp4 --interval 3
//! clipjoin --preset slow --crf 20 --aq 8
//! ```

use std::process::ExitCode;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use clipjoin::cli::{self, Cli};
use clipjoin::engine::Orchestrator;
use clipjoin::error::JoinError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse_from(cli::normalize_argv(std::env::args())).into_config();

    info!("start processing");

    // All run-fatal checks happen before any listing.
    let validated = match config.validate() {
        Ok(validated) => validated,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    match Orchestrator::new(validated).with_cancel(cancel_rx).run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(JoinError::Cancelled) => {
            warn!("interrupted, terminated the running ffmpeg job");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

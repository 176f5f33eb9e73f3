//! Console presentation: the grouped session tree, the per-job progress bar,
//! and the elapsed-time display. No decisions are made here.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::engine::progress::JobProgress;
use crate::format::MediaFormat;
use crate::session::Grouping;

/// Print the grouped listing, one tree branch per session.
pub fn print_session_tree(source: &Path, grouping: &Grouping, format: MediaFormat) {
    println!("{} ({})", source.display(), grouping.clip_count());

    let last_session = grouping.sessions.len().saturating_sub(1);
    for (i, session) in grouping.sessions.iter().enumerate() {
        let branch = if i == last_session { "└─" } else { "├─" };
        println!("\t{branch}{} ({})", session.key(), session.len());

        let stem = if i == last_session { " " } else { "│" };
        let last_clip = session.len() - 1;
        for (j, clip) in session.clips().iter().enumerate() {
            let leaf = if j == last_clip { "└─" } else { "├─" };
            println!("\t{stem}\t{leaf}{}.{}", clip.name, format.extension());
        }
    }
}

/// Live percentage bar for one join job.
pub struct JobBar {
    bar: ProgressBar,
}

impl JobBar {
    pub fn new(output_name: &str) -> Self {
        let bar = ProgressBar::new(100);
        bar.set_prefix(output_name.to_string());
        bar.set_style(
            ProgressStyle::with_template("{prefix} |{bar:50.yellow/white}| {percent:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }

    /// The bar only moves forward; late or jittery events never rewind it.
    pub fn update(&self, event: &JobProgress) {
        let percent = event.percentage() as u64;
        if percent > self.bar.position() {
            self.bar.set_position(percent);
        }
    }

    /// Terminal success: clear the bar so the completion line stands alone.
    pub fn finish(&self) {
        self.bar.set_position(100);
        self.bar.finish_and_clear();
    }

    /// Terminal failure: drop the bar, the error line follows.
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}

/// Render a duration as the padded ` d  h  m  s` display used in job and
/// summary lines.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;
    format!(" {days:>2} d {hours:>2} h {minutes:>2} m {seconds:>2} s")
}

//! Job progress events parsed from FFmpeg's `-progress` stream.

/// One progress event for a running join job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobProgress {
    /// Processed output duration in milliseconds; non-decreasing.
    pub processed_ms: i64,
    /// Total duration of the session's inputs in milliseconds.
    pub total_ms: i64,
    /// Set once FFmpeg reports `progress=end`.
    pub is_complete: bool,
}

impl JobProgress {
    /// Percentage in [0, 100], clamped against encoder timestamp jitter.
    pub fn percentage(&self) -> f64 {
        if self.total_ms <= 0 {
            return 0.0;
        }
        ((self.processed_ms as f64 / self.total_ms as f64) * 100.0).clamp(0.0, 100.0)
    }
}

/// Fold one `key=value` line of `-progress pipe:2` output into `current`.
/// Returns a snapshot at each block terminator (the `progress=` key), which
/// is the delivery point for one event.
pub(crate) fn parse_progress_line(line: &str, current: &mut JobProgress) -> Option<JobProgress> {
    let (key, value) = line.trim().split_once('=')?;
    match key {
        // ffmpeg reports both fields in microseconds despite the name.
        "out_time_us" | "out_time_ms" => {
            if let Ok(us) = value.parse::<i64>() {
                current.processed_ms = current.processed_ms.max(us / 1000);
            }
        }
        "progress" => {
            if value == "end" {
                current.is_complete = true;
            }
            return Some(current.clone());
        }
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_terminator_emits_snapshot() {
        let mut current = JobProgress {
            total_ms: 10_000,
            ..JobProgress::default()
        };

        assert!(parse_progress_line("frame=120", &mut current).is_none());
        assert!(parse_progress_line("out_time_us=5000000", &mut current).is_none());
        let event = parse_progress_line("progress=continue", &mut current).unwrap();
        assert_eq!(event.processed_ms, 5_000);
        assert!(!event.is_complete);

        parse_progress_line("out_time_us=10000000", &mut current);
        let event = parse_progress_line("progress=end", &mut current).unwrap();
        assert_eq!(event.processed_ms, 10_000);
        assert!(event.is_complete);
    }

    #[test]
    fn processed_time_never_rewinds() {
        let mut current = JobProgress::default();
        parse_progress_line("out_time_us=4000000", &mut current);
        parse_progress_line("out_time_us=3000000", &mut current);
        assert_eq!(current.processed_ms, 4_000);
    }

    #[test]
    fn percentage_is_clamped() {
        let over = JobProgress {
            processed_ms: 12_000,
            total_ms: 10_000,
            is_complete: false,
        };
        assert_eq!(over.percentage(), 100.0);

        let halfway = JobProgress {
            processed_ms: 5_000,
            total_ms: 10_000,
            is_complete: false,
        };
        assert!((halfway.percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_total_reports_zero_percent() {
        let progress = JobProgress {
            processed_ms: 1_000,
            total_ms: 0,
            is_complete: false,
        };
        assert_eq!(progress.percentage(), 0.0);
    }

    #[test]
    fn garbage_lines_are_ignored() {
        let mut current = JobProgress::default();
        assert!(parse_progress_line("", &mut current).is_none());
        assert!(parse_progress_line("[mov @ 0x7f] moov atom not found", &mut current).is_none());
        assert!(parse_progress_line("out_time_us=notanumber", &mut current).is_none());
        assert_eq!(current, JobProgress::default());
    }
}

//! Session grouping: cluster clips into continuous recordings by timestamp
//! proximity.
//!
//! A single forward scan with one-element lookback. The first listed clip
//! always opens a session without name validation; every later clip must
//! look like `YYYYMMDD_HHMMSS` or it is rejected and skipped entirely. A
//! valid clip joins the current session when its gap to the last accepted
//! clip is within the interval threshold, otherwise it opens a new session.

use std::fmt;

use chrono::NaiveDateTime;

use crate::registry::Clip;

/// Length of a `YYYYMMDD_HHMMSS` clip name.
const TIMESTAMP_LEN: usize = 15;
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Why a clip name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Name length differs from the timestamp pattern length.
    WrongLength,
    /// Name is not digits separated by a single underscore.
    NonNumeric,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength => write!(f, "wrong length"),
            Self::NonNumeric => write!(f, "non-numeric"),
        }
    }
}

/// A clip excluded from every session, kept for diagnostic reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedClip {
    pub name: String,
    pub reason: RejectReason,
}

/// An ordered, non-empty run of clips believed to be one continuous
/// recording. Built once by the grouping pass, read-only afterward.
#[derive(Debug)]
pub struct Session {
    clips: Vec<Clip>,
}

impl Session {
    fn open(clip: Clip) -> Self {
        Self { clips: vec![clip] }
    }

    fn push(&mut self, clip: Clip) {
        self.clips.push(clip);
    }

    /// Session key: the name of its first clip.
    pub fn key(&self) -> &str {
        &self.clips[0].name
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    fn last_name(&self) -> &str {
        // Non-empty by construction.
        &self.clips[self.clips.len() - 1].name
    }
}

/// Result of the grouping pass: sessions in first-seen order plus the
/// rejected clip names.
#[derive(Debug, Default)]
pub struct Grouping {
    pub sessions: Vec<Session>,
    pub rejected: Vec<RejectedClip>,
}

impl Grouping {
    /// Total number of clips placed into sessions.
    pub fn clip_count(&self) -> usize {
        self.sessions.iter().map(Session::len).sum()
    }
}

fn validate_name(name: &str) -> Result<(), RejectReason> {
    if name.len() != TIMESTAMP_LEN {
        return Err(RejectReason::WrongLength);
    }
    match name.split_once('_') {
        Some((date, time))
            if !date.is_empty()
                && !time.is_empty()
                && date.bytes().all(|b| b.is_ascii_digit())
                && time.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Ok(())
        }
        _ => Err(RejectReason::NonNumeric),
    }
}

fn parse_timestamp(name: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(name, TIMESTAMP_FORMAT).ok()
}

/// Partition `clips` into sessions. The gap comparison is inclusive and
/// signed: out-of-order timestamps produce a negative gap, which counts as
/// within the interval. Rejected clips never update the lookback reference,
/// so the next valid clip compares against the last accepted one. When
/// either side of the comparison has no parseable timestamp (possible only
/// through the unvalidated first clip or an impossible calendar date), the
/// clip opens a new session.
pub fn group_sessions(clips: Vec<Clip>, interval_minutes: i64) -> Grouping {
    let mut grouping = Grouping::default();

    for clip in clips {
        let Some(current) = grouping.sessions.last_mut() else {
            // The first listed clip always opens a session, name unchecked.
            grouping.sessions.push(Session::open(clip));
            continue;
        };

        if let Err(reason) = validate_name(&clip.name) {
            grouping.rejected.push(RejectedClip {
                name: clip.name,
                reason,
            });
            continue;
        }

        let within_interval = match (
            parse_timestamp(current.last_name()),
            parse_timestamp(&clip.name),
        ) {
            (Some(last), Some(this)) => {
                (this - last).num_seconds() <= interval_minutes * 60
            }
            _ => false,
        };

        if within_interval {
            current.push(clip);
        } else {
            grouping.sessions.push(Session::open(clip));
        }
    }

    grouping
}

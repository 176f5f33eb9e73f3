//! clipjoin library
//!
//! Groups a directory of timestamp-named video clips into contiguous
//! recording sessions and merges each session into a single file by driving
//! an external FFmpeg binary.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod probe;
pub mod profile;
pub mod registry;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use config::{RunConfig, ValidatedConfig};
pub use engine::{Orchestrator, RunSummary};
pub use error::{JoinError, JoinResult};
pub use format::MediaFormat;
pub use profile::{EncodeProfile, Preset};
pub use session::{group_sessions, Grouping, RejectReason, RejectedClip, Session};

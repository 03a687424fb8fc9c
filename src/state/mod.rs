//! State management module
//!
//! Timer snapshots, the session log, and the per-session context that owns them.

pub mod app_state;
pub mod session_log;
pub mod timer_state;

// Re-export main types
pub use app_state::{Announcement, AnnouncementSource, AppState};
pub use session_log::{SessionKind, SessionLog, SessionRecord, SessionSummary};
pub use timer_state::{
    TimerState, TimerStatus, CRITICAL_THRESHOLD_SECONDS, DEFAULT_DURATION_SECONDS,
};

//! FitMate - A console fitness planner with an interval timer
//!
//! The core is an interval timer state machine with pause/resume/reset and an
//! append-only session log, driven by an injectable clock. Around it sit a
//! profile-based plan builder, a simulated food scanner, and a terminal console.

pub mod clock;
pub mod config;
pub mod console;
pub mod errors;
pub mod plan;
pub mod scanner;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, TokioClock};
pub use config::Config;
pub use errors::{ClockError, TimerError};
pub use state::{AppState, SessionLog, SessionRecord, SessionSummary, TimerState, TimerStatus};
pub use timer::{IntervalTimer, TimerEvent, TimerSettings};
pub use utils::signals::shutdown_signal;

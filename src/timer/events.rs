//! Events emitted by the interval timer

use serde::{Deserialize, Serialize};

use crate::state::{SessionRecord, TimerState};

/// Text handed to the notifier when a run completes
pub const COMPLETION_MESSAGE: &str = "Congrats, your task is completed!";

/// Every transition of the timer produces one of these.
///
/// The presentation layer re-renders from `state`; the notifier only cares
/// about [`TimerEvent::Announce`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    Started {
        state: TimerState,
        resumed: bool,
    },
    Tick {
        state: TimerState,
        critical: bool,
    },
    Paused {
        state: TimerState,
        record: SessionRecord,
    },
    Completed {
        state: TimerState,
        elapsed_seconds: u64,
        record: SessionRecord,
    },
    Announce {
        state: TimerState,
        message: String,
    },
    Reset {
        state: TimerState,
    },
    InvalidInput {
        state: TimerState,
        reason: String,
    },
    ClockUnavailable {
        state: TimerState,
        reason: String,
    },
}

impl TimerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::Started { .. } => "started",
            TimerEvent::Tick { .. } => "tick",
            TimerEvent::Paused { .. } => "paused",
            TimerEvent::Completed { .. } => "completed",
            TimerEvent::Announce { .. } => "announce",
            TimerEvent::Reset { .. } => "reset",
            TimerEvent::InvalidInput { .. } => "invalid_input",
            TimerEvent::ClockUnavailable { .. } => "clock_unavailable",
        }
    }

    pub fn is_tick(&self) -> bool {
        matches!(self, TimerEvent::Tick { .. })
    }
}

//! Timer state structure and management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default and reset duration in seconds
pub const DEFAULT_DURATION_SECONDS: u64 = 30;

/// Remaining seconds at or below which the countdown is flagged critical
pub const CRITICAL_THRESHOLD_SECONDS: u64 = 10;

/// Lifecycle of one interval run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerStatus {
    /// Glyph shown in front of the countdown
    pub fn glyph(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "⚪",
            TimerStatus::Running => "🏃",
            TimerStatus::Paused => "😟",
            TimerStatus::Completed => "😊",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the interval timer, carried by every emitted event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub status: TimerStatus,
    pub remaining_seconds: u64,
    pub full_duration_seconds: u64,
    /// Wall-clock start of the current running segment
    pub started_at: Option<DateTime<Utc>>,
    /// Set by `pause`, cleared by every other transition; decides resume vs fresh start
    pub last_run_was_paused: bool,
}

impl TimerState {
    /// Create an idle timer loaded with the default duration
    pub fn new() -> Self {
        Self::idle(DEFAULT_DURATION_SECONDS)
    }

    /// Create an idle timer loaded with `duration_seconds`
    pub fn idle(duration_seconds: u64) -> Self {
        Self {
            status: TimerStatus::Idle,
            remaining_seconds: duration_seconds,
            full_duration_seconds: duration_seconds,
            started_at: None,
            last_run_was_paused: false,
        }
    }

    /// Check if the timer is counting down
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Seconds actually run in this plan so far
    pub fn elapsed_seconds(&self) -> u64 {
        self.full_duration_seconds.saturating_sub(self.remaining_seconds)
    }

    /// True in the last seconds of a countdown (never at zero)
    pub fn is_critical(&self) -> bool {
        self.remaining_seconds > 0 && self.remaining_seconds <= CRITICAL_THRESHOLD_SECONDS
    }

    /// Remaining time as `mm:ss`
    pub fn countdown(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_seconds / 60,
            self.remaining_seconds % 60
        )
    }

    /// Countdown prefixed with the status glyph, e.g. `🏃 00:29`
    pub fn display(&self) -> String {
        format!("{} {}", self.status.glyph(), self.countdown())
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

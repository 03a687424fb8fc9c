//! Error types for the timer core and its collaborators

use thiserror::Error;

/// Failures raised by a [`Clock`](crate::clock::Clock) implementation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClockError {
    /// No runtime is available to drive periodic callbacks
    #[error("no async runtime available to schedule ticks")]
    NoRuntime,
    /// The clock has been shut down and refuses new schedules
    #[error("clock is shut down")]
    ShutDown,
}

/// Errors surfaced by [`IntervalTimer`](crate::timer::IntervalTimer) commands
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TimerError {
    #[error("invalid duration: {reason}")]
    InvalidDuration { reason: String },

    #[error("clock unavailable: {0}")]
    ClockUnavailable(#[from] ClockError),

    #[error("timer state lock poisoned")]
    Poisoned,
}

impl TimerError {
    pub fn invalid_duration(reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            reason: reason.into(),
        }
    }
}

/// Profile validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("missing or invalid required field: {0}")]
    MissingField(&'static str),

    #[error("unknown {field}: {value}")]
    UnknownValue { field: &'static str, value: String },
}

/// Food scanner failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("please select an image to scan")]
    NoImage,
}

/// Console command parsing failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

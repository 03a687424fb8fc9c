//! Interval timer module
//!
//! The state machine lives in [`interval_timer`]; [`events`] is the contract
//! with whoever renders or announces it.

pub mod events;
pub mod interval_timer;

// Re-export main types
pub use events::{TimerEvent, COMPLETION_MESSAGE};
pub use interval_timer::{requested_seconds, IntervalTimer, TimerSettings};

//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{
    state::DEFAULT_DURATION_SECONDS,
    timer::TimerSettings,
};

/// CLI argument parsing structure
#[derive(Debug, Clone, Parser)]
#[command(name = "fitmate")]
#[command(about = "A console fitness planner with an interval timer and session log")]
#[command(version)]
pub struct Config {
    /// Initial value of the timer duration field, in minutes
    #[arg(short, long, default_value = "0.5")]
    pub minutes: String,

    /// Milliseconds between timer ticks; each tick counts as one second
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Capacity of the timer event channel
    #[arg(long, default_value = "256")]
    pub event_capacity: usize,

    /// Milliseconds the food scanner pretends to analyze an image
    #[arg(long, default_value = "2000")]
    pub scan_delay_ms: u64,

    /// Print timer events as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Do not print a line for every tick
    #[arg(short, long)]
    pub quiet_ticks: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
            default_duration_seconds: DEFAULT_DURATION_SECONDS,
            event_capacity: self.event_capacity.max(1),
        }
    }

    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }
}

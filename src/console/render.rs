//! Text rendering for the console

use chrono::{DateTime, Utc};

use crate::{
    plan::Plan,
    scanner::ScanResult,
    state::{SessionRecord, SessionSummary, TimerState},
    timer::TimerEvent,
};

pub const HELP: &str = "\
Commands:
  start [minutes]   start the timer, or resume it if the duration is unchanged
  pause             pause the running timer (logged)
  reset             stop and return to 00:30
  status            show the countdown
  log               list sessions, newest first
  stats             session totals
  plan <name> <sex> <age> <weight-kg> <height-cm> <activity> <goal> [diet]
  speak             announce the current plan
  scan <file>       pretend to scan a food photo
  help              this text
  quit              leave";

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// One line for a timer event. Announcements belong to the notifier and
/// render as nothing here.
pub fn render_event(event: &TimerEvent) -> Option<String> {
    let line = match event {
        TimerEvent::Started { state, resumed } => format!(
            "{} {}",
            state.display(),
            if *resumed { "resumed" } else { "in progress" }
        ),
        TimerEvent::Tick { state, critical } => {
            if *critical {
                format!("{} ‼", state.display())
            } else {
                state.display()
            }
        }
        TimerEvent::Paused { state, record } => format!(
            "{} paused after {} sec (session logged)",
            state.display(),
            record.duration_seconds()
        ),
        TimerEvent::Completed {
            state,
            elapsed_seconds,
            ..
        } => format!(
            "{} Timer completed! Session logged. ({} sec)",
            state.display(),
            elapsed_seconds
        ),
        TimerEvent::Announce { .. } => return None,
        TimerEvent::Reset { state } => format!("{} reset", state.display()),
        TimerEvent::InvalidInput { reason, .. } => format!(
            "Please enter a valid time in minutes (must be greater than 0): {}",
            reason
        ),
        TimerEvent::ClockUnavailable { state, reason } => {
            format!("{} timer unavailable: {}", state.display(), reason)
        }
    };
    Some(line)
}

pub fn render_status(
    state: &TimerState,
    summary: &SessionSummary,
    last_action: Option<(&str, DateTime<Utc>)>,
) -> String {
    let mut line = format!(
        "{} [{}] of {} sec • {}",
        state.display(),
        state.status,
        state.full_duration_seconds,
        render_stats(summary)
    );
    if let Some((action, at)) = last_action {
        line.push_str(&format!(" • Last action: {} at {}", action, timestamp(at)));
    }
    line
}

pub fn render_stats(summary: &SessionSummary) -> String {
    match summary {
        SessionSummary::Empty => "No sessions completed yet.".to_string(),
        SessionSummary::Recorded {
            count,
            last_started_at,
            ..
        } => format!(
            "Total sessions: {} • Last: {}",
            count,
            timestamp(*last_started_at)
        ),
    }
}

/// Log entries newest first
pub fn render_log(records: &[SessionRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec!["No sessions completed yet.".to_string()];
    }

    records
        .iter()
        .rev()
        .map(|record| {
            format!(
                "{} {}  {}  {} sec",
                record.label(),
                record.kind().mood(),
                timestamp(record.started_at()),
                record.duration_seconds()
            )
        })
        .collect()
}

pub fn render_plan(plan: &Plan) -> Vec<String> {
    let mut lines = vec![plan.greeting.clone(), plan.calories_line(), plan.bmi_line()];
    lines.extend(plan.macros.lines().iter().map(|l| format!("  {}", l)));
    lines.extend(
        plan.meals
            .iter()
            .map(|m| format!("{} (~{} kcal): {}", m.name, m.kcal, m.items.join(" • "))),
    );
    lines.extend(plan.workout.iter().map(|d| d.to_string()));
    lines
}

pub fn render_scan(result: &ScanResult) -> Vec<String> {
    vec![
        format!("{} ({})", result.name, result.calories),
        format!("  Nutrition Breakdown: {}", result.macros),
        format!("  FitMate Tip: {}", result.recommendation),
    ]
}

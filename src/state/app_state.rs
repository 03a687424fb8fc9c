//! Session context shared by the console and background tasks

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{SessionLog, TimerState};
use crate::{
    clock::Clock,
    errors::TimerError,
    plan::{Plan, Profile},
    timer::{IntervalTimer, TimerSettings},
};

/// Where an announcement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementSource {
    Timer,
    Plan,
    Scanner,
}

/// Text for the notifier to speak or display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub source: AnnouncementSource,
    pub message: String,
}

/// Everything that lives for one session: the timer, its log, and the plan
#[derive(Debug)]
pub struct AppState {
    /// Outlives every timer run; the timer holds another handle to it
    pub session_log: SessionLog,
    pub timer: IntervalTimer,
    pub plan: Arc<Mutex<Option<Plan>>>,
    clock: Arc<dyn Clock>,
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Non-timer announcements (plan summaries, scan results)
    pub announcement_tx: broadcast::Sender<Announcement>,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>, settings: TimerSettings) -> Self {
        let session_log = SessionLog::new();
        let timer = IntervalTimer::new(Arc::clone(&clock), session_log.clone(), settings);
        let (announcement_tx, _) = broadcast::channel(32);

        Self {
            session_log,
            timer,
            plan: Arc::new(Mutex::new(None)),
            clock,
            start_time: Instant::now(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            announcement_tx,
        }
    }

    pub fn start_timer(&self, minutes: f64) -> Result<TimerState, TimerError> {
        self.record_action("start");
        self.timer.start(minutes)
    }

    pub fn pause_timer(&self) -> Result<TimerState, TimerError> {
        self.record_action("pause");
        self.timer.pause()
    }

    pub fn reset_timer(&self) -> Result<TimerState, TimerError> {
        self.record_action("reset");
        self.timer.reset()
    }

    /// Build the plan for `profile` and keep it for `speak`
    pub fn set_profile(&self, profile: Profile) -> Plan {
        self.record_action("plan");
        let plan = Plan::build(&profile);
        info!("Plan built for {}: {} kcal/day", profile.name, plan.calories.target);

        *self.plan.lock().unwrap_or_else(|e| e.into_inner()) = Some(plan.clone());
        plan
    }

    pub fn current_plan(&self) -> Option<Plan> {
        self.plan.lock().ok().and_then(|p| p.clone())
    }

    /// Hand a message to the notifier
    pub fn announce(&self, source: AnnouncementSource, message: impl Into<String>) {
        let announcement = Announcement {
            source,
            message: message.into(),
        };
        if self.announcement_tx.send(announcement).is_err() {
            debug!("No notifier listening for announcements");
        }
    }

    pub fn subscribe_announcements(&self) -> broadcast::Receiver<Announcement> {
        self.announcement_tx.subscribe()
    }

    /// Calculate session uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(self.clock.now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock,
        plan::{DietPreference, Goal, Sex},
        state::TimerStatus,
    };

    fn app() -> (AppState, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (AppState::new(clock.clone(), TimerSettings::default()), clock)
    }

    #[test]
    fn log_is_shared_with_the_timer() {
        let (app, clock) = app();
        app.start_timer(1.0 / 60.0).expect("start");
        clock.advance(1);

        assert_eq!(app.timer.snapshot().status, TimerStatus::Completed);
        assert_eq!(app.session_log.len(), 1);
    }

    #[test]
    fn last_action_is_stamped_with_clock_time() {
        let (app, clock) = app();
        assert_eq!(app.get_last_action(), (None, None));

        app.start_timer(1.0).expect("start");
        clock.advance(5);
        let paused_at = clock.now();
        app.pause_timer().expect("pause");

        let (action, at) = app.get_last_action();
        assert_eq!(action.as_deref(), Some("pause"));
        assert_eq!(at, Some(paused_at));
    }

    #[test]
    fn set_profile_stores_plan() {
        let (app, _clock) = app();
        assert!(app.current_plan().is_none());

        let profile = Profile::new("Lee", Sex::Male, 45, 90.0, 182.0, 1.725, Goal::Lose, DietPreference::NonVeg)
            .expect("valid profile");
        let plan = app.set_profile(profile);
        assert_eq!(app.current_plan(), Some(plan));
    }

    #[test]
    fn announcements_reach_subscribers() {
        let (app, _clock) = app();
        let mut rx = app.subscribe_announcements();
        app.announce(AnnouncementSource::Scanner, "hello");
        let received = rx.try_recv().expect("announcement");
        assert_eq!(received.source, AnnouncementSource::Scanner);
        assert_eq!(received.message, "hello");
    }
}

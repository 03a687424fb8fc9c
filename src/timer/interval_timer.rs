//! Interval timer state machine

use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use super::events::{TimerEvent, COMPLETION_MESSAGE};
use crate::{
    clock::{Clock, TickCallback, TickHandle},
    errors::TimerError,
    state::{SessionLog, SessionRecord, TimerState, TimerStatus, DEFAULT_DURATION_SECONDS},
};

/// Longest accepted run: one day
const MAX_DURATION_SECONDS: u64 = 24 * 60 * 60;

/// Tunables for an [`IntervalTimer`]
#[derive(Debug, Clone)]
pub struct TimerSettings {
    /// Period handed to the clock; every tick counts as one second
    pub tick_interval: Duration,
    /// Duration loaded on construction and by `reset`
    pub default_duration_seconds: u64,
    /// Buffer of the event broadcast channel
    pub event_capacity: usize,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            default_duration_seconds: DEFAULT_DURATION_SECONDS,
            event_capacity: 256,
        }
    }
}

/// Convert a requested duration in minutes to whole seconds
pub fn requested_seconds(minutes: f64) -> Result<u64, TimerError> {
    if !minutes.is_finite() {
        return Err(TimerError::invalid_duration("not a valid number"));
    }
    if minutes <= 0.0 {
        return Err(TimerError::invalid_duration(
            "time in minutes must be greater than 0",
        ));
    }

    let seconds = (minutes * 60.0).round();
    if seconds < 1.0 {
        return Err(TimerError::invalid_duration("rounds to zero seconds"));
    }
    if seconds > MAX_DURATION_SECONDS as f64 {
        return Err(TimerError::invalid_duration("longer than 24 hours"));
    }
    Ok(seconds as u64)
}

struct Inner {
    state: TimerState,
    tick_source: Option<TickHandle>,
    /// Bumped whenever the tick source changes; ticks from older sources are ignored
    generation: u64,
}

struct Shared {
    clock: Arc<dyn Clock>,
    log: SessionLog,
    settings: TimerSettings,
    inner: Mutex<Inner>,
    event_tx: broadcast::Sender<TimerEvent>,
    state_tx: watch::Sender<TimerState>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = inner.tick_source.take() {
            self.clock.cancel(handle);
        }
    }
}

/// Countdown timer with pause/resume/reset that records every run into a
/// shared [`SessionLog`].
///
/// Cloning yields another handle to the same timer.
#[derive(Clone)]
pub struct IntervalTimer {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for IntervalTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalTimer")
            .field("settings", &self.shared.settings)
            .field("state", &self.snapshot())
            .finish()
    }
}

impl IntervalTimer {
    pub fn new(clock: Arc<dyn Clock>, log: SessionLog, settings: TimerSettings) -> Self {
        let initial = TimerState::idle(settings.default_duration_seconds);
        let (event_tx, _) = broadcast::channel(settings.event_capacity.max(1));
        let (state_tx, _) = watch::channel(initial.clone());

        Self {
            shared: Arc::new(Shared {
                clock,
                log,
                settings,
                inner: Mutex::new(Inner {
                    state: initial,
                    tick_source: None,
                    generation: 0,
                }),
                event_tx,
                state_tx,
            }),
        }
    }

    /// Start a run of `minutes`, or resume the paused one if the duration is unchanged
    pub fn start(&self, minutes: f64) -> Result<TimerState, TimerError> {
        let mut inner = self.lock()?;

        let requested = match requested_seconds(minutes) {
            Ok(seconds) => seconds,
            Err(e) => {
                warn!("Rejected start request of {} minutes: {}", minutes, e);
                let reason = match &e {
                    TimerError::InvalidDuration { reason } => reason.clone(),
                    other => other.to_string(),
                };
                self.emit(TimerEvent::InvalidInput {
                    state: inner.state.clone(),
                    reason,
                });
                return Err(e);
            }
        };

        let resume = inner.state.last_run_was_paused
            && inner.state.remaining_seconds > 0
            && requested == inner.state.full_duration_seconds;

        self.stop_ticking(&mut inner);

        if !resume {
            inner.state.remaining_seconds = requested;
            inner.state.full_duration_seconds = requested;
        }
        inner.state.status = TimerStatus::Running;
        inner.state.last_run_was_paused = false;
        inner.state.started_at = Some(self.shared.clock.now());

        let generation = inner.generation;
        let scheduled = self
            .shared
            .clock
            .schedule_periodic(self.shared.settings.tick_interval, self.tick_callback(generation));

        match scheduled {
            Ok(handle) => inner.tick_source = Some(handle),
            Err(e) => {
                error!("Failed to schedule timer ticks: {}", e);
                inner.generation += 1;
                inner.state = TimerState::idle(self.shared.settings.default_duration_seconds);
                self.publish(&inner.state);
                self.emit(TimerEvent::ClockUnavailable {
                    state: inner.state.clone(),
                    reason: e.to_string(),
                });
                return Err(e.into());
            }
        }

        if resume {
            info!(
                "Resuming timer with {}s of {}s remaining",
                inner.state.remaining_seconds, inner.state.full_duration_seconds
            );
        } else {
            info!("Starting timer for {}s", requested);
        }

        let snapshot = inner.state.clone();
        self.publish(&snapshot);
        self.emit(TimerEvent::Started {
            state: snapshot.clone(),
            resumed: resume,
        });
        Ok(snapshot)
    }

    /// Stop counting and log the interrupted run. No-op unless running.
    pub fn pause(&self) -> Result<TimerState, TimerError> {
        let mut inner = self.lock()?;
        if !inner.state.is_running() {
            debug!("Pause ignored, timer is {}", inner.state.status);
            return Ok(inner.state.clone());
        }

        self.stop_ticking(&mut inner);
        inner.state.status = TimerStatus::Paused;
        inner.state.last_run_was_paused = true;

        let now = self.shared.clock.now();
        let record = SessionRecord::paused(
            inner.state.started_at.unwrap_or(now),
            now,
            inner.state.elapsed_seconds(),
        );
        self.shared.log.append(record.clone());

        info!(
            "Timer paused with {}s remaining ({}s run)",
            inner.state.remaining_seconds,
            record.duration_seconds()
        );

        let snapshot = inner.state.clone();
        self.publish(&snapshot);
        self.emit(TimerEvent::Paused {
            state: snapshot.clone(),
            record,
        });
        Ok(snapshot)
    }

    /// Return to idle with the default duration
    pub fn reset(&self) -> Result<TimerState, TimerError> {
        let mut inner = self.lock()?;
        self.stop_ticking(&mut inner);
        inner.state = TimerState::idle(self.shared.settings.default_duration_seconds);

        info!("Timer reset to {}s", inner.state.full_duration_seconds);

        let snapshot = inner.state.clone();
        self.publish(&snapshot);
        self.emit(TimerEvent::Reset {
            state: snapshot.clone(),
        });
        Ok(snapshot)
    }

    /// Current timer state
    pub fn snapshot(&self) -> TimerState {
        match self.shared.inner.lock() {
            Ok(inner) => inner.state.clone(),
            Err(poisoned) => poisoned.into_inner().state.clone(),
        }
    }

    /// Subscribe to every event emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.shared.event_tx.subscribe()
    }

    /// Watch the latest state; skips intermediate values under load
    pub fn watch(&self) -> watch::Receiver<TimerState> {
        self.shared.state_tx.subscribe()
    }

    pub fn log(&self) -> &SessionLog {
        &self.shared.log
    }

    fn tick_callback(&self, generation: u64) -> TickCallback {
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        Arc::new(move || {
            if let Some(shared) = weak.upgrade() {
                IntervalTimer { shared }.on_tick(generation);
            }
        })
    }

    fn on_tick(&self, generation: u64) {
        let mut inner = match self.shared.inner.lock() {
            Ok(inner) => inner,
            Err(e) => {
                error!("Dropping tick, timer state lock poisoned: {}", e);
                return;
            }
        };

        if inner.generation != generation || !inner.state.is_running() {
            debug!("Ignoring stale tick from generation {}", generation);
            return;
        }

        inner.state.remaining_seconds = inner.state.remaining_seconds.saturating_sub(1);

        if inner.state.remaining_seconds > 0 {
            debug!("Tick: {}s remaining", inner.state.remaining_seconds);
            let snapshot = inner.state.clone();
            self.publish(&snapshot);
            self.emit(TimerEvent::Tick {
                critical: snapshot.is_critical(),
                state: snapshot,
            });
            return;
        }

        self.stop_ticking(&mut inner);
        inner.state.status = TimerStatus::Completed;
        inner.state.last_run_was_paused = false;

        let now = self.shared.clock.now();
        let started_at = inner.state.started_at.unwrap_or(now);
        let elapsed_ms = u64::try_from((now - started_at).num_milliseconds()).unwrap_or(0);
        let elapsed_seconds = (elapsed_ms + 500) / 1000;

        let record = SessionRecord::completed(started_at, now, elapsed_seconds);
        self.shared.log.append(record.clone());

        info!("Timer completed after {}s", elapsed_seconds);

        let snapshot = inner.state.clone();
        self.publish(&snapshot);
        self.emit(TimerEvent::Completed {
            state: snapshot.clone(),
            elapsed_seconds,
            record,
        });
        self.emit(TimerEvent::Announce {
            state: snapshot,
            message: COMPLETION_MESSAGE.to_string(),
        });
    }

    // Every path that leaves or re-enters Running goes through here, which keeps
    // at most one tick source alive.
    fn stop_ticking(&self, inner: &mut Inner) {
        if let Some(handle) = inner.tick_source.take() {
            self.shared.clock.cancel(handle);
        }
        inner.generation += 1;
    }

    fn publish(&self, state: &TimerState) {
        self.shared.state_tx.send_replace(state.clone());
    }

    fn emit(&self, event: TimerEvent) {
        let name = event.name();
        if self.shared.event_tx.send(event).is_err() {
            debug!("No subscribers for {} event", name);
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, TimerError> {
        self.shared.inner.lock().map_err(|e| {
            error!("Failed to lock timer state: {}", e);
            TimerError::Poisoned
        })
    }
}

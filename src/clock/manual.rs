//! Manually driven clock for headless tests

use std::{collections::BTreeMap, sync::Mutex, time::Duration};
use chrono::{DateTime, TimeZone, Utc};

use super::{Clock, TickCallback, TickHandle};
use crate::errors::ClockError;

struct ManualInner {
    now: DateTime<Utc>,
    step: Duration,
    next_id: u64,
    scheduled_total: u64,
    shut_down: bool,
    sources: BTreeMap<u64, TickCallback>,
}

/// Clock whose time only moves when a test calls [`ManualClock::advance`].
///
/// Each step moves `now()` forward by the step length and fires every live
/// source once, regardless of the interval it was scheduled with.
pub struct ManualClock {
    inner: Mutex<ManualInner>,
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ManualClock")
            .field("now", &inner.now)
            .field("step", &inner.step)
            .field("active_sources", &inner.sources.len())
            .field("shut_down", &inner.shut_down)
            .finish()
    }
}

impl ManualClock {
    /// Clock starting at 2024-01-01T08:00:00Z with one-second steps
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self::starting_at(start)
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            inner: Mutex::new(ManualInner {
                now,
                step: Duration::from_secs(1),
                next_id: 1,
                scheduled_total: 0,
                shut_down: false,
                sources: BTreeMap::new(),
            }),
        }
    }

    /// Deliver `steps` ticks, advancing time by one step before each
    pub fn advance(&self, steps: u32) {
        for _ in 0..steps {
            let due: Vec<u64> = {
                let mut inner = self.lock();
                let step = chrono::Duration::from_std(inner.step).unwrap_or_else(|_| chrono::Duration::seconds(1));
                inner.now += step;
                inner.sources.keys().copied().collect()
            };

            for id in due {
                // A callback may cancel other sources (or itself) while we iterate.
                let callback = self.lock().sources.get(&id).cloned();
                if let Some(callback) = callback {
                    callback();
                }
            }
        }
    }

    /// Move time forward without firing any source
    pub fn skew(&self, by: Duration) {
        let mut inner = self.lock();
        if let Ok(by) = chrono::Duration::from_std(by) {
            inner.now += by;
        }
    }

    /// Refuse all future schedules, simulating a host without timers
    pub fn shut_down(&self) {
        self.lock().shut_down = true;
    }

    /// Number of sources currently live
    pub fn active_sources(&self) -> usize {
        self.lock().sources.len()
    }

    /// Number of sources ever scheduled
    pub fn scheduled_total(&self) -> u64 {
        self.lock().scheduled_total
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.lock().now
    }

    fn schedule_periodic(
        &self,
        _interval: Duration,
        callback: TickCallback,
    ) -> Result<TickHandle, ClockError> {
        let mut inner = self.lock();
        if inner.shut_down {
            return Err(ClockError::ShutDown);
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.scheduled_total += 1;
        inner.sources.insert(id, callback);
        Ok(TickHandle(id))
    }

    fn cancel(&self, handle: TickHandle) {
        self.lock().sources.remove(&handle.0);
    }
}

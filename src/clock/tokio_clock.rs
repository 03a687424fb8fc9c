//! Tokio-backed clock used by the binary

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
    time::Duration,
};
use chrono::{DateTime, Utc};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, warn};

use super::{Clock, TickCallback, TickHandle};
use crate::errors::ClockError;

/// Clock that drives periodic callbacks from spawned tokio tasks.
///
/// `now()` is measured on tokio's monotonic clock from a wall-clock origin taken
/// at construction, so it advances with paused test time too.
#[derive(Debug)]
pub struct TokioClock {
    origin_wall: DateTime<Utc>,
    origin_instant: Instant,
    next_id: AtomicU64,
    tasks: Mutex<HashMap<u64, JoinHandle<()>>>,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin_wall: Utc::now(),
            origin_instant: Instant::now(),
            next_id: AtomicU64::new(1),
            tasks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of periodic callbacks currently scheduled
    pub fn active_count(&self) -> usize {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.retain(|_, task| !task.is_finished());
        tasks.len()
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = Instant::now().saturating_duration_since(self.origin_instant);
        match chrono::Duration::from_std(elapsed) {
            Ok(offset) => self.origin_wall + offset,
            Err(_) => Utc::now(),
        }
    }

    fn schedule_periodic(
        &self,
        interval: Duration,
        callback: TickCallback,
    ) -> Result<TickHandle, ClockError> {
        let runtime = Handle::try_current().map_err(|_| ClockError::NoRuntime)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let task = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        });

        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.insert(id, task);
        debug!("Scheduled periodic tick source {} every {:?}", id, interval);
        Ok(TickHandle(id))
    }

    fn cancel(&self, handle: TickHandle) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        match tasks.remove(&handle.0) {
            Some(task) => {
                task.abort();
                debug!("Cancelled tick source {}", handle.0);
            }
            None => warn!("Cancel requested for unknown tick source {}", handle.0),
        }
    }
}

impl Drop for TokioClock {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(|e| e.into_inner());
        for (_, task) in tasks.drain() {
            task.abort();
        }
    }
}

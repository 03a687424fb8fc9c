//! Clock abstraction
//!
//! The timer never sleeps on its own. It asks a [`Clock`] for the current time
//! and for a cancellable periodic callback, and treats every callback invocation
//! as exactly one elapsed unit. Swapping the clock is how the state machine is
//! driven headlessly in tests.

pub mod manual;
pub mod tokio_clock;

use std::{sync::Arc, time::Duration};
use chrono::{DateTime, Utc};

use crate::errors::ClockError;

pub use manual::ManualClock;
pub use tokio_clock::TokioClock;

/// Callback invoked once per elapsed interval
pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

/// Opaque handle identifying one scheduled periodic callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub(crate) u64);

/// Time source and periodic scheduler used by the interval timer
pub trait Clock: std::fmt::Debug + Send + Sync + 'static {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;

    /// Invoke `callback` every `interval` until the returned handle is cancelled
    fn schedule_periodic(
        &self,
        interval: Duration,
        callback: TickCallback,
    ) -> Result<TickHandle, ClockError>;

    /// Stop a scheduled callback. Cancelling an unknown handle is a no-op.
    fn cancel(&self, handle: TickHandle);
}

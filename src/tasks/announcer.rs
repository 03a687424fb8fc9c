//! Notifier background task
//!
//! Stands in for speech output: timer completions and app announcements are
//! logged and handed to a delivery callback.

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::{
    state::{Announcement, AnnouncementSource},
    timer::TimerEvent,
};

/// Background task that delivers every announcement until both channels close
pub async fn announcer_task<F>(
    mut timer_events: broadcast::Receiver<TimerEvent>,
    mut announcements: broadcast::Receiver<Announcement>,
    mut deliver: F,
) where
    F: FnMut(Announcement),
{
    info!("Starting announcer task");

    let mut timer_open = true;
    let mut app_open = true;

    while timer_open || app_open {
        tokio::select! {
            biased;

            result = timer_events.recv(), if timer_open => match result {
                Ok(TimerEvent::Announce { message, .. }) => {
                    info!("Announcing: {}", message);
                    deliver(Announcement {
                        source: AnnouncementSource::Timer,
                        message,
                    });
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Announcer skipped {} timer events", skipped);
                }
                Err(RecvError::Closed) => timer_open = false,
            },
            result = announcements.recv(), if app_open => match result {
                Ok(announcement) => {
                    info!("Announcing: {}", announcement.message);
                    deliver(announcement);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Announcer skipped {} announcements", skipped);
                }
                Err(RecvError::Closed) => app_open = false,
            },
        }
    }

    info!("Announcer task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use crate::{
        clock::ManualClock,
        state::AppState,
        timer::{TimerSettings, COMPLETION_MESSAGE},
    };

    #[tokio::test]
    async fn delivers_completion_and_app_announcements() {
        let clock = Arc::new(ManualClock::new());
        let state = AppState::new(clock.clone(), TimerSettings::default());
        let delivered = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&delivered);
        let task = tokio::spawn(announcer_task(
            state.timer.subscribe(),
            state.subscribe_announcements(),
            move |a| sink.lock().unwrap().push(a),
        ));

        state.start_timer(1.0 / 60.0).expect("start");
        clock.advance(1);
        state.announce(AnnouncementSource::Scanner, "Scan complete");

        // Dropping the state closes both channels and lets the task finish.
        drop(state);
        task.await.expect("announcer finished");

        let delivered = delivered.lock().unwrap();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].source, AnnouncementSource::Timer);
        assert_eq!(delivered[0].message, COMPLETION_MESSAGE);
        assert_eq!(delivered[1].message, "Scan complete");
    }
}

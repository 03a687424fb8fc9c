//! Timer event renderer background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info, warn};

use crate::{console::render::render_event, timer::TimerEvent};

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit each event as a JSON line instead of text
    pub json: bool,
    /// Skip per-second tick lines
    pub quiet_ticks: bool,
}

/// Render a single event according to `options`
pub fn format_event(event: &TimerEvent, options: RenderOptions) -> Option<String> {
    if options.quiet_ticks && event.is_tick() {
        return None;
    }
    if options.json {
        return match serde_json::to_string(event) {
            Ok(line) => Some(line),
            Err(e) => {
                error!("Failed to serialize {} event: {}", event.name(), e);
                None
            }
        };
    }
    render_event(event)
}

/// Background task that turns timer events into output lines
pub async fn event_renderer_task<F>(
    mut events: broadcast::Receiver<TimerEvent>,
    options: RenderOptions,
    mut output: F,
) where
    F: FnMut(String),
{
    info!("Starting timer event renderer");

    loop {
        match events.recv().await {
            Ok(event) => {
                if let Some(line) = format_event(&event, options) {
                    output(line);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Renderer fell behind, skipped {} timer events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Timer event channel closed, renderer stopping");
                break;
            }
        }
    }
}

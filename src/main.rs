//! FitMate - console fitness planner with an interval timer
//!
//! This is the main entry point for the fitmate application.

use std::sync::Arc;
use tracing::info;

use fitmate::{
    clock::TokioClock,
    config::Config,
    console::{run_console, Console},
    state::{AppState, Announcement},
    tasks::{announcer_task, event_renderer_task, RenderOptions},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("fitmate={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting fitmate v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: minutes={}, tick={}ms, json={}",
        config.minutes, config.tick_ms, config.json
    );

    // Create session state
    let clock = Arc::new(TokioClock::new());
    let state = Arc::new(AppState::new(clock, config.timer_settings()));

    // Start the event renderer and notifier before any command can fire
    let render_options = RenderOptions {
        json: config.json,
        quiet_ticks: config.quiet_ticks,
    };
    tokio::spawn(event_renderer_task(
        state.timer.subscribe(),
        render_options,
        |line| println!("{}", line),
    ));
    tokio::spawn(announcer_task(
        state.timer.subscribe(),
        state.subscribe_announcements(),
        |announcement: Announcement| println!("🔊 {}", announcement.message),
    ));

    let console = Console::new(Arc::clone(&state), config.minutes.clone(), config.scan_delay());

    tokio::select! {
        result = run_console(console) => {
            if let Err(e) = result {
                tracing::error!("Console error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.timer.reset() {
        tracing::warn!("Failed to stop timer on shutdown: {}", e);
    }
    info!(
        "Session ended after {} with {} logged sessions",
        state.get_uptime(),
        state.session_log.len()
    );
    Ok(())
}

//! Terminal presentation layer
//!
//! Reads one command per line from stdin and turns it into timer commands or
//! pull-based reads of the session log. Timer transitions are printed by the
//! event renderer task, not here.

pub mod commands;
pub mod render;

use std::{sync::Arc, time::Duration};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::{
    errors::{CommandError, TimerError},
    scanner,
    state::{AnnouncementSource, AppState},
};
use commands::{parse_minutes, Command};

/// What the console should do after a line
#[derive(Debug, Default, PartialEq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

/// Console session bound to one [`AppState`]
#[derive(Debug)]
pub struct Console {
    state: Arc<AppState>,
    /// Mirrors the duration input; `start` without an argument reuses it
    minutes_field: String,
    default_minutes: String,
    scan_delay: Duration,
}

impl Console {
    pub fn new(state: Arc<AppState>, default_minutes: impl Into<String>, scan_delay: Duration) -> Self {
        let default_minutes = default_minutes.into();
        Self {
            state,
            minutes_field: default_minutes.clone(),
            default_minutes,
            scan_delay,
        }
    }

    pub fn minutes_field(&self) -> &str {
        &self.minutes_field
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<Reply, CommandError> {
        let command: Command = line.parse()?;
        debug!("Console command: {:?}", command);

        let reply = match command {
            Command::Empty => Reply::default(),
            Command::Start(minutes) => {
                if let Some(minutes) = minutes {
                    self.minutes_field = minutes;
                }
                let result = self.state.start_timer(parse_minutes(&self.minutes_field));
                timer_reply(result)
            }
            Command::Pause => timer_reply(self.state.pause_timer()),
            Command::Reset => {
                self.minutes_field = self.default_minutes.clone();
                timer_reply(self.state.reset_timer())
            }
            Command::Status => {
                let (action, at) = self.state.get_last_action();
                let last_action = action.as_deref().zip(at);
                Reply::line(render::render_status(
                    &self.state.timer.snapshot(),
                    &self.state.session_log.summary(),
                    last_action,
                ))
            }
            Command::Log => Reply::lines(render::render_log(&self.state.session_log.all())),
            Command::Stats => Reply::line(render::render_stats(&self.state.session_log.summary())),
            Command::Plan(profile) => {
                let plan = self.state.set_profile(profile);
                Reply::lines(render::render_plan(&plan))
            }
            Command::Speak => match self.state.current_plan() {
                Some(plan) => {
                    self.state.announce(AnnouncementSource::Plan, plan.announcement());
                    Reply::default()
                }
                None => Reply::line("Please generate a plan first."),
            },
            Command::Scan(file_name) => {
                match scanner::scan(&file_name, self.scan_delay).await {
                    Ok(result) => {
                        self.state
                            .announce(AnnouncementSource::Scanner, result.voice_message.clone());
                        Reply::lines(render::render_scan(&result))
                    }
                    Err(e) => Reply::line(format!("Oops! {}", e)),
                }
            }
            Command::Help => Reply::line(render::HELP),
            Command::Quit => Reply {
                lines: Vec::new(),
                quit: true,
            },
        };
        Ok(reply)
    }
}

// Timer outcomes are reported through events; only failures with no event
// behind them need a line here.
fn timer_reply<T>(result: Result<T, TimerError>) -> Reply {
    match result {
        Ok(_) => Reply::default(),
        Err(TimerError::InvalidDuration { .. }) | Err(TimerError::ClockUnavailable(_)) => {
            Reply::default()
        }
        Err(e) => Reply::line(format!("Timer error: {}", e)),
    }
}

/// Read commands from stdin until EOF or `quit`
pub async fn run_console(mut console: Console) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", render::HELP);

    while let Some(line) = lines.next_line().await? {
        match console.handle_line(&line).await {
            Ok(reply) => {
                for out in &reply.lines {
                    println!("{}", out);
                }
                if reply.quit {
                    break;
                }
            }
            Err(e) => {
                warn!("Rejected console input {:?}: {}", line, e);
                println!("{}", e);
            }
        }
    }

    Ok(())
}

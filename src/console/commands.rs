//! Console command parsing

use std::str::FromStr;

use crate::{
    errors::CommandError,
    plan::{DietPreference, Goal, Profile, Sex},
};

pub const PLAN_USAGE: &str = "plan <name> <sex> <age> <weight-kg> <height-cm> <activity> <goal> [diet]";
pub const SCAN_USAGE: &str = "scan <image-file-name>";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start or resume; `None` reuses the duration field
    Start(Option<String>),
    Pause,
    Reset,
    Status,
    Log,
    Stats,
    Plan(Profile),
    Scan(String),
    Speak,
    Help,
    Quit,
    Empty,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Command::Empty);
        };
        let rest: Vec<&str> = words.collect();

        match head.to_lowercase().as_str() {
            "start" | "resume" => Ok(Command::Start(rest.first().map(|m| m.to_string()))),
            "pause" => Ok(Command::Pause),
            "reset" => Ok(Command::Reset),
            "status" => Ok(Command::Status),
            "log" | "logs" => Ok(Command::Log),
            "stats" => Ok(Command::Stats),
            "plan" => parse_profile(&rest).map(Command::Plan),
            "scan" => {
                if rest.is_empty() {
                    Err(CommandError::Usage(SCAN_USAGE))
                } else {
                    Ok(Command::Scan(rest.join(" ")))
                }
            }
            "speak" => Ok(Command::Speak),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_profile(args: &[&str]) -> Result<Profile, CommandError> {
    if args.len() < 7 {
        return Err(CommandError::Usage(PLAN_USAGE));
    }

    let diet = match args.get(7) {
        Some(diet) => diet.parse::<DietPreference>()?,
        None => DietPreference::default(),
    };

    let profile = Profile::new(
        args[0],
        args[1].parse::<Sex>()?,
        number("age", args[2])?,
        number("weight", args[3])?,
        number("height", args[4])?,
        number("activity", args[5])?,
        args[6].parse::<Goal>()?,
        diet,
    )?;
    Ok(profile)
}

/// Minutes typed into the duration field. Unparseable text becomes NaN so the
/// timer rejects it through its own invalid-input path.
pub fn parse_minutes(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

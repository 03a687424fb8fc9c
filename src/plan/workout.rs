//! Weekly workout suggestions

use serde::Serialize;

use super::profile::{Goal, Profile};

/// Activity factor from which a fifth training day is added
const ACTIVE_THRESHOLD: f64 = 1.55;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutDay {
    pub day: String,
    pub focus: String,
}

impl std::fmt::Display for WorkoutDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.day, self.focus)
    }
}

pub fn workout_plan(profile: &Profile) -> Vec<WorkoutDay> {
    let days = if profile.activity >= ACTIVE_THRESHOLD { 5 } else { 4 };

    let mut plan: Vec<WorkoutDay> = (1..=days)
        .map(|d| {
            let focus = match profile.goal {
                Goal::Lose => "Full-body + cardio".to_string(),
                Goal::Gain => {
                    let split = match d % 3 {
                        1 => "Push",
                        2 => "Pull",
                        _ => "Legs",
                    };
                    format!("Strength: {}", split)
                }
                Goal::Maintain => "Mixed Training".to_string(),
            };
            WorkoutDay {
                day: format!("Day {}", d),
                focus,
            }
        })
        .collect();

    plan.push(WorkoutDay {
        day: "Rest".to_string(),
        focus: "Walking + stretching".to_string(),
    });
    plan
}

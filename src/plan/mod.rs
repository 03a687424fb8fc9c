//! Fitness plan builder
//!
//! Straight-line arithmetic over a [`Profile`]: calorie targets, BMI, macros,
//! meal split and a weekly workout. Nothing here touches the timer.

pub mod nutrition;
pub mod profile;
pub mod workout;

use serde::Serialize;

pub use nutrition::{Bmi, BmiCategory, CalorieTargets, MacroSplit, Meal};
pub use profile::{DietPreference, Goal, Profile, Sex};
pub use workout::WorkoutDay;

/// Everything derived from one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub greeting: String,
    pub calories: CalorieTargets,
    pub bmi: Bmi,
    pub macros: MacroSplit,
    pub meals: Vec<Meal>,
    pub workout: Vec<WorkoutDay>,
}

impl Plan {
    pub fn build(profile: &Profile) -> Self {
        let calories = nutrition::calorie_targets(profile);
        Self {
            greeting: format!("Hi {}! Here's your personalized plan.", profile.name),
            calories,
            bmi: nutrition::bmi(profile),
            macros: nutrition::macros(profile, calories.target),
            meals: nutrition::meals(calories.target, profile.diet),
            workout: workout::workout_plan(profile),
        }
    }

    pub fn calories_line(&self) -> String {
        format!(
            "BMR: {} kcal/day • TDEE: {} kcal/day • Target: {} kcal/day",
            self.calories.bmr, self.calories.tdee, self.calories.target
        )
    }

    pub fn bmi_line(&self) -> String {
        format!("BMI: {:.1} ({})", self.bmi.value, self.bmi.category.message())
    }

    /// Spoken summary handed to the notifier
    pub fn announcement(&self) -> String {
        let workout: Vec<String> = self.workout.iter().map(|d| d.to_string()).collect();
        format!(
            "Your plan has been generated. {}. Daily Macros are: {}. Workout Plan: {}",
            self.calories_line(),
            self.macros.lines().join(", "),
            workout.join(". ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_complete_plan() {
        let profile = Profile::new("Mira", Sex::Female, 32, 64.0, 168.0, 1.375, Goal::Lose, DietPreference::Veg)
            .expect("valid profile");
        let plan = Plan::build(&profile);

        assert_eq!(plan.greeting, "Hi Mira! Here's your personalized plan.");
        assert!(plan.calories.target < plan.calories.tdee);
        assert_eq!(plan.meals.iter().map(|m| m.kcal).sum::<i64>(), plan.calories.target);
        assert_eq!(plan.workout.len(), 5);

        let spoken = plan.announcement();
        assert!(spoken.starts_with("Your plan has been generated. BMR:"));
        assert!(spoken.contains("Workout Plan: Day 1: Full-body + cardio"));
    }
}

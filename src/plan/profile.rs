//! User profile input

use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::ProfileError;

/// Activity multiplier used when none (or a non-positive one) is given
pub const SEDENTARY_ACTIVITY: f64 = 1.2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl FromStr for Sex {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(ProfileError::UnknownValue {
                field: "sex",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl FromStr for Goal {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            other => Err(ProfileError::UnknownValue {
                field: "goal",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DietPreference {
    #[default]
    NonVeg,
    Veg,
    Vegan,
}

impl FromStr for DietPreference {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "nonveg" | "non-veg" | "any" => Ok(DietPreference::NonVeg),
            "veg" | "vegetarian" => Ok(DietPreference::Veg),
            "vegan" => Ok(DietPreference::Vegan),
            other => Err(ProfileError::UnknownValue {
                field: "diet",
                value: other.to_string(),
            }),
        }
    }
}

/// Profile the planner works from. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub sex: Sex,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: f64,
    pub goal: Goal,
    pub diet: DietPreference,
}

impl Profile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        sex: Sex,
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        activity: f64,
        goal: Goal,
        diet: DietPreference,
    ) -> Result<Self, ProfileError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::MissingField("name"));
        }
        if age == 0 {
            return Err(ProfileError::MissingField("age"));
        }
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(ProfileError::MissingField("weight"));
        }
        if !(height_cm.is_finite() && height_cm > 0.0) {
            return Err(ProfileError::MissingField("height"));
        }
        let activity = if activity.is_finite() && activity > 0.0 {
            activity
        } else {
            SEDENTARY_ACTIVITY
        };

        Ok(Self {
            name: name.to_string(),
            sex,
            age,
            weight_kg,
            height_cm,
            activity,
            goal,
            diet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_fields() {
        let err = Profile::new("  ", Sex::Male, 30, 70.0, 175.0, 1.2, Goal::Maintain, DietPreference::Veg);
        assert_eq!(err, Err(ProfileError::MissingField("name")));

        let err = Profile::new("Asha", Sex::Female, 0, 60.0, 160.0, 1.2, Goal::Lose, DietPreference::Veg);
        assert_eq!(err, Err(ProfileError::MissingField("age")));

        let err = Profile::new("Asha", Sex::Female, 28, f64::NAN, 160.0, 1.2, Goal::Lose, DietPreference::Veg);
        assert_eq!(err, Err(ProfileError::MissingField("weight")));
    }

    #[test]
    fn defaults_activity_when_missing() {
        let profile = Profile::new("Ravi", Sex::Male, 40, 80.0, 180.0, 0.0, Goal::Gain, DietPreference::NonVeg)
            .expect("valid profile");
        assert_eq!(profile.activity, SEDENTARY_ACTIVITY);
    }

    #[test]
    fn parses_enum_fields() {
        assert_eq!("Male".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!("gain".parse::<Goal>(), Ok(Goal::Gain));
        assert_eq!("vegetarian".parse::<DietPreference>(), Ok(DietPreference::Veg));
        assert!("sideways".parse::<Goal>().is_err());
    }
}

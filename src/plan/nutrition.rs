//! Calorie, BMI, macro and meal targets

use serde::{Deserialize, Serialize};

use super::profile::{DietPreference, Goal, Profile, Sex};

/// Resting and daily energy figures, in kcal/day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieTargets {
    pub bmr: i64,
    pub tdee: i64,
    pub target: i64,
}

/// Mifflin-St Jeor BMR, activity-scaled TDEE and goal-adjusted target
pub fn calorie_targets(profile: &Profile) -> CalorieTargets {
    let sex_offset = match profile.sex {
        Sex::Male => 5.0,
        Sex::Female => -161.0,
    };
    let bmr = (10.0 * profile.weight_kg + 6.25 * profile.height_cm - 5.0 * f64::from(profile.age)
        + sex_offset)
        .round();
    let tdee = (bmr * profile.activity).round();
    let target = match profile.goal {
        Goal::Lose => (tdee * 0.82).round(),
        Goal::Gain => (tdee * 1.12).round(),
        Goal::Maintain => tdee,
    };

    CalorieTargets {
        bmr: bmr as i64,
        tdee: tdee as i64,
        target: target as i64,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "Underweight, calorie surplus + resistance training recommended"
            }
            BmiCategory::Normal => "Normal weight, maintain current lifestyle",
            BmiCategory::Overweight => "Overweight, calorie deficit recommended",
            BmiCategory::Obese => "Obese, consult healthcare professional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

/// Body mass index to one decimal place
pub fn bmi(profile: &Profile) -> Bmi {
    let height_m = profile.height_cm / 100.0;
    let value = (profile.weight_kg / (height_m * height_m) * 10.0).round() / 10.0;
    Bmi {
        value,
        category: BmiCategory::from_bmi(value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroSplit {
    pub protein_g: i64,
    pub protein_kcal: i64,
    pub fat_g: i64,
    pub fat_kcal: i64,
    pub carbs_g: i64,
    pub carbs_kcal: i64,
}

impl MacroSplit {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Protein: {} g (~{} kcal)", self.protein_g, self.protein_kcal),
            format!("Fat: {} g (~{} kcal)", self.fat_g, self.fat_kcal),
            format!("Carbs: {} g (~{} kcal)", self.carbs_g, self.carbs_kcal),
        ]
    }
}

/// Protein by body weight, a quarter of calories from fat, carbs take the rest
pub fn macros(profile: &Profile, target_calories: i64) -> MacroSplit {
    let protein_per_kg = if profile.goal == Goal::Gain { 1.8 } else { 1.6 };
    let protein_g = (protein_per_kg * profile.weight_kg).round() as i64;
    let protein_kcal = protein_g * 4;
    let fat_kcal = (target_calories as f64 * 0.25).round() as i64;
    let fat_g = (fat_kcal as f64 / 9.0).round() as i64;
    let carbs_kcal = target_calories - protein_kcal - fat_kcal;
    let carbs_g = (carbs_kcal as f64 / 4.0).round() as i64;

    MacroSplit {
        protein_g,
        protein_kcal,
        fat_g,
        fat_kcal,
        carbs_g,
        carbs_kcal,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meal {
    pub name: &'static str,
    pub kcal: i64,
    pub items: Vec<&'static str>,
}

/// Split the daily target across four meals; snacks absorb the rounding
pub fn meals(target_calories: i64, diet: DietPreference) -> Vec<Meal> {
    let share = |fraction: f64| (target_calories as f64 * fraction).round() as i64;
    let breakfast = share(0.25);
    let lunch = share(0.33);
    let dinner = share(0.30);
    let snacks = target_calories - breakfast - lunch - dinner;

    let (breakfast_items, lunch_protein, dinner_protein) = match diet {
        DietPreference::NonVeg => (vec!["Oats", "Milk", "Boiled egg"], "Paneer/Chicken", "Protein food"),
        DietPreference::Veg => (vec!["Oats", "Milk", "Paneer bhurji"], "Paneer", "Dal"),
        DietPreference::Vegan => (vec!["Oats", "Soy milk", "Peanut butter"], "Tofu", "Chickpeas"),
    };

    vec![
        Meal {
            name: "Breakfast",
            kcal: breakfast,
            items: breakfast_items,
        },
        Meal {
            name: "Lunch",
            kcal: lunch,
            items: vec![lunch_protein, "Rice/Roti", "Salad"],
        },
        Meal {
            name: "Dinner",
            kcal: dinner,
            items: vec![dinner_protein, "Vegetables"],
        },
        Meal {
            name: "Snacks",
            kcal: snacks,
            items: vec!["Nuts", "Fruit"],
        },
    ]
}

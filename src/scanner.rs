//! Simulated food scanner
//!
//! There is no image analysis: the file name is matched against keyword groups.

use std::time::Duration;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::ScanError;

/// Delay that stands in for the analysis step
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub name: &'static str,
    pub calories: &'static str,
    pub macros: &'static str,
    pub recommendation: &'static str,
    /// Message for the notifier to speak
    pub voice_message: String,
}

struct FoodMatch {
    keywords: &'static [&'static str],
    name: &'static str,
    calories: &'static str,
    macros: &'static str,
    recommendation: &'static str,
    voice: fn(&'static str) -> String,
}

fn apple_voice(name: &'static str) -> String {
    format!(
        "Scan complete! We detected a {}. Total calories: 95. That's a great choice for your plan!",
        name
    )
}

fn fast_food_voice(name: &'static str) -> String {
    format!(
        "Warning! We detected a {}. Estimated calories: 350. Remember to track this carefully against your goals.",
        name
    )
}

fn protein_voice(name: &'static str) -> String {
    format!(
        "Awesome! We found {}. High in protein and zero carbs. Keep up the good work!",
        name
    )
}

const FOODS: &[FoodMatch] = &[
    FoodMatch {
        keywords: &["apple", "fruit", "salad"],
        name: "Fresh Apple",
        calories: "95 kcal",
        macros: "0.5g Protein, 0.3g Fat, 25g Carbs",
        recommendation: "A perfect low-fat, high-fiber snack to fuel your next workout!",
        voice: apple_voice,
    },
    FoodMatch {
        keywords: &["burger", "pizza", "fries"],
        name: "Cheeseburger (Fast Food)",
        calories: "Approx. 350 kcal",
        macros: "20g Protein, 20g Fat, 30g Carbs",
        recommendation: "A high-fat item. Enjoy in moderation, and be sure to adjust your dinner macros!",
        voice: fast_food_voice,
    },
    FoodMatch {
        keywords: &["chicken", "paneer", "protein"],
        name: "Grilled Chicken Breast",
        calories: "Approx. 165 kcal",
        macros: "31g Protein, 3.6g Fat, 0g Carbs",
        recommendation: "Excellent source of lean protein! Ideal for muscle gain and maintenance.",
        voice: protein_voice,
    },
];

fn unidentified() -> ScanResult {
    ScanResult {
        name: "Unidentified Meal",
        calories: "Approx. 250 kcal",
        macros: "10g Protein, 10g Fat, 30g Carbs",
        recommendation: "Unsure of the contents. Track manually if possible, or try a clearer photo!",
        voice_message: "Scan complete for an unidentified meal. Please confirm the ingredients to ensure accurate tracking."
            .to_string(),
    }
}

/// Classify a file by name, first matching group wins
pub fn classify(file_name: &str) -> Result<ScanResult, ScanError> {
    let file_name = file_name.trim();
    if file_name.is_empty() {
        return Err(ScanError::NoImage);
    }

    let lowered = file_name.to_lowercase();
    let found = FOODS
        .iter()
        .find(|food| food.keywords.iter().any(|k| lowered.contains(k)));

    let result = match found {
        Some(food) => ScanResult {
            name: food.name,
            calories: food.calories,
            macros: food.macros,
            recommendation: food.recommendation,
            voice_message: (food.voice)(food.name),
        },
        None => unidentified(),
    };

    debug!("Classified {} as {}", file_name, result.name);
    Ok(result)
}

/// Classify after the simulated analysis delay
pub async fn scan(file_name: &str, delay: Duration) -> Result<ScanResult, ScanError> {
    info!("Scanning {}", file_name);
    tokio::time::sleep(delay).await;
    classify(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_keyword_groups() {
        assert_eq!(classify("Green_APPLE.jpg").map(|r| r.name), Ok("Fresh Apple"));
        assert_eq!(classify("friday-pizza.png").map(|r| r.name), Ok("Cheeseburger (Fast Food)"));
        assert_eq!(classify("paneer_tikka.jpeg").map(|r| r.name), Ok("Grilled Chicken Breast"));
        assert_eq!(classify("IMG_0042.jpg").map(|r| r.name), Ok("Unidentified Meal"));
    }

    #[test]
    fn earlier_group_wins() {
        let result = classify("chicken_salad.jpg").expect("classified");
        assert_eq!(result.name, "Fresh Apple");
        assert!(result.voice_message.contains("Total calories: 95"));
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(classify("   "), Err(ScanError::NoImage));
    }

    #[tokio::test(start_paused = true)]
    async fn scan_waits_before_answering() {
        let started = tokio::time::Instant::now();
        let result = scan("fries.jpg", DEFAULT_SCAN_DELAY).await.expect("scan");
        assert!(started.elapsed() >= DEFAULT_SCAN_DELAY);
        assert!(result.voice_message.starts_with("Warning!"));
    }
}

use serde::{Deserialize, Serialize};

/// Biometric profile. Everything is optional on the wire: the calorie
/// model degrades missing fields to defaults, and request validation only
/// insists on `goal` and `gender`.
///
/// Expected labels: goal "Lose weight" | "Maintain weight" | "Gain weight",
/// gender "Male" | "Female" | "Other", ageRange buckets like "25-34" or
/// "65+", activityLevel one of the five buckets ("Sedentary ...",
/// "Light ...", "Moderate ...", "High ...", "Extreme ...").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<String>,
}

use crate::users::profile::Profile;

const DEFAULT_AGE: f64 = 30.0;
const DEFAULT_WEIGHT_KG: f64 = 70.0;
const DEFAULT_HEIGHT_CM: f64 = 170.0;
const DEFAULT_ACTIVITY_FACTOR: f64 = 1.4;

/// Label prefix → multiplier for the five activity buckets.
const ACTIVITY_FACTORS: [(&str, f64); 5] = [
    ("Sedentary", 1.2),
    ("Light", 1.375),
    ("Moderate", 1.55),
    ("High", 1.725),
    ("Extreme", 1.9),
];

/// Daily kcal target from the profile via Mifflin-St Jeor. Missing or
/// unparsable inputs degrade to defaults, so this never fails.
pub fn daily_calorie_target(profile: &Profile) -> i32 {
    let age = approximate_age(profile.age_range.as_deref());
    let weight = profile
        .weight_kg
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(DEFAULT_WEIGHT_KG);
    let height = profile
        .height_cm
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(DEFAULT_HEIGHT_CM);

    let male = 10.0 * weight + 6.25 * height - 5.0 * age + 5.0;
    let female = male - 166.0;
    let bmr = match profile.gender.as_deref() {
        Some("Male") => male,
        Some("Female") => female,
        // "Other" or unspecified
        _ => (male + female) / 2.0,
    };

    let target = bmr
        * activity_factor(profile.activity_level.as_deref())
        * goal_factor(profile.goal.as_deref());
    target.round() as i32
}

/// "25-34" → 30, "65+" → 70, anything else → 30.
fn approximate_age(bucket: Option<&str>) -> f64 {
    let Some(bucket) = bucket.map(str::trim).filter(|b| !b.is_empty()) else {
        return DEFAULT_AGE;
    };
    if let Some(lower) = bucket.strip_suffix('+') {
        return match lower.trim().parse::<f64>() {
            Ok(lo) => lo + 5.0,
            Err(_) => DEFAULT_AGE,
        };
    }
    match bucket.split_once('-') {
        Some((lo, hi)) => match (lo.trim().parse::<f64>(), hi.trim().parse::<f64>()) {
            (Ok(lo), Ok(hi)) => ((lo + hi) / 2.0).round(),
            _ => DEFAULT_AGE,
        },
        None => DEFAULT_AGE,
    }
}

fn activity_factor(label: Option<&str>) -> f64 {
    let Some(label) = label else {
        return DEFAULT_ACTIVITY_FACTOR;
    };
    ACTIVITY_FACTORS
        .iter()
        .find(|(prefix, _)| label.starts_with(prefix))
        .map_or(DEFAULT_ACTIVITY_FACTOR, |(_, factor)| *factor)
}

fn goal_factor(goal: Option<&str>) -> f64 {
    match goal {
        Some("Lose weight") => 0.8,
        Some("Gain weight") => 1.15,
        _ => 1.0,
    }
}

use rand::{distributions::Alphanumeric, Rng};

use crate::users::profile::Profile;

const TOKEN_LEN: usize = 12;

/// Fresh random token embedded in every prompt so repeated generations for
/// the same user diverge. Never reused.
pub fn entropy_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Deterministic prompt template. No side effects, no failure mode.
pub fn build_prompt(profile: &Profile, calorie_target: i32, version: i32, entropy: &str) -> String {
    let goal = profile.goal.as_deref().unwrap_or("Maintain weight");
    let age_range = profile.age_range.as_deref().unwrap_or("unspecified");
    let gender = profile.gender.as_deref().unwrap_or("unspecified");
    let activity = profile.activity_level.as_deref().unwrap_or("unspecified");
    let height = profile
        .height_cm
        .map_or_else(|| "unspecified".into(), |h| format!("{h} cm"));
    let weight = profile
        .weight_kg
        .map_or_else(|| "unspecified".into(), |w| format!("{w} kg"));

    format!(
        "You are a nutrition planner. Create weekly menu #{version} for this person:\n\
         - Goal: {goal}\n\
         - Age range: {age_range}\n\
         - Gender: {gender}\n\
         - Height: {height}\n\
         - Weight: {weight}\n\
         - Activity level: {activity}\n\
         Daily calorie target: about {calorie_target} kcal.\n\
         \n\
         Respond with a single JSON object and nothing else - no prose, no markdown fences.\n\
         Schema:\n\
         {{\"days\": [{{\"dayIndex\": 1, \"label\": \"Day 1\", \"meals\": [{{\"type\": \"Breakfast\", \
         \"name\": \"...\", \"description\": \"...\", \"calories\": 0}}], \
         \"shoppingItems\": [{{\"product\": \"...\", \"quantity\": \"...\"}}]}}]}}\n\
         Rules: exactly 7 days; each day exactly 3 meals - one Breakfast, one Lunch and one \
         Dinner, in that order; shopping items belong to their day only; meal calories should \
         sum close to the daily target.\n\
         This is menu version {version}; make it different from any earlier version \
         (randomizer: {entropy})."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_version_token_and_target() {
        let prompt = build_prompt(&Profile::default(), 2150, 4, "Zx9Qw1");
        assert!(prompt.contains("menu #4"));
        assert!(prompt.contains("menu version 4"));
        assert!(prompt.contains("Zx9Qw1"));
        assert!(prompt.contains("2150 kcal"));
        assert!(prompt.contains("exactly 7 days"));
    }

    #[test]
    fn prompt_is_deterministic_for_fixed_inputs() {
        let p = Profile::default();
        assert_eq!(build_prompt(&p, 2000, 1, "tok"), build_prompt(&p, 2000, 1, "tok"));
    }

    #[test]
    fn entropy_tokens_are_fresh_per_call() {
        let a = entropy_token();
        let b = entropy_token();
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}

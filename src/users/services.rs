use lazy_static::lazy_static;
use regex::Regex;

use super::profile::Profile;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Fields the pipeline cannot default away. Everything else has a
/// documented calorie-model default.
pub fn validate_profile(profile: &Profile) -> Result<(), Vec<&'static str>> {
    let mut missing = Vec::new();
    if profile.goal.as_deref().map_or(true, |g| g.trim().is_empty()) {
        missing.push("goal");
    }
    if profile.gender.as_deref().map_or(true, |g| g.trim().is_empty()) {
        missing.push("gender");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

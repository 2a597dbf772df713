use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::DEFAULT_LLM_TIMEOUT_SECS;
use crate::mail::render::render_menu_text;
use crate::state::AppState;
use crate::users::profile::Profile;
use crate::users::repo::User;

use super::calories::daily_calorie_target;
use super::error::GenerationFailure;
use super::extract::extract_json;
use super::fallback::fallback_days;
use super::model::{Day, MenuRecord, NewMenu};
use super::prompt::{build_prompt, entropy_token};
use super::repo::next_version;
use super::validate::{provider_version, validate_menu};

pub const EMAIL_QUEUED: &str = "queued";
pub const EMAIL_NOT_CONFIGURED: &str = "not_configured";

/// The generation pipeline. Every internal failure (provider missing or
/// erroring, extraction, validation) degrades to the fallback menu with a
/// warning; the menu is persisted unconditionally, consuming a version.
/// Only store errors propagate.
pub async fn generate_menu(
    state: &AppState,
    user: &User,
    profile: &Profile,
) -> anyhow::Result<(MenuRecord, &'static str)> {
    let calorie_target = daily_calorie_target(profile);
    let version = next_version(state.menus.as_ref(), user.id).await?;
    let token = entropy_token();
    let prompt = build_prompt(profile, calorie_target, version, &token);

    let (days, warning) = match generated_days(state, &prompt, version).await {
        Ok(days) => (days, None),
        Err(failure) => {
            warn!(user_id = %user.id, %failure, "falling back to the sample menu");
            (fallback_days(), Some(failure.warning()))
        }
    };

    let record = state
        .menus
        .save(NewMenu {
            user_id: user.id,
            calorie_target,
            days,
            warning,
        })
        .await?;
    info!(
        user_id = %user.id,
        version = record.version,
        fallback = record.warning.is_some(),
        "menu persisted"
    );

    let email_status = dispatch_email(state, user, &record);
    Ok((record, email_status))
}

/// The provider leg: call (bounded by a timeout), extract, validate.
async fn generated_days(
    state: &AppState,
    prompt: &str,
    expected_version: i32,
) -> Result<Vec<Day>, GenerationFailure> {
    let Some(generator) = state.generator.as_ref() else {
        return Err(GenerationFailure::NotConfigured);
    };

    let timeout = Duration::from_secs(
        state
            .config
            .llm
            .as_ref()
            .map_or(DEFAULT_LLM_TIMEOUT_SECS, |c| c.timeout_secs),
    );
    let raw = tokio::time::timeout(timeout, generator.generate(prompt))
        .await
        .map_err(|_| GenerationFailure::Provider("request timed out".into()))?
        .map_err(|e| GenerationFailure::Provider(e.to_string()))?;

    let payload = extract_json(&raw)?;
    let days = validate_menu(&payload)?;

    // The sequencer's version is authoritative; a provider claiming its own
    // is only worth a log line.
    if let Some(claimed) = provider_version(&payload) {
        if claimed != i64::from(expected_version) {
            warn!(claimed, expected = expected_version, "ignoring provider-supplied version");
        }
    }

    Ok(days)
}

/// Fire-and-forget: the response never waits on SMTP, the detached task
/// logs the outcome.
fn dispatch_email(state: &AppState, user: &User, record: &MenuRecord) -> &'static str {
    let Some(mailer) = state.mailer.clone() else {
        return EMAIL_NOT_CONFIGURED;
    };

    let to = user.email.clone();
    let subject = format!("Your weekly menu (v{})", record.version);
    let body = render_menu_text(record);
    tokio::spawn(async move {
        match mailer.send(&to, &subject, &body).await {
            Ok(()) => info!(%to, "menu email sent"),
            Err(e) => error!(%to, error = %e, "menu email failed"),
        }
    });

    EMAIL_QUEUED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::TextGenerator;
    use axum::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use time::OffsetDateTime;
    use uuid::Uuid;

    struct StaticGenerator(String);

    #[async_trait]
    impl TextGenerator for StaticGenerator {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            anyhow::bail!("quota exceeded")
        }
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            profile: sqlx::types::Json(test_profile()),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    fn test_profile() -> Profile {
        Profile {
            goal: Some("Lose weight".into()),
            age_range: Some("25-34".into()),
            gender: Some("Male".into()),
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            activity_level: Some("Moderate - 1-2 hours/week".into()),
        }
    }

    fn seven_day_payload() -> String {
        let days: Vec<_> = (1..=7)
            .map(|i| {
                json!({
                    "dayIndex": i,
                    "label": format!("Day {i}"),
                    "meals": [
                        { "type": "Breakfast", "name": "A", "calories": 400 },
                        { "type": "Lunch", "name": "B", "calories": 700 },
                        { "type": "Dinner", "name": "C", "calories": 600 }
                    ],
                    "shoppingItems": [ { "product": "Thing", "quantity": "1 pc" } ]
                })
            })
            .collect();
        json!({ "days": days }).to_string()
    }

    #[tokio::test]
    async fn no_provider_persists_fallback_with_warning() {
        let state = AppState::fake();
        let user = test_user();

        let (record, email_status) = generate_menu(&state, &user, &test_profile())
            .await
            .unwrap();

        assert_eq!(record.version, 1);
        assert_eq!(record.calorie_target, 2207);
        assert_eq!(record.days, fallback_days());
        let warning = record.warning.expect("fallback carries a warning");
        assert!(warning.contains("not configured"));
        assert_eq!(email_status, EMAIL_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn provider_success_keeps_generated_days() {
        let mut state = AppState::fake();
        state.generator = Some(Arc::new(StaticGenerator(format!(
            "Sure! Here is your menu:\n```json\n{}\n```",
            seven_day_payload()
        ))));
        let user = test_user();

        let (record, _) = generate_menu(&state, &user, &test_profile())
            .await
            .unwrap();

        assert_eq!(record.days.len(), 7);
        assert!(record.warning.is_none());
    }

    #[tokio::test]
    async fn versions_increase_across_calls() {
        let mut state = AppState::fake();
        state.generator = Some(Arc::new(StaticGenerator(seven_day_payload())));
        let user = test_user();

        let (first, _) = generate_menu(&state, &user, &test_profile()).await.unwrap();
        let (second, _) = generate_menu(&state, &user, &test_profile()).await.unwrap();

        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);
    }

    #[tokio::test]
    async fn failed_generation_still_consumes_a_version() {
        let mut state = AppState::fake();
        let user = test_user();

        // First call: no provider, fallback saved as version 1.
        let (first, _) = generate_menu(&state, &user, &test_profile()).await.unwrap();
        assert_eq!(first.version, 1);

        // Provider comes back: the next menu is version 2, not a reuse of 1.
        state.generator = Some(Arc::new(StaticGenerator(seven_day_payload())));
        let (second, _) = generate_menu(&state, &user, &test_profile()).await.unwrap();
        assert_eq!(second.version, 2);
        assert!(second.warning.is_none());
    }

    #[tokio::test]
    async fn unparsable_provider_output_falls_back() {
        let mut state = AppState::fake();
        state.generator = Some(Arc::new(StaticGenerator(
            "I am sorry, I cannot produce a menu today.".into(),
        )));
        let user = test_user();

        let (record, _) = generate_menu(&state, &user, &test_profile()).await.unwrap();

        assert_eq!(record.days, fallback_days());
        assert!(record.warning.unwrap().contains("extract"));
    }

    #[tokio::test]
    async fn provider_error_falls_back() {
        let mut state = AppState::fake();
        state.generator = Some(Arc::new(FailingGenerator));
        let user = test_user();

        let (record, _) = generate_menu(&state, &user, &test_profile()).await.unwrap();

        assert_eq!(record.days, fallback_days());
        assert!(record.warning.unwrap().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn payload_without_days_falls_back() {
        let mut state = AppState::fake();
        state.generator = Some(Arc::new(StaticGenerator(
            json!({ "menu": "looks nice" }).to_string(),
        )));
        let user = test_user();

        let (record, _) = generate_menu(&state, &user, &test_profile()).await.unwrap();

        assert!(record.warning.unwrap().contains("validation"));
    }
}

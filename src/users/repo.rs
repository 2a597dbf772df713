use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::profile::Profile;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub profile: sqlx::types::Json<Profile>,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, profile, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// None means the email is already registered.
    pub async fn create(db: &PgPool, email: &str, profile: &Profile) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, profile)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, profile, created_at
            "#,
        )
        .bind(email)
        .bind(sqlx::types::Json(profile))
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// The explicit profile-update operation; None for an unknown email.
    pub async fn update_profile(
        db: &PgPool,
        email: &str,
        profile: &Profile,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET profile = $2
            WHERE email = $1
            RETURNING id, email, profile, created_at
            "#,
        )
        .bind(email)
        .bind(sqlx::types::Json(profile))
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}

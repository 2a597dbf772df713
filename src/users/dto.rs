use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::profile::Profile;
use super::repo::User;

#[derive(Debug, Deserialize)]
pub struct UpsertUserRequest {
    pub email: String,
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub email: String,
    pub profile: Profile,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            email: u.email,
            profile: u.profile.0,
            created_at: u.created_at,
        }
    }
}

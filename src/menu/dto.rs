use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::profile::Profile;

use super::model::{Day, MenuRecord};

#[derive(Debug, Deserialize)]
pub struct GenerateMenuRequest {
    pub email: String,
    /// Optional override; without it the stored profile is used.
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
pub struct MenuHistoryQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MenuHistoryResponse {
    pub versions: Vec<i32>,
}

/// Client view of a persisted menu: the owning user id stays server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub id: Uuid,
    pub version: i32,
    pub calorie_target: i32,
    pub days: Vec<Day>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub email_status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl MenuResponse {
    pub fn from_record(record: MenuRecord, email_status: &str) -> Self {
        Self {
            id: record.id,
            version: record.version,
            calorie_target: record.calorie_target,
            days: record.days,
            warning: record.warning,
            email_status: email_status.to_string(),
            created_at: record.created_at,
        }
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub const MEAL_TYPES: [&str; 3] = ["Breakfast", "Lunch", "Dinner"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub product: String,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub day_index: i32,
    pub label: String,
    pub meals: Vec<Meal>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shopping_items: Vec<ShoppingItem>,
}

/// Menu as handed to the store. The per-user version is assigned by the
/// store at insert time, atomically with the write.
#[derive(Debug, Clone)]
pub struct NewMenu {
    pub user_id: Uuid,
    pub calorie_target: i32,
    pub days: Vec<Day>,
    pub warning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MenuRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version: i32,
    pub calorie_target: i32,
    pub days: Vec<Day>,
    pub warning: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct MenuRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub version: i32,
    pub calorie_target: i32,
    pub days: sqlx::types::Json<Vec<Day>>,
    pub warning: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<MenuRow> for MenuRecord {
    fn from(r: MenuRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            version: r.version,
            calorie_target: r.calorie_target,
            days: r.days.0,
            warning: r.warning,
            created_at: r.created_at,
        }
    }
}

use serde_json::Value;

use super::error::GenerationFailure;
use super::model::{Day, Meal, ShoppingItem};

/// Shape the extracted payload into days. A missing or non-array `days` is
/// the only hard failure; every other shape issue is tolerated — present
/// fields are shaped, absent ones default.
pub fn validate_menu(payload: &Value) -> Result<Vec<Day>, GenerationFailure> {
    let days = payload
        .get("days")
        .and_then(Value::as_array)
        .ok_or_else(|| GenerationFailure::Validation("`days` is missing or not an array".into()))?;

    Ok(days
        .iter()
        .enumerate()
        .map(|(i, day)| shape_day(i, day))
        .collect())
}

/// Version number the provider claims for itself, if any. Sequencing
/// ignores it; the caller only logs a mismatch.
pub fn provider_version(payload: &Value) -> Option<i64> {
    payload.get("version").and_then(Value::as_i64)
}

fn shape_day(index: usize, value: &Value) -> Day {
    let position = i32::try_from(index).unwrap_or(i32::MAX - 1) + 1;
    Day {
        day_index: value
            .get("dayIndex")
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(position),
        label: value
            .get("label")
            .and_then(Value::as_str)
            .map_or_else(|| format!("Day {position}"), str::to_string),
        meals: value
            .get("meals")
            .and_then(Value::as_array)
            .map(|meals| meals.iter().map(shape_meal).collect())
            .unwrap_or_default(),
        shopping_items: value
            .get("shoppingItems")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(shape_item).collect())
            .unwrap_or_default(),
    }
}

fn shape_meal(value: &Value) -> Meal {
    Meal {
        meal_type: value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("Meal")
            .to_string(),
        name: value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        description: value
            .get("description")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        calories: value.get("calories").and_then(Value::as_f64),
    }
}

fn shape_item(value: &Value) -> Option<ShoppingItem> {
    let product = value.get("product").and_then(Value::as_str)?;
    Some(ShoppingItem {
        product: product.to_string(),
        quantity: value
            .get("quantity")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

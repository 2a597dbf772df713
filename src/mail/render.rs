use time::format_description::well_known::Rfc3339;

use crate::menu::model::MenuRecord;

/// Plain-text rendering of a menu for the email body.
pub fn render_menu_text(menu: &MenuRecord) -> String {
    let generated = menu
        .created_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| menu.created_at.to_string());

    let mut out = String::new();
    out.push_str("Your weekly menu\n");
    out.push_str(&format!("Version: {}\n", menu.version));
    out.push_str(&format!(
        "Daily calorie target: {} kcal\n",
        menu.calorie_target
    ));
    out.push_str(&format!("Generated: {generated}\n"));

    if let Some(warning) = &menu.warning {
        out.push_str(&format!("Note: {warning}\n"));
    }

    for day in &menu.days {
        out.push('\n');
        out.push_str(&day.label);
        out.push('\n');
        for meal in &day.meals {
            match meal.calories {
                Some(kcal) => {
                    out.push_str(&format!("{}: {} ({} kcal)\n", meal.meal_type, meal.name, kcal));
                }
                None => out.push_str(&format!("{}: {}\n", meal.meal_type, meal.name)),
            }
            if let Some(desc) = meal.description.as_deref().filter(|d| !d.is_empty()) {
                out.push_str(&format!("  {desc}\n"));
            }
        }
        if !day.shopping_items.is_empty() {
            out.push_str("Shopping list:\n");
            for item in &day.shopping_items {
                out.push_str(&format!("  - {} — {}\n", item.product, item.quantity));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::model::{Day, Meal, ShoppingItem};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample_menu() -> MenuRecord {
        MenuRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            version: 3,
            calorie_target: 2100,
            days: vec![Day {
                day_index: 1,
                label: "Day 1".into(),
                meals: vec![
                    Meal {
                        meal_type: "Breakfast".into(),
                        name: "Oatmeal".into(),
                        description: Some("With berries".into()),
                        calories: Some(350.0),
                    },
                    Meal {
                        meal_type: "Lunch".into(),
                        name: "Soup".into(),
                        description: None,
                        calories: None,
                    },
                ],
                shopping_items: vec![ShoppingItem {
                    product: "Oats".into(),
                    quantity: "500 g".into(),
                }],
            }],
            warning: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn renders_header_meals_and_shopping_list() {
        let text = render_menu_text(&sample_menu());
        assert!(text.starts_with("Your weekly menu\n"));
        assert!(text.contains("Version: 3\n"));
        assert!(text.contains("Daily calorie target: 2100 kcal\n"));
        assert!(text.contains("Generated: 1970-01-01T00:00:00Z\n"));
        assert!(text.contains("\nDay 1\n"));
        assert!(text.contains("Breakfast: Oatmeal (350 kcal)\n  With berries\n"));
        assert!(text.contains("Lunch: Soup\n"));
        assert!(text.contains("Shopping list:\n  - Oats — 500 g\n"));
    }

    #[test]
    fn warning_included_when_present() {
        let mut menu = sample_menu();
        menu.warning = Some("AI provider is not configured".into());
        let text = render_menu_text(&menu);
        assert!(text.contains("Note: AI provider is not configured\n"));
    }
}

use super::model::{Day, Meal, ShoppingItem};

/// Fixed 2-day sample menu served whenever the provider is unavailable or
/// its output cannot be used. Deterministic: no randomness, no profile
/// dependence.
pub fn fallback_days() -> Vec<Day> {
    vec![
        Day {
            day_index: 1,
            label: "Day 1".into(),
            meals: vec![
                meal("Breakfast", "Oatmeal with banana and honey", 380.0),
                meal("Lunch", "Grilled chicken with rice and vegetables", 620.0),
                meal("Dinner", "Baked salmon with potatoes and salad", 540.0),
            ],
            shopping_items: vec![
                item("Oat flakes", "100 g"),
                item("Banana", "2 pcs"),
                item("Chicken breast", "300 g"),
                item("Rice", "150 g"),
                item("Salmon fillet", "250 g"),
                item("Potatoes", "400 g"),
            ],
        },
        Day {
            day_index: 2,
            label: "Day 2".into(),
            meals: vec![
                meal("Breakfast", "Scrambled eggs with whole-grain toast", 400.0),
                meal("Lunch", "Turkey and vegetable stew", 580.0),
                meal("Dinner", "Cottage cheese with fruit", 350.0),
            ],
            shopping_items: vec![
                item("Eggs", "4 pcs"),
                item("Whole-grain bread", "4 slices"),
                item("Turkey", "300 g"),
                item("Mixed vegetables", "400 g"),
                item("Cottage cheese", "250 g"),
            ],
        },
    ]
}

fn meal(meal_type: &str, name: &str, calories: f64) -> Meal {
    Meal {
        meal_type: meal_type.into(),
        name: name.into(),
        description: None,
        calories: Some(calories),
    }
}

fn item(product: &str, quantity: &str) -> ShoppingItem {
    ShoppingItem {
        product: product.into(),
        quantity: quantity.into(),
    }
}

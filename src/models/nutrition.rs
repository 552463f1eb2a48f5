// SPDX-License-Identifier: MIT

//! Per-day nutrition log (`nutrition/{user_id}_{date}`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::lenient;
use crate::models::workout::Quantity;

/// Daily calorie target used until the user sets one for the day.
pub const DEFAULT_TARGET_CALORIES: f64 = 2000.0;

/// Meals every new day starts with.
pub const DEFAULT_MEALS: [&str; 3] = ["Breakfast", "Lunch", "Dinner"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default)]
    pub calories: Quantity,
}

/// Everything eaten on one day, grouped by meal name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionDay {
    /// Owning user
    pub user_id: String,
    /// Calendar day (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default)]
    pub meal_items: BTreeMap<String, Vec<MealItem>>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub target_calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub updated_at: String,
}

impl NutritionDay {
    /// An empty day with the default meals and no explicit target.
    pub fn empty(user_id: &str, date: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            date: date.to_string(),
            meal_items: DEFAULT_MEALS
                .iter()
                .map(|meal| (meal.to_string(), Vec::new()))
                .collect(),
            target_calories: None,
            updated_at: String::new(),
        }
    }

    pub fn effective_target(&self) -> f64 {
        self.target_calories
            .filter(|t| *t > 0.0)
            .unwrap_or(DEFAULT_TARGET_CALORIES)
    }

    /// Calories eaten across all meals; unreadable entries count as zero.
    pub fn consumed_calories(&self) -> f64 {
        self.meal_items
            .values()
            .flatten()
            .map(|item| item.calories.or_zero())
            .sum()
    }

    /// Target minus consumed; negative when over target.
    pub fn remaining_calories(&self) -> f64 {
        self.effective_target() - self.consumed_calories()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_day_defaults() {
        let day = NutritionDay::empty("u1", "2025-03-20");
        assert_eq!(day.meal_items.len(), 3);
        assert!(day.meal_items.contains_key("Lunch"));
        assert_eq!(day.effective_target(), DEFAULT_TARGET_CALORIES);
        assert_eq!(day.consumed_calories(), 0.0);
    }

    #[test]
    fn test_calorie_totals() {
        let day: NutritionDay = serde_json::from_str(
            r#"{"user_id": "u1", "date": "2025-03-20", "target_calories": "1800",
                "meal_items": {
                    "Breakfast": [{"name": "Oats", "calories": 350}],
                    "Dinner": [{"name": "Rice", "calories": "600"}, {"name": "?", "calories": "lots"}]
                }}"#,
        )
        .unwrap();

        assert_eq!(day.effective_target(), 1800.0);
        assert_eq!(day.consumed_calories(), 950.0);
        assert_eq!(day.remaining_calories(), 850.0);
    }
}

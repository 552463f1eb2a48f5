// SPDX-License-Identifier: MIT

//! User profile document for storage and API.

use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Streak goal used when the user never set one.
pub const DEFAULT_STREAK_GOAL: u32 = 7;

/// User profile stored in Firestore (`users/{user_id}`).
///
/// Only the fields this service reads are modelled; writes go through
/// field masks so the rest of the document is left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Identity provider user ID (also used as document ID)
    #[serde(default)]
    pub user_id: String,
    /// Target streak length in days
    #[serde(default, deserialize_with = "lenient::whole_number")]
    pub streak_goal: Option<i64>,
    /// Latest body weight (kg)
    #[serde(default, deserialize_with = "lenient::number")]
    pub body_weight: Option<f64>,
    /// Calories burned figure shown on the progress view
    #[serde(default, deserialize_with = "lenient::number")]
    pub calories_burned: Option<f64>,
    /// Last update timestamp (RFC3339)
    #[serde(default, deserialize_with = "lenient::text")]
    pub updated_at: String,
}

impl UserProfile {
    /// Stored goal if it is usable, otherwise the default.
    pub fn effective_streak_goal(&self) -> u32 {
        self.streak_goal
            .filter(|g| *g >= 1)
            .and_then(|g| u32::try_from(g).ok())
            .unwrap_or(DEFAULT_STREAK_GOAL)
    }
}

/// Field names used in partial profile updates.
pub mod fields {
    pub const STREAK_GOAL: &str = "streak_goal";
    pub const BODY_WEIGHT: &str = "body_weight";
    pub const CALORIES_BURNED: &str = "calories_burned";
    pub const UPDATED_AT: &str = "updated_at";
    pub const USER_ID: &str = "user_id";
}

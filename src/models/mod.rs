// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod date_set;
pub mod exercise_log;
pub mod lenient;
pub mod measurement;
pub mod nutrition;
pub mod progress;
pub mod user;
pub mod workout;

pub use date_set::DateSet;
pub use exercise_log::ExerciseLog;
pub use measurement::{BodyMeasurements, Measurement};
pub use nutrition::{MealItem, NutritionDay};
pub use progress::ProgressSummary;
pub use user::UserProfile;
pub use workout::{ExerciseEntry, Quantity, WorkoutRecord};

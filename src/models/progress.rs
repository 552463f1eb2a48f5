// SPDX-License-Identifier: MIT

//! Progress view returned to the presenter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::services::calendar::MonthCalendar;

/// Everything the progress screen renders, recomputed on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressSummary {
    /// The user's local date the view was computed for
    pub today: NaiveDate,
    /// Consecutive workout days ending today or yesterday
    pub current_streak: u32,
    pub streak_goal: u32,
    /// `current_streak / streak_goal`, clamped to `[0, 1]`
    pub goal_progress: f64,
    /// Sets × reps × weight over the trailing week
    pub volume_last_7_days: f64,
    /// Distinct workout days shown in the calendar window
    pub workout_days: u32,
    pub body_weight: Option<f64>,
    pub calories_burned: Option<f64>,
    /// Rolling three-month dot calendar, oldest month first
    pub calendar: Vec<MonthCalendar>,
    /// False when any source could not be fetched and was treated as empty
    pub data_available: bool,
}

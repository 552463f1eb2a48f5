// SPDX-License-Identifier: MIT

//! Daily nutrition log.
//!
//! One document per user and day. The key includes the user ID, so two
//! users logging the same date never share a document.

use chrono::{NaiveDate, Utc};

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::NutritionDay;
use crate::time_utils::{format_calendar_date, format_utc_rfc3339};

/// Document ID of a user's log for `date`.
pub fn nutrition_doc_id(user_id: &str, date: NaiveDate) -> String {
    format!("{}_{}", user_id, format_calendar_date(date))
}

/// The stored log for `date`, or an empty day with default meals.
pub async fn get_day(db: &FirestoreDb, user_id: &str, date: NaiveDate) -> Result<NutritionDay> {
    let doc_id = nutrition_doc_id(user_id, date);
    match db.get_nutrition_day(&doc_id).await? {
        Some(day) if day.user_id == user_id => Ok(day),
        Some(_) => {
            tracing::warn!(user_id, doc_id = %doc_id, "Nutrition log owned by another user");
            Err(AppError::NotFound(format!(
                "Nutrition log for {} not found",
                format_calendar_date(date)
            )))
        }
        None => Ok(NutritionDay::empty(user_id, &format_calendar_date(date))),
    }
}

/// Replace the log for `date` (last write wins).
pub async fn save_day(
    db: &FirestoreDb,
    user_id: &str,
    date: NaiveDate,
    mut day: NutritionDay,
) -> Result<NutritionDay> {
    day.user_id = user_id.to_string();
    day.date = format_calendar_date(date);
    day.updated_at = format_utc_rfc3339(Utc::now());

    db.set_nutrition_day(&nutrition_doc_id(user_id, date), &day)
        .await?;
    tracing::info!(
        user_id,
        date = %day.date,
        consumed = day.consumed_calories(),
        "Nutrition log saved"
    );
    Ok(day)
}

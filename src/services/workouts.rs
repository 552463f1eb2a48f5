// SPDX-License-Identifier: MIT

//! Workout plan and exercise log operations.
//!
//! Plans are owned exclusively by their author; every read-modify-write
//! first checks `user_id`, and foreign plans look the same as missing ones.

use chrono::{DateTime, NaiveDate, Utc};

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{ExerciseEntry, ExerciseLog, WorkoutRecord};
use crate::time_utils::format_utc_rfc3339;

pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Build a new, not yet performed workout plan.
pub fn new_workout(
    user_id: &str,
    workout_name: &str,
    exercises: Vec<ExerciseEntry>,
    now: DateTime<Utc>,
) -> WorkoutRecord {
    WorkoutRecord {
        id: new_document_id(),
        user_id: user_id.to_string(),
        workout_name: workout_name.trim().to_string(),
        exercises,
        completion_dates: Vec::new(),
        completed: false,
        created_at: format_utc_rfc3339(now),
    }
}

/// Build a new exercise log entry stamped with `now`.
pub fn new_exercise_log(user_id: &str, entry: ExerciseEntry, now: DateTime<Utc>) -> ExerciseLog {
    ExerciseLog {
        id: new_document_id(),
        user_id: user_id.to_string(),
        name: entry.name.trim().to_string(),
        sets: entry.sets,
        reps: entry.reps,
        weight: entry.weight,
        created_at: format_utc_rfc3339(now),
    }
}

/// Fetch a plan and make sure it belongs to `user_id`.
pub async fn get_owned_workout(
    db: &FirestoreDb,
    user_id: &str,
    workout_id: &str,
) -> Result<WorkoutRecord> {
    let not_found = || AppError::NotFound(format!("Workout {} not found", workout_id));

    let workout = db.get_workout(workout_id).await?.ok_or_else(not_found)?;
    if workout.user_id != user_id {
        tracing::warn!(
            user_id,
            workout_id,
            "Attempt to access another user's workout"
        );
        return Err(not_found());
    }
    Ok(workout)
}

/// Mark a plan as performed on `date`.
///
/// Fetch-modify-write without a transaction: concurrent completions from
/// several devices resolve last-write-wins. A day already recorded is not
/// written again.
pub async fn complete_workout(
    db: &FirestoreDb,
    user_id: &str,
    workout_id: &str,
    date: NaiveDate,
) -> Result<WorkoutRecord> {
    let mut workout = get_owned_workout(db, user_id, workout_id).await?;

    if workout.add_completion(date) {
        db.set_workout(&workout).await?;
        tracing::info!(user_id, workout_id, %date, "Workout completion recorded");
    } else {
        tracing::debug!(user_id, workout_id, %date, "Completion already recorded for day");
    }

    Ok(workout)
}

/// Delete a plan owned by `user_id`.
pub async fn delete_workout(db: &FirestoreDb, user_id: &str, workout_id: &str) -> Result<()> {
    get_owned_workout(db, user_id, workout_id).await?;
    db.delete_workout(workout_id).await?;
    tracing::info!(user_id, workout_id, "Workout deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_workout_starts_uncompleted() {
        let now = Utc.with_ymd_and_hms(2025, 3, 21, 9, 0, 0).unwrap();
        let workout = new_workout("u1", "  Upper body ", vec![], now);

        assert_eq!(workout.user_id, "u1");
        assert_eq!(workout.workout_name, "Upper body");
        assert!(!workout.completed);
        assert!(workout.completion_dates.is_empty());
        assert_eq!(workout.created_at, "2025-03-21T09:00:00Z");
        assert_eq!(workout.id.len(), 32);
    }

    #[test]
    fn test_new_exercise_log_ids_are_unique() {
        let now = Utc::now();
        let a = new_exercise_log("u1", ExerciseEntry::default(), now);
        let b = new_exercise_log("u1", ExerciseEntry::default(), now);
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_offline_completion_surfaces_database_error() {
        let db = FirestoreDb::new_mock();
        let date = NaiveDate::from_ymd_opt(2025, 3, 21).unwrap();
        let err = complete_workout(&db, "u1", "w1", date).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}

// SPDX-License-Identifier: MIT

//! Single exercise log entry (`exercises/{id}`).

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::lenient;
use crate::models::workout::{ExerciseEntry, Quantity};
use crate::time_utils::{local_date, parse_utc_rfc3339};

/// An exercise logged on its own, outside any workout plan.
///
/// Its occurrence date is the local calendar date of `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Document ID
    pub id: String,
    /// Owning user
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sets: Quantity,
    #[serde(default)]
    pub reps: Quantity,
    #[serde(default)]
    pub weight: Quantity,
    /// When the exercise was logged (RFC3339, `Z` suffix)
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
}

impl ExerciseLog {
    /// Local calendar date this exercise was performed on.
    pub fn occurred_on(&self, offset: FixedOffset) -> Option<NaiveDate> {
        parse_utc_rfc3339(&self.created_at).map(|ts| local_date(ts, offset))
    }

    pub fn as_entry(&self) -> ExerciseEntry {
        ExerciseEntry {
            name: self.name.clone(),
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
        }
    }

    pub fn volume(&self) -> f64 {
        self.as_entry().volume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_at(created_at: &str) -> ExerciseLog {
        ExerciseLog {
            id: "e1".to_string(),
            user_id: "u1".to_string(),
            name: "Deadlift".to_string(),
            sets: 5u32.into(),
            reps: 5u32.into(),
            weight: Quantity::new(100.0),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_occurred_on_uses_local_calendar() {
        let log = log_at("2025-03-20T23:30:00Z");
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_one = FixedOffset::east_opt(3600).unwrap();

        assert_eq!(log.occurred_on(utc), NaiveDate::from_ymd_opt(2025, 3, 20));
        assert_eq!(log.occurred_on(plus_one), NaiveDate::from_ymd_opt(2025, 3, 21));
    }

    #[test]
    fn test_occurred_on_invalid_timestamp() {
        let log = log_at("yesterday-ish");
        assert_eq!(log.occurred_on(FixedOffset::east_opt(0).unwrap()), None);
    }

    #[test]
    fn test_missing_or_mistyped_timestamp_is_skippable() {
        let logs: Vec<ExerciseLog> = serde_json::from_str(
            r#"[
                {"id": "a", "user_id": "u1", "name": "Row", "sets": 3, "reps": 8, "weight": 40},
                {"id": "b", "user_id": "u1", "created_at": 1742551200},
                {"id": "c", "user_id": "u1", "created_at": "2025-03-20T10:00:00Z"}
            ]"#,
        )
        .unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();

        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].occurred_on(utc), None);
        assert_eq!(logs[1].occurred_on(utc), None);
        assert_eq!(
            logs[2].occurred_on(utc),
            NaiveDate::from_ymd_opt(2025, 3, 20)
        );
    }

    #[test]
    fn test_volume() {
        assert_eq!(log_at("2025-03-20T10:00:00Z").volume(), 2500.0);
    }
}

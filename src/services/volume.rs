// SPDX-License-Identifier: MIT

//! Training volume over a window of local calendar days.

use chrono::{Days, FixedOffset, NaiveDate};

use crate::models::{ExerciseLog, WorkoutRecord};

/// Length of the trailing volume window in days.
pub const VOLUME_WINDOW_DAYS: u64 = 7;

/// Half-open range of calendar days `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Trailing window anchored at local midnight seven days ago, through the
/// end of today.
pub fn trailing_week(today: NaiveDate) -> DateWindow {
    let start = today
        .checked_sub_days(Days::new(VOLUME_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let end = today.succ_opt().unwrap_or(NaiveDate::MAX);
    DateWindow::new(start, end)
}

/// Volume result with a count of entries that had unusable numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolumeTotal {
    pub volume: f64,
    pub malformed_entries: usize,
}

/// Sum sets × reps × weight over everything performed inside `window`.
///
/// Workout plans contribute once per completion day inside the window.
/// Exercise logs contribute when their local creation date is inside it.
/// Missing or non-numeric fields count as zero.
pub fn sum_volume(
    workouts: &[WorkoutRecord],
    logs: &[ExerciseLog],
    window: DateWindow,
    offset: FixedOffset,
) -> VolumeTotal {
    let mut total = VolumeTotal::default();

    for workout in workouts {
        let sessions = workout
            .completion_days()
            .into_iter()
            .filter(|day| window.contains(*day))
            .count();
        if sessions == 0 {
            continue;
        }
        for entry in &workout.exercises {
            if entry.is_malformed() {
                total.malformed_entries += 1;
            }
            total.volume += entry.volume() * sessions as f64;
        }
    }

    for log in logs {
        let in_window = log.occurred_on(offset).is_some_and(|day| window.contains(day));
        if !in_window {
            continue;
        }
        if log.as_entry().is_malformed() {
            total.malformed_entries += 1;
        }
        total.volume += log.volume();
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseEntry, Quantity};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(sets: f64, reps: f64, weight: f64) -> ExerciseEntry {
        ExerciseEntry {
            name: "Lift".to_string(),
            sets: sets.into(),
            reps: reps.into(),
            weight: weight.into(),
        }
    }

    fn workout(exercises: Vec<ExerciseEntry>, dates: &[&str]) -> WorkoutRecord {
        WorkoutRecord {
            id: "w".to_string(),
            user_id: "u".to_string(),
            workout_name: "Plan".to_string(),
            exercises,
            completion_dates: dates.iter().map(|d| d.to_string()).collect(),
            completed: !dates.is_empty(),
            created_at: String::new(),
        }
    }

    fn log(sets: Quantity, reps: Quantity, weight: Quantity, created_at: &str) -> ExerciseLog {
        ExerciseLog {
            id: "e".to_string(),
            user_id: "u".to_string(),
            name: "Curl".to_string(),
            sets,
            reps,
            weight,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_trailing_week_bounds() {
        let window = trailing_week(date(2025, 3, 21));
        assert_eq!(window.start, date(2025, 3, 14));
        assert_eq!(window.end, date(2025, 3, 22));
        assert!(window.contains(date(2025, 3, 14)));
        assert!(window.contains(date(2025, 3, 21)));
        assert!(!window.contains(date(2025, 3, 13)));
        assert!(!window.contains(date(2025, 3, 22)));
    }

    #[test]
    fn test_sum_volume_basic() {
        let plan = workout(
            vec![entry(3.0, 10.0, 20.0), entry(4.0, 8.0, 0.0)],
            &["2025-03-20"],
        );
        let total = sum_volume(&[plan], &[], trailing_week(date(2025, 3, 21)), utc());
        assert_eq!(total.volume, 600.0);
        assert_eq!(total.malformed_entries, 0);
    }

    #[test]
    fn test_each_completion_in_window_counts() {
        let plan = workout(
            vec![entry(3.0, 10.0, 20.0)],
            &["2025-03-10", "2025-03-15", "2025-03-21"],
        );
        let total = sum_volume(&[plan], &[], trailing_week(date(2025, 3, 21)), utc());
        assert_eq!(total.volume, 1200.0);
    }

    #[test]
    fn test_plans_outside_window_ignored() {
        let plan = workout(vec![entry(3.0, 10.0, 20.0)], &["2025-03-01"]);
        let never = workout(vec![entry(3.0, 10.0, 20.0)], &[]);
        let total = sum_volume(&[plan, never], &[], trailing_week(date(2025, 3, 21)), utc());
        assert_eq!(total.volume, 0.0);
    }

    #[test]
    fn test_malformed_entries_count_zero_without_aborting() {
        let plan = workout(
            vec![
                ExerciseEntry {
                    name: "Broken".to_string(),
                    sets: Quantity::missing(),
                    reps: 10u32.into(),
                    weight: Quantity::new(50.0),
                },
                entry(2.0, 5.0, 10.0),
            ],
            &["2025-03-19"],
        );
        let logs = vec![
            log(
                Quantity::missing(),
                Quantity::missing(),
                Quantity::missing(),
                "2025-03-20T08:00:00Z",
            ),
            log(3u32.into(), 12u32.into(), Quantity::new(15.0), "2025-03-20T09:00:00Z"),
        ];

        let total = sum_volume(&[plan], &logs, trailing_week(date(2025, 3, 21)), utc());
        assert_eq!(total.volume, 100.0 + 540.0);
        assert_eq!(total.malformed_entries, 2);
    }

    #[test]
    fn test_logs_use_local_date() {
        // 2025-03-13T23:30Z is already the 14th in UTC+1, inside the window.
        let late = log(1u32.into(), 1u32.into(), Quantity::new(100.0), "2025-03-13T23:30:00Z");
        let window = trailing_week(date(2025, 3, 21));

        assert_eq!(sum_volume(&[], &[late.clone()], window, utc()).volume, 0.0);
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(sum_volume(&[], &[late], window, plus_one).volume, 100.0);
    }

    #[test]
    fn test_unparseable_log_timestamp_is_skipped() {
        let broken = log(1u32.into(), 1u32.into(), Quantity::new(1.0), "sometime");
        let total = sum_volume(&[], &[broken], trailing_week(date(2025, 3, 21)), utc());
        assert_eq!(total, VolumeTotal::default());
    }
}

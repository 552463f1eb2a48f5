// SPDX-License-Identifier: MIT

//! Progress assembly.
//!
//! Handles the core workflow:
//! 1. Fetch workouts, exercise logs and the profile concurrently
//! 2. Normalize every occurrence to a local calendar date
//! 3. Compute streak, rolling calendar and trailing-week volume
//! 4. Combine the streak with the stored goal
//!
//! Nothing here is cached; each call starts from the store.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::db::FirestoreDb;
use crate::models::user::DEFAULT_STREAK_GOAL;
use crate::models::{DateSet, ExerciseLog, ProgressSummary, UserProfile, WorkoutRecord};
use crate::services::calendar::{build_rolling_calendar, rolling_months};
use crate::services::goal::progress_ratio;
use crate::services::streak::compute_streak;
use crate::services::volume::{sum_volume, trailing_week};
use crate::time_utils::local_today;

/// Raw inputs for one progress computation.
#[derive(Debug, Clone, Default)]
pub struct ProgressSources {
    pub workouts: Vec<WorkoutRecord>,
    pub exercise_logs: Vec<ExerciseLog>,
    pub profile: Option<UserProfile>,
    /// False when any fetch failed and was replaced by empty input.
    pub complete: bool,
}

/// Every day with a completed workout or a logged exercise.
pub fn collect_workout_dates(
    workouts: &[WorkoutRecord],
    logs: &[ExerciseLog],
    offset: FixedOffset,
) -> DateSet {
    let mut dates = DateSet::new();

    for workout in workouts {
        for raw in workout.invalid_completion_dates() {
            tracing::warn!(
                workout_id = %workout.id,
                value = raw,
                "Skipping unparseable completion date"
            );
        }
        dates.extend(workout.completion_days());
    }

    for log in logs {
        match log.occurred_on(offset) {
            Some(day) => {
                dates.insert(day);
            }
            None => tracing::warn!(
                exercise_id = %log.id,
                created_at = %log.created_at,
                "Skipping exercise log with unparseable timestamp"
            ),
        }
    }

    dates
}

/// Compute the progress view from already-fetched sources.
pub fn build_progress(
    sources: &ProgressSources,
    today: NaiveDate,
    offset: FixedOffset,
) -> ProgressSummary {
    let dates = collect_workout_dates(&sources.workouts, &sources.exercise_logs, offset);

    let current_streak = compute_streak(&dates, today);
    let streak_goal = sources
        .profile
        .as_ref()
        .map(UserProfile::effective_streak_goal)
        .unwrap_or(DEFAULT_STREAK_GOAL);

    let volume = sum_volume(
        &sources.workouts,
        &sources.exercise_logs,
        trailing_week(today),
        offset,
    );
    if volume.malformed_entries > 0 {
        tracing::debug!(
            malformed = volume.malformed_entries,
            "Exercise entries with non-numeric volume fields counted as zero"
        );
    }

    let window_start = rolling_months(today)
        .first()
        .map(|m| m.first_day())
        .unwrap_or(today);
    let window_end = today.succ_opt().unwrap_or(today);
    let workout_days = dates.count_in_range(window_start, window_end) as u32;

    ProgressSummary {
        today,
        current_streak,
        streak_goal,
        goal_progress: progress_ratio(current_streak, streak_goal),
        volume_last_7_days: volume.volume,
        workout_days,
        body_weight: sources.profile.as_ref().and_then(|p| p.body_weight),
        calories_burned: sources.profile.as_ref().and_then(|p| p.calories_burned),
        calendar: build_rolling_calendar(today, &dates),
        data_available: sources.complete,
    }
}

/// Loads progress sources from Firestore and builds the view.
#[derive(Clone)]
pub struct ProgressService {
    db: FirestoreDb,
}

impl ProgressService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Fetch all sources for a user concurrently.
    ///
    /// A failed fetch is logged and replaced with empty input; this never errors.
    pub async fn load_sources(&self, user_id: &str) -> ProgressSources {
        let (workouts, logs, profile) = tokio::join!(
            self.db.list_workouts_for_user(user_id),
            self.db.list_exercise_logs_for_user(user_id, None),
            self.db.get_user_profile(user_id),
        );

        let mut complete = true;

        let workouts = workouts.unwrap_or_else(|e| {
            tracing::warn!(user_id, error = %e, "Failed to fetch workouts, treating as empty");
            complete = false;
            Vec::new()
        });
        let exercise_logs = logs.unwrap_or_else(|e| {
            tracing::warn!(user_id, error = %e, "Failed to fetch exercise logs, treating as empty");
            complete = false;
            Vec::new()
        });
        let profile = profile.unwrap_or_else(|e| {
            tracing::warn!(user_id, error = %e, "Failed to fetch profile, using defaults");
            complete = false;
            None
        });

        ProgressSources {
            workouts,
            exercise_logs,
            profile,
            complete,
        }
    }

    /// Progress view for `user_id` as of `now` in the user's offset.
    pub async fn summary(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
        offset: FixedOffset,
    ) -> ProgressSummary {
        let sources = self.load_sources(user_id).await;
        let today = local_today(now, offset);
        let summary = build_progress(&sources, today, offset);

        tracing::debug!(
            user_id,
            %today,
            workouts = sources.workouts.len(),
            exercise_logs = sources.exercise_logs.len(),
            streak = summary.current_streak,
            volume = summary.volume_last_7_days,
            data_available = summary.data_available,
            "Computed progress"
        );

        summary
    }
}

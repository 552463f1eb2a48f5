// SPDX-License-Identifier: MIT

//! Workout plan and exercise log routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ExerciseEntry, ExerciseLog, Quantity, WorkoutRecord};
use crate::routes::api::{resolve_date, resolve_offset};
use crate::services::workouts;
use crate::time_utils::local_day_bounds_utc;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/{id}", delete(delete_workout))
        .route("/api/workouts/{id}/complete", post(complete_workout))
        .route("/api/exercises", get(list_exercises).post(log_exercise))
}

// ─── Request bodies ──────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ExerciseInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 100))]
    pub sets: u32,
    #[validate(range(min = 1, max = 1000))]
    pub reps: u32,
    #[validate(range(min = 0.0, max = 2000.0))]
    #[serde(default)]
    pub weight: f64,
}

impl From<ExerciseInput> for ExerciseEntry {
    fn from(input: ExerciseInput) -> Self {
        ExerciseEntry {
            name: input.name.trim().to_string(),
            sets: input.sets.into(),
            reps: input.reps.into(),
            weight: Quantity::new(input.weight),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    #[validate(length(min = 1, max = 100))]
    pub workout_name: String,
    #[validate(length(max = 50), nested)]
    #[serde(default)]
    pub exercises: Vec<ExerciseInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
    pub tz_offset_minutes: Option<String>,
}

// ─── Responses ───────────────────────────────────────────────

/// A workout plan as shown to its owner.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutResponse {
    pub id: String,
    pub workout_name: String,
    pub exercises: Vec<ExerciseView>,
    pub completion_dates: Vec<String>,
    pub completed: bool,
    pub created_at: String,
    /// Volume of a single performance of the plan
    pub session_volume: f64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseView {
    pub name: String,
    pub sets: Option<f64>,
    pub reps: Option<f64>,
    pub weight: Option<f64>,
}

impl From<&ExerciseEntry> for ExerciseView {
    fn from(entry: &ExerciseEntry) -> Self {
        ExerciseView {
            name: entry.name.clone(),
            sets: entry.sets.value(),
            reps: entry.reps.value(),
            weight: entry.weight.value(),
        }
    }
}

impl From<WorkoutRecord> for WorkoutResponse {
    fn from(workout: WorkoutRecord) -> Self {
        WorkoutResponse {
            session_volume: workout.session_volume(),
            exercises: workout.exercises.iter().map(ExerciseView::from).collect(),
            id: workout.id,
            workout_name: workout.workout_name,
            completion_dates: workout.completion_dates,
            completed: workout.completed,
            created_at: workout.created_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseLogResponse {
    pub id: String,
    #[serde(flatten)]
    pub exercise: ExerciseView,
    pub created_at: String,
    pub volume: f64,
}

impl From<ExerciseLog> for ExerciseLogResponse {
    fn from(log: ExerciseLog) -> Self {
        ExerciseLogResponse {
            exercise: ExerciseView::from(&log.as_entry()),
            volume: log.volume(),
            id: log.id,
            created_at: log.created_at,
        }
    }
}

/// Calendar day detail.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayExercisesResponse {
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseLogResponse>,
    pub total_volume: f64,
}

// ─── Workout plans ───────────────────────────────────────────

async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WorkoutResponse>>> {
    let workouts = state.db.list_workouts_for_user(&user.user_id).await?;
    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<WorkoutResponse>)> {
    request.validate()?;

    let exercises: Vec<ExerciseEntry> = request
        .exercises
        .into_iter()
        .map(ExerciseEntry::from)
        .collect();
    let workout =
        workouts::new_workout(&user.user_id, &request.workout_name, exercises, Utc::now());
    if workout.workout_name.is_empty() {
        return Err(AppError::BadRequest(
            "workout_name must not be blank".to_string(),
        ));
    }

    state.db.set_workout(&workout).await?;
    tracing::info!(
        user_id = %user.user_id,
        workout_id = %workout.id,
        exercises = workout.exercises.len(),
        "Workout saved"
    );

    Ok((StatusCode::CREATED, Json(workout.into())))
}

/// Mark a plan as performed. `date` defaults to the caller's local today.
async fn complete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
    Query(query): Query<DayQuery>,
) -> Result<Json<WorkoutResponse>> {
    let offset = resolve_offset(query.tz_offset_minutes.as_deref(), &state.config)?;
    let date = resolve_date(query.date.as_deref(), offset)?;

    let workout = workouts::complete_workout(&state.db, &user.user_id, &workout_id, date).await?;
    Ok(Json(workout.into()))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<StatusCode> {
    workouts::delete_workout(&state.db, &user.user_id, &workout_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Exercise logs ───────────────────────────────────────────

async fn log_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<ExerciseInput>,
) -> Result<(StatusCode, Json<ExerciseLogResponse>)> {
    request.validate()?;

    let log = workouts::new_exercise_log(&user.user_id, request.into(), Utc::now());
    state.db.add_exercise_log(&log).await?;
    tracing::info!(
        user_id = %user.user_id,
        exercise_id = %log.id,
        "Exercise logged"
    );

    Ok((StatusCode::CREATED, Json(log.into())))
}

/// Exercises logged on one local calendar day.
async fn list_exercises(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayExercisesResponse>> {
    let offset = resolve_offset(query.tz_offset_minutes.as_deref(), &state.config)?;
    let date = resolve_date(query.date.as_deref(), offset)?;
    let (start, end) = local_day_bounds_utc(date, offset)
        .ok_or_else(|| AppError::BadRequest(format!("Date out of range: {date}")))?;

    let logs = state
        .db
        .list_exercise_logs_between(&user.user_id, start, end)
        .await?;
    let total_volume = logs.iter().map(ExerciseLog::volume).sum();

    Ok(Json(DayExercisesResponse {
        date,
        exercises: logs.into_iter().map(ExerciseLogResponse::from).collect(),
        total_volume,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, sets: u32, reps: u32, weight: f64) -> ExerciseInput {
        ExerciseInput {
            name: name.to_string(),
            sets,
            reps,
            weight,
        }
    }

    #[test]
    fn test_exercise_input_validation() {
        assert!(input("Bench", 3, 10, 60.0).validate().is_ok());
        assert!(input("", 3, 10, 60.0).validate().is_err());
        assert!(input("Bench", 0, 10, 60.0).validate().is_err());
        assert!(input("Bench", 3, 10, -5.0).validate().is_err());
    }

    #[test]
    fn test_nested_exercises_are_validated() {
        let request = CreateWorkoutRequest {
            workout_name: "Push".to_string(),
            exercises: vec![input("Bench", 3, 10, 60.0), input("Dips", 0, 10, 0.0)],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_too_many_exercises_rejected() {
        let request = CreateWorkoutRequest {
            workout_name: "Everything".to_string(),
            exercises: (0..51).map(|i| input(&format!("Move {i}"), 3, 10, 0.0)).collect(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("exercises"));

        let request = CreateWorkoutRequest {
            workout_name: "Enough".to_string(),
            exercises: (0..50).map(|i| input(&format!("Move {i}"), 3, 10, 0.0)).collect(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_workout_response_carries_session_volume() {
        let exercises: Vec<ExerciseEntry> = vec![input(" Squat ", 3, 10, 100.0).into()];
        let workout = workouts::new_workout("u1", "Legs", exercises, Utc::now());
        let response = WorkoutResponse::from(workout);

        assert_eq!(response.session_volume, 3000.0);
        assert_eq!(response.exercises[0].name, "Squat");
        assert!(!response.completed);
    }

    #[test]
    fn test_malformed_stored_fields_render_as_null() {
        let entry = ExerciseEntry {
            name: "Plank".to_string(),
            sets: 3u32.into(),
            reps: Quantity::missing(),
            weight: Quantity::missing(),
        };
        let view = ExerciseView::from(&entry);
        assert_eq!(view.sets, Some(3.0));
        assert_eq!(view.reps, None);
    }
}

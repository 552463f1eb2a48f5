// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - User profiles (streak goal, body stats)
//! - Workouts (saved plans and their completion dates)
//! - Exercises (single logged exercises)
//! - Measurements (dated body measurements)
//! - Nutrition (one meal log per user and day)
//!
//! Every query filters by `user_id`; no operation reads across users.

use chrono::{DateTime, Utc};

use crate::db::collections;
use crate::error::AppError;
use crate::models::user::fields;
use crate::models::{ExerciseLog, Measurement, NutritionDay, UserProfile, WorkoutRecord};
use crate::time_utils::format_utc_rfc3339;

/// Firestore database client.
///
/// Constructed once at startup and shared through `AppState`.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator takes an unauthenticated connection; skip credential lookup.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Profile Operations ─────────────────────────────────

    /// Get a user's profile document.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Write only the listed profile fields, leaving the rest of the document as is.
    ///
    /// Creates the document if it does not exist yet. Concurrent writers
    /// follow last-write-wins.
    pub async fn update_user_profile_fields(
        &self,
        user_id: &str,
        profile: &UserProfile,
        field_paths: &[&str],
    ) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .fields(field_paths.iter().copied())
            .in_col(collections::USERS)
            .document_id(user_id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Persist a new streak goal.
    pub async fn set_streak_goal(&self, user_id: &str, goal: u32) -> Result<(), AppError> {
        let profile = UserProfile {
            user_id: user_id.to_string(),
            streak_goal: Some(i64::from(goal)),
            updated_at: format_utc_rfc3339(Utc::now()),
            ..Default::default()
        };
        self.update_user_profile_fields(
            user_id,
            &profile,
            &[fields::USER_ID, fields::STREAK_GOAL, fields::UPDATED_AT],
        )
        .await
    }

    /// Update body weight and/or calories burned. `None` fields are untouched.
    pub async fn update_body_stats(
        &self,
        user_id: &str,
        body_weight: Option<f64>,
        calories_burned: Option<f64>,
    ) -> Result<(), AppError> {
        let mut field_paths = vec![fields::USER_ID, fields::UPDATED_AT];
        if body_weight.is_some() {
            field_paths.push(fields::BODY_WEIGHT);
        }
        if calories_burned.is_some() {
            field_paths.push(fields::CALORIES_BURNED);
        }

        let profile = UserProfile {
            user_id: user_id.to_string(),
            body_weight,
            calories_burned,
            updated_at: format_utc_rfc3339(Utc::now()),
            ..Default::default()
        };
        self.update_user_profile_fields(user_id, &profile, &field_paths)
            .await
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Get a workout plan by document ID.
    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<WorkoutRecord>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .obj()
            .one(workout_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All workout plans owned by a user, oldest first.
    pub async fn list_workouts_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<WorkoutRecord>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::WORKOUTS)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .order_by([("created_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or overwrite a workout plan.
    pub async fn set_workout(&self, workout: &WorkoutRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(&workout.id)
            .object(workout)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a workout plan.
    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::WORKOUTS)
            .document_id(workout_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Exercise Log Operations ─────────────────────────────────

    /// Store a logged exercise.
    pub async fn add_exercise_log(&self, log: &ExerciseLog) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::EXERCISES)
            .document_id(&log.id)
            .object(log)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Exercises logged by a user, optionally only those at or after `since`.
    pub async fn list_exercise_logs_for_user(
        &self,
        user_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ExerciseLog>, AppError> {
        let user_id = user_id.to_string();
        let since = since.map(format_utc_rfc3339);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::EXERCISES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    since
                        .clone()
                        .and_then(|s| q.field("created_at").greater_than_or_equal(s)),
                ])
            })
            .order_by([("created_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Exercises logged by a user in `[start, end)`.
    pub async fn list_exercise_logs_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ExerciseLog>, AppError> {
        let user_id = user_id.to_string();
        let start = format_utc_rfc3339(start);
        let end = format_utc_rfc3339(end);

        self.get_client()?
            .fluent()
            .select()
            .from(collections::EXERCISES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("created_at").greater_than_or_equal(start.clone()),
                    q.field("created_at").less_than(end.clone()),
                ])
            })
            .order_by([("created_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Measurement Operations ──────────────────────────────────

    /// Get a measurement by document ID.
    pub async fn get_measurement(
        &self,
        measurement_id: &str,
    ) -> Result<Option<Measurement>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MEASUREMENTS)
            .obj()
            .one(measurement_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All measurements of a user, newest first.
    pub async fn list_measurements_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Measurement>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::MEASUREMENTS)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store a new measurement.
    pub async fn add_measurement(&self, measurement: &Measurement) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MEASUREMENTS)
            .document_id(&measurement.id)
            .object(measurement)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a measurement.
    pub async fn delete_measurement(&self, measurement_id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::MEASUREMENTS)
            .document_id(measurement_id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Nutrition Operations ────────────────────────────────────

    /// Get a nutrition log by document ID.
    pub async fn get_nutrition_day(&self, doc_id: &str) -> Result<Option<NutritionDay>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::NUTRITION)
            .obj()
            .one(doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or replace a nutrition log.
    pub async fn set_nutrition_day(&self, doc_id: &str, day: &NutritionDay) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::NUTRITION)
            .document_id(doc_id)
            .object(day)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

// SPDX-License-Identifier: MIT

//! API routes for authenticated users: progress, streak goal and profile.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::ProgressSummary;
use crate::services::goal;
use crate::time_utils::{local_today, parse_calendar_date, utc_offset};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::{FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress", get(get_progress))
        .route("/api/goal", get(get_goal).put(put_goal))
        .route("/api/me", get(get_me).patch(patch_me))
}

// ─── Query helpers ───────────────────────────────────────────

/// Local calendar of the caller.
///
/// Taken as a raw string so malformed values produce our JSON error body.
#[derive(Debug, Default, Deserialize)]
pub struct OffsetQuery {
    pub tz_offset_minutes: Option<String>,
}

/// Resolve the caller's UTC offset, falling back to the configured default.
pub(crate) fn resolve_offset(raw: Option<&str>, config: &Config) -> Result<FixedOffset> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(config.default_offset()),
        Some(raw) => raw
            .parse::<i32>()
            .ok()
            .and_then(utc_offset)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Invalid 'tz_offset_minutes' parameter: {raw} (expected minutes within ±840)"
                ))
            }),
    }
}

/// Resolve a `date` parameter, defaulting to the caller's local today.
pub(crate) fn resolve_date(raw: Option<&str>, offset: FixedOffset) -> Result<NaiveDate> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(local_today(Utc::now(), offset)),
        Some(raw) => parse_calendar_date(raw).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid 'date' parameter: {raw} (expected YYYY-MM-DD)"
            ))
        }),
    }
}

// ─── Progress ────────────────────────────────────────────────

/// Progress view: streak, goal, rolling calendar and weekly volume.
///
/// Never fails on store errors; unavailable sources show up as
/// `data_available: false` with zeroed figures.
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<OffsetQuery>,
) -> Result<Json<ProgressSummary>> {
    let offset = resolve_offset(query.tz_offset_minutes.as_deref(), &state.config)?;
    let summary = state
        .progress_service
        .summary(&user.user_id, Utc::now(), offset)
        .await;
    Ok(Json(summary))
}

// ─── Streak Goal ─────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalResponse {
    pub streak_goal: u32,
}

/// Goal edit body. The value is validated by hand so that strings from a
/// text field and bad numbers all map to `invalid_goal`.
#[derive(Deserialize)]
pub struct SetGoalRequest {
    #[serde(default)]
    pub streak_goal: serde_json::Value,
}

async fn get_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<GoalResponse>> {
    let streak_goal = goal::get_goal(&state.db, &user.user_id).await?;
    Ok(Json(GoalResponse { streak_goal }))
}

async fn put_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<SetGoalRequest>,
) -> Result<Json<GoalResponse>> {
    let streak_goal = goal::set_goal(&state.db, &user.user_id, &request.streak_goal).await?;
    Ok(Json(GoalResponse { streak_goal }))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub user_id: String,
    pub streak_goal: u32,
    pub body_weight: Option<f64>,
    pub calories_burned: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(range(min = 0.0, max = 1000.0))]
    pub body_weight: Option<f64>,
    #[validate(range(min = 0.0, max = 100000.0))]
    pub calories_burned: Option<f64>,
}

async fn load_profile(state: &AppState, user_id: &str) -> Result<ProfileResponse> {
    let profile = state.db.get_user_profile(user_id).await?.unwrap_or_default();
    Ok(ProfileResponse {
        user_id: user_id.to_string(),
        streak_goal: profile.effective_streak_goal(),
        body_weight: profile.body_weight,
        calories_burned: profile.calories_burned,
    })
}

/// Get current user profile. A user with no profile document gets defaults.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    Ok(Json(load_profile(&state, &user.user_id).await?))
}

async fn patch_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    request.validate()?;
    if request.body_weight.is_none() && request.calories_burned.is_none() {
        return Err(AppError::BadRequest(
            "Nothing to update: send body_weight and/or calories_burned".to_string(),
        ));
    }

    state
        .db
        .update_body_stats(&user.user_id, request.body_weight, request.calories_burned)
        .await?;
    tracing::info!(user_id = %user.user_id, "Body stats updated");

    Ok(Json(load_profile(&state, &user.user_id).await?))
}

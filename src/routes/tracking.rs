// SPDX-License-Identifier: MIT

//! Body measurement and nutrition log routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{BodyMeasurements, MealItem, Measurement, NutritionDay, Quantity};
use crate::routes::api::{resolve_date, resolve_offset};
use crate::routes::workouts::DayQuery;
use crate::services::{measurements, nutrition};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/measurements",
            get(list_measurements).post(add_measurement),
        )
        .route("/api/measurements/{id}", delete(delete_measurement))
        .route("/api/nutrition", get(get_nutrition).put(put_nutrition))
}

const MAX_MEALS: usize = 10;
const MAX_ITEMS_PER_MEAL: usize = 100;

// ─── Measurements ────────────────────────────────────────────

/// New measurement. `date` defaults to the caller's local today.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct MeasurementRequest {
    pub date: Option<String>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub chest: Option<f64>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub waist: Option<f64>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub hip: Option<f64>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub shoulder: Option<f64>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub thigh: Option<f64>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub calf: Option<f64>,
}

impl MeasurementRequest {
    fn body_measurements(&self) -> BodyMeasurements {
        let q = |v: Option<f64>| v.map(Quantity::new).unwrap_or_default();
        BodyMeasurements {
            chest: q(self.chest),
            waist: q(self.waist),
            hip: q(self.hip),
            shoulder: q(self.shoulder),
            thigh: q(self.thigh),
            calf: q(self.calf),
        }
    }
}

/// Measurement as shown in the history list (centimetres).
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeasurementResponse {
    pub id: String,
    pub date: String,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub shoulder: Option<f64>,
    pub thigh: Option<f64>,
    pub calf: Option<f64>,
}

impl From<Measurement> for MeasurementResponse {
    fn from(m: Measurement) -> Self {
        MeasurementResponse {
            id: m.id,
            date: m.date,
            chest: m.data.chest.value(),
            waist: m.data.waist.value(),
            hip: m.data.hip.value(),
            shoulder: m.data.shoulder.value(),
            thigh: m.data.thigh.value(),
            calf: m.data.calf.value(),
        }
    }
}

/// Measurement history, newest first.
async fn list_measurements(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MeasurementResponse>>> {
    let history = state.db.list_measurements_for_user(&user.user_id).await?;
    Ok(Json(
        history.into_iter().map(MeasurementResponse::from).collect(),
    ))
}

async fn add_measurement(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<DayQuery>,
    Json(request): Json<MeasurementRequest>,
) -> Result<(StatusCode, Json<MeasurementResponse>)> {
    request.validate()?;
    let offset = resolve_offset(query.tz_offset_minutes.as_deref(), &state.config)?;
    let date = resolve_date(request.date.as_deref(), offset)?;

    let measurement = measurements::record_measurement(
        &state.db,
        &user.user_id,
        date,
        request.body_measurements(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(measurement.into())))
}

async fn delete_measurement(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(measurement_id): Path<String>,
) -> Result<StatusCode> {
    measurements::delete_measurement(&state.db, &user.user_id, &measurement_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Nutrition ───────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct MealItemInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub calories: f64,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NutritionRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_meals"))]
    pub meal_items: BTreeMap<String, Vec<MealItemInput>>,
    #[validate(range(min = 1.0, max = 20000.0))]
    pub target_calories: Option<f64>,
}

fn validate_meals(
    meals: &BTreeMap<String, Vec<MealItemInput>>,
) -> std::result::Result<(), ValidationError> {
    if meals.len() > MAX_MEALS {
        return Err(ValidationError::new("too_many_meals"));
    }
    for (meal, items) in meals {
        if meal.trim().is_empty() || meal.len() > 50 {
            return Err(ValidationError::new("invalid_meal_name"));
        }
        if items.len() > MAX_ITEMS_PER_MEAL {
            return Err(ValidationError::new("too_many_items"));
        }
        if items.iter().any(|item| item.validate().is_err()) {
            return Err(ValidationError::new("invalid_meal_item"));
        }
    }
    Ok(())
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealItemView {
    pub name: String,
    pub calories: Option<f64>,
}

/// One day of meals with calorie totals.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NutritionResponse {
    pub date: String,
    pub meal_items: BTreeMap<String, Vec<MealItemView>>,
    pub target_calories: f64,
    pub consumed_calories: f64,
    pub remaining_calories: f64,
}

impl From<NutritionDay> for NutritionResponse {
    fn from(day: NutritionDay) -> Self {
        NutritionResponse {
            target_calories: day.effective_target(),
            consumed_calories: day.consumed_calories(),
            remaining_calories: day.remaining_calories(),
            meal_items: day
                .meal_items
                .into_iter()
                .map(|(meal, items)| {
                    let items = items
                        .into_iter()
                        .map(|item| MealItemView {
                            name: item.name,
                            calories: item.calories.value(),
                        })
                        .collect();
                    (meal, items)
                })
                .collect(),
            date: day.date,
        }
    }
}

async fn get_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<DayQuery>,
) -> Result<Json<NutritionResponse>> {
    let offset = resolve_offset(query.tz_offset_minutes.as_deref(), &state.config)?;
    let date = resolve_date(query.date.as_deref(), offset)?;

    let day = nutrition::get_day(&state.db, &user.user_id, date).await?;
    Ok(Json(day.into()))
}

async fn put_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<DayQuery>,
    Json(request): Json<NutritionRequest>,
) -> Result<Json<NutritionResponse>> {
    request.validate()?;
    let offset = resolve_offset(query.tz_offset_minutes.as_deref(), &state.config)?;
    let date = resolve_date(query.date.as_deref(), offset)?;

    let mut day = NutritionDay::empty(&user.user_id, "");
    day.target_calories = request.target_calories;
    let meals = request
        .meal_items
        .into_iter()
        .map(|(meal, items)| {
            let items = items
                .into_iter()
                .map(|item| MealItem {
                    name: item.name.trim().to_string(),
                    calories: Quantity::new(item.calories),
                })
                .collect();
            (meal.trim().to_string(), items)
        });
    day.meal_items.extend(meals);

    let saved = nutrition::save_day(&state.db, &user.user_id, date, day).await?;
    Ok(Json(saved.into()))
}

// SPDX-License-Identifier: MIT

//! API input validation tests.
//!
//! Every case here must be rejected before the store is touched, so the
//! offline mock database is enough.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn status_of(method: &str, uri: &str, body: Option<serde_json::Value>) -> StatusCode {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    app.oneshot(common::authed_request(method, uri, &token, body))
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_invalid_completion_date() {
    let status = status_of("POST", "/api/workouts/w1/complete?date=2025-13-01", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = status_of("POST", "/api/workouts/w1/complete?date=21-03-2025", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_day_query() {
    let status = status_of("GET", "/api/exercises?date=yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = status_of("GET", "/api/exercises?tz_offset_minutes=east", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workout_name_required() {
    let status = status_of(
        "POST",
        "/api/workouts",
        Some(json!({ "workout_name": "", "exercises": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = status_of(
        "POST",
        "/api/workouts",
        Some(json!({ "workout_name": "   ", "exercises": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_workout_name_too_long() {
    let status = status_of(
        "POST",
        "/api/workouts",
        Some(json!({ "workout_name": "a".repeat(101) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nested_exercise_rejected() {
    let status = status_of(
        "POST",
        "/api/workouts",
        Some(json!({
            "workout_name": "Push",
            "exercises": [
                { "name": "Bench", "sets": 3, "reps": 10, "weight": 60 },
                { "name": "Dips", "sets": 0, "reps": 10 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_weight_rejected() {
    let status = status_of(
        "POST",
        "/api/exercises",
        Some(json!({ "name": "Row", "sets": 3, "reps": 8, "weight": -20 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_profile_patch_rejected() {
    let status = status_of("PATCH", "/api/me", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = status_of("PATCH", "/api/me", Some(json!({ "body_weight": -70 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_measurement_input_rejected() {
    let status = status_of("POST", "/api/measurements", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = status_of("POST", "/api/measurements", Some(json!({ "waist": -1.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = status_of(
        "POST",
        "/api/measurements",
        Some(json!({ "date": "2025-02-30", "waist": 80.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nutrition_input_rejected() {
    let status = status_of("GET", "/api/nutrition?date=today", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = status_of(
        "PUT",
        "/api/nutrition",
        Some(json!({ "meal_items": { "Lunch": [{ "name": "Soup", "calories": -50.0 }] } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = status_of(
        "PUT",
        "/api/nutrition",
        Some(json!({ "meal_items": {}, "target_calories": 0.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_valid_workout_reaches_store() {
    let status = status_of(
        "POST",
        "/api/workouts",
        Some(json!({
            "workout_name": "Push",
            "exercises": [{ "name": "Bench", "sets": 3, "reps": 10, "weight": 60 }]
        })),
    )
    .await;
    // Offline store
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

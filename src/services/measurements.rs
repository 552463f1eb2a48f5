// SPDX-License-Identifier: MIT

//! Body measurement history.
//!
//! Same ownership rule as workout plans: a measurement belonging to another
//! user is reported as missing.

use chrono::{DateTime, NaiveDate, Utc};

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{BodyMeasurements, Measurement};
use crate::services::workouts::new_document_id;
use crate::time_utils::{format_calendar_date, format_utc_rfc3339};

/// Build a new measurement taken on `date`.
pub fn new_measurement(
    user_id: &str,
    date: NaiveDate,
    data: BodyMeasurements,
    now: DateTime<Utc>,
) -> Measurement {
    Measurement {
        id: new_document_id(),
        user_id: user_id.to_string(),
        date: format_calendar_date(date),
        data,
        created_at: format_utc_rfc3339(now),
    }
}

/// Validate and store a measurement. At least one value is required.
pub async fn record_measurement(
    db: &FirestoreDb,
    user_id: &str,
    date: NaiveDate,
    data: BodyMeasurements,
) -> Result<Measurement> {
    if data.is_empty() {
        return Err(AppError::BadRequest(
            "At least one measurement is required".to_string(),
        ));
    }

    let measurement = new_measurement(user_id, date, data, Utc::now());
    db.add_measurement(&measurement).await?;
    tracing::info!(
        user_id,
        measurement_id = %measurement.id,
        date = %measurement.date,
        "Measurement recorded"
    );
    Ok(measurement)
}

/// Delete a measurement owned by `user_id`.
pub async fn delete_measurement(
    db: &FirestoreDb,
    user_id: &str,
    measurement_id: &str,
) -> Result<()> {
    let not_found = || AppError::NotFound(format!("Measurement {} not found", measurement_id));

    let measurement = db
        .get_measurement(measurement_id)
        .await?
        .ok_or_else(not_found)?;
    if measurement.user_id != user_id {
        tracing::warn!(
            user_id,
            measurement_id,
            "Attempt to delete another user's measurement"
        );
        return Err(not_found());
    }

    db.delete_measurement(measurement_id).await?;
    tracing::info!(user_id, measurement_id, "Measurement deleted");
    Ok(())
}

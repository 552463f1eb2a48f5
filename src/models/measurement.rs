// SPDX-License-Identifier: MIT

//! Body measurement records (`measurements/{id}`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::lenient;
use crate::models::workout::Quantity;
use crate::time_utils::parse_calendar_date;

/// Circumferences in centimetres. Stored under the keys the mobile app
/// writes (`Chest`, `Waist`, ...); values entered as text read leniently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BodyMeasurements {
    #[serde(default)]
    pub chest: Quantity,
    #[serde(default)]
    pub waist: Quantity,
    #[serde(default)]
    pub hip: Quantity,
    #[serde(default)]
    pub shoulder: Quantity,
    #[serde(default)]
    pub thigh: Quantity,
    #[serde(default)]
    pub calf: Quantity,
}

impl BodyMeasurements {
    /// True when no circumference was recorded.
    pub fn is_empty(&self) -> bool {
        [
            self.chest,
            self.waist,
            self.hip,
            self.shoulder,
            self.thigh,
            self.calf,
        ]
        .iter()
        .all(|q| q.is_missing())
    }
}

/// One dated set of body measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    /// Document ID
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Day the measurements were taken (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default)]
    pub data: BodyMeasurements,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
}

impl Measurement {
    pub fn taken_on(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_app_document_with_text_values() {
        let m: Measurement = serde_json::from_str(
            r#"{"id": "m1", "user_id": "u1", "date": "2025-03-20",
                "data": {"Chest": "98", "Waist": "81.5", "Hip": "", "Shoulder": "112",
                         "Thigh": 56, "Calf": null}}"#,
        )
        .unwrap();

        assert_eq!(m.taken_on(), NaiveDate::from_ymd_opt(2025, 3, 20));
        assert_eq!(m.data.chest.value(), Some(98.0));
        assert_eq!(m.data.waist.value(), Some(81.5));
        assert!(m.data.hip.is_missing());
        assert_eq!(m.data.thigh.value(), Some(56.0));
        assert!(m.data.calf.is_missing());
        assert!(!m.data.is_empty());
    }

    #[test]
    fn test_serializes_with_app_keys() {
        let data = BodyMeasurements {
            waist: Quantity::new(80.0),
            ..Default::default()
        };
        let json = serde_json::to_value(data).unwrap();
        assert_eq!(json["Waist"], 80);
        assert!(json["Chest"].is_null());
        assert!(BodyMeasurements::default().is_empty());
    }
}

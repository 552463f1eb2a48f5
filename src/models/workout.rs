// SPDX-License-Identifier: MIT

//! Workout plan and exercise models for storage and API.

use chrono::NaiveDate;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::lenient;
use crate::time_utils::{format_calendar_date, parse_calendar_date};

/// A numeric field read leniently from stored documents.
///
/// Older clients wrote `sets`/`reps`/`weight` as form strings, and some
/// documents lack them entirely. Anything that is not a finite number (or a
/// numeric string) is carried as missing instead of failing the whole record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quantity(Option<f64>);

impl Quantity {
    pub fn new(value: f64) -> Self {
        Self(Some(value).filter(|v| v.is_finite()))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_missing(self) -> bool {
        self.0.is_none()
    }

    pub fn or_zero(self) -> f64 {
        self.0.unwrap_or(0.0)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::new(f64::from(value))
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            // Whole numbers go back out as integers so sets/reps stay ints in Firestore.
            Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(v as i64)
            }
            Some(v) => serializer.serialize_f64(v),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a numeric string, or anything else (treated as missing)")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        Ok(Quantity::new(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        Ok(Quantity::new(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
        Ok(Quantity::new(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Quantity, E> {
        Ok(v.trim()
            .parse::<f64>()
            .map(Quantity::new)
            .unwrap_or_default())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Quantity, E> {
        Ok(Quantity::missing())
    }

    fn visit_none<E: de::Error>(self) -> Result<Quantity, E> {
        Ok(Quantity::missing())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Quantity, E> {
        Ok(Quantity::missing())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Quantity, D::Error> {
        Quantity::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Quantity, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Quantity::missing())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Quantity, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Quantity::missing())
    }
}

/// One exercise inside a workout plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sets: Quantity,
    #[serde(default)]
    pub reps: Quantity,
    #[serde(default)]
    pub weight: Quantity,
}

impl ExerciseEntry {
    /// Training volume: sets × reps × weight, missing fields count as zero.
    pub fn volume(&self) -> f64 {
        self.sets.or_zero() * self.reps.or_zero() * self.weight.or_zero()
    }

    /// True when any of the volume fields is missing or non-numeric.
    pub fn is_malformed(&self) -> bool {
        self.sets.is_missing() || self.reps.is_missing() || self.weight.is_missing()
    }
}

/// Stored workout plan in Firestore (`workouts/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Document ID
    pub id: String,
    /// Owning user (immutable)
    pub user_id: String,
    #[serde(default)]
    pub workout_name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
    /// Days this plan was performed (`YYYY-MM-DD`), append-only
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub completion_dates: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    /// When the plan was saved (RFC3339)
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: String,
}

impl WorkoutRecord {
    /// Distinct, valid completion days. Unparseable strings are dropped.
    pub fn completion_days(&self) -> BTreeSet<NaiveDate> {
        self.completion_dates
            .iter()
            .filter_map(|raw| parse_calendar_date(raw))
            .collect()
    }

    /// Completion strings that do not parse as calendar dates.
    pub fn invalid_completion_dates(&self) -> impl Iterator<Item = &str> {
        self.completion_dates
            .iter()
            .map(String::as_str)
            .filter(|raw| parse_calendar_date(raw).is_none())
    }

    /// Record a completion on `date`.
    ///
    /// Returns `false` when the day was already recorded.
    pub fn add_completion(&mut self, date: NaiveDate) -> bool {
        if self.completion_days().contains(&date) {
            self.completed = true;
            return false;
        }
        self.completion_dates.push(format_calendar_date(date));
        self.completed = true;
        true
    }

    /// Volume of one performance of this plan.
    pub fn session_volume(&self) -> f64 {
        self.exercises.iter().map(ExerciseEntry::volume).sum()
    }
}

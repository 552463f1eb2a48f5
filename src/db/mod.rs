// SPDX-License-Identifier: MIT

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// User profile documents (keyed by user_id)
    pub const USERS: &str = "users";
    /// Saved workout plans with their completion dates
    pub const WORKOUTS: &str = "workouts";
    /// Individually logged exercises
    pub const EXERCISES: &str = "exercises";
    /// Dated body measurements
    pub const MEASUREMENTS: &str = "measurements";
    /// One nutrition log per user and day (keyed `{user_id}_{date}`)
    pub const NUTRITION: &str = "nutrition";
}

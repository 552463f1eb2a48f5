// SPDX-License-Identifier: MIT

//! Workout Tracker: progress backend for a mobile fitness app
//!
//! This crate serves workout streaks, rolling dot-calendars and weekly
//! training volume computed from workout plans and exercise logs stored in
//! Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::ProgressService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub progress_service: ProgressService,
}

impl AppState {
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let progress_service = ProgressService::new(db.clone());
        Self {
            config,
            db,
            progress_service,
        }
    }
}

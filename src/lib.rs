// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity-Stats: analytics over a user's logged activities
//!
//! This crate turns a user's activity log into a statistics report
//! (weekly and monthly totals, rankings, streaks) and serves it over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{MemoryDb, SharedStore};
use services::{ActivityService, StatsService};
use std::sync::Arc;
use time_utils::SharedClock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub stats_service: StatsService,
    pub activity_service: ActivityService,
}

impl AppState {
    /// Wire the services together over one store and one clock.
    pub fn new(config: Config, db: MemoryDb, clock: SharedClock) -> Self {
        let store: SharedStore = Arc::new(db.clone());
        let stats_service = StatsService::new(store.clone(), clock.clone(), config.stats_cache_enabled);
        let activity_service = ActivityService::new(store, clock, stats_service.clone());
        Self {
            config,
            db,
            stats_service,
            activity_service,
        }
    }
}

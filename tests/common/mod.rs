// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_stats::config::Config;
use activity_stats::db::MemoryDb;
use activity_stats::models::{Activity, Category};
use activity_stats::routes::create_router;
use activity_stats::time_utils::FixedClock;
use activity_stats::AppState;
use chrono::{DateTime, Duration, FixedOffset};
use std::sync::Arc;

/// Wednesday 2024-05-15, 12:00 UTC. May has 31 days.
#[allow(dead_code)]
pub const NOW: &str = "2024-05-15T12:00:00+00:00";

/// Parse an RFC 3339 instant.
#[allow(dead_code)]
pub fn instant(raw: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(raw).expect("valid RFC 3339 timestamp")
}

/// The fixed "now" every test runs at.
#[allow(dead_code)]
pub fn now() -> DateTime<FixedOffset> {
    instant(NOW)
}

/// An activity at 10:00 UTC on `date` ("YYYY-MM-DD").
#[allow(dead_code)]
pub fn activity(date: &str, title: &str, minutes: i64) -> Activity {
    Activity {
        id: 0,
        user_id: 1,
        title: title.to_string(),
        category: Category::Dumbbell,
        duration: Duration::minutes(minutes),
        timestamp: instant(&format!("{}T10:00:00+00:00", date)),
    }
}

/// Create a test app over a fresh store with the clock pinned to [`NOW`].
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), MemoryDb::new())
}

/// Same as [`create_test_app`] with a caller-supplied config and store.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config, db: MemoryDb) -> (axum::Router, Arc<AppState>) {
    let clock = Arc::new(FixedClock(now()));
    let state = Arc::new(AppState::new(config, db, clock));
    (create_router(state.clone()), state)
}

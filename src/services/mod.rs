// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod formatter;
pub mod stats;
pub mod stats_cache;

pub use activity::ActivityService;
pub use stats::{compute_stats, StatsAggregator};
pub use stats_cache::StatsService;

//! Derived statistics report returned by the stats endpoint.
//!
//! Built fresh on every request from a user's activity list; nothing here
//! is persisted. Field names are the JSON wire contract.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Weekday with the largest total logged time across all history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MostActiveDay {
    /// Capitalized weekday name ("Monday")
    pub day_of_week: String,
    /// Formatted total for that weekday. Named "average" on the wire for
    /// compatibility with existing clients; the value is a sum.
    pub average_duration: String,
}

/// A single activity title with its formatted total duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityStat {
    pub activity_name: String,
    pub duration: String,
}

/// Per-title total, in decimal hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityBreakdown {
    pub activity_name: String,
    pub duration: f64,
}

/// One weekday of the current week, in decimal hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyStat {
    pub day_of_week: String,
    pub duration: f64,
}

/// One 7-day bucket of the current month ("Week 1".."Week 5"), in decimal hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MonthlyStat {
    pub week: String,
    pub duration: f64,
}

/// Complete statistics for one user at one instant.
///
/// Optional fields are `None` only when the user has no activities at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsReport {
    // ─── Durations ───────────────────────────────────────────────
    pub total_time_this_week: String,
    pub time_logged_today: String,
    pub total_time_logged: String,
    pub total_time_last_week: String,

    // ─── Streaks ─────────────────────────────────────────────────
    pub current_streak: String,
    pub longest_streak: String,

    // ─── Rankings ────────────────────────────────────────────────
    pub most_active_day: Option<MostActiveDay>,
    pub most_frequent_activity: Option<ActivityStat>,
    pub top_activity: Option<ActivityStat>,

    // ─── Chart series ────────────────────────────────────────────
    /// One entry per distinct title, unordered
    pub activity_breakdown: Vec<ActivityBreakdown>,
    /// Always 7 entries, Monday first
    pub weekly_stats: Vec<WeeklyStat>,
    /// One entry per 7-day bucket of the current month, in bucket order
    pub monthly_stats: Vec<MonthlyStat>,
}

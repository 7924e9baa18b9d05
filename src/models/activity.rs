// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Logged activity model for storage and API.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest accepted activity title, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Largest duration a single request may log or add, in minutes (one year).
pub const MAX_DURATION_MINUTES: i64 = 60 * 24 * 365;

/// Icon category an activity is filed under.
///
/// Carried through storage and the API; the stats engine never groups on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Category {
    Beer,
    Book,
    Briefcase,
    Brush,
    Calendar,
    Camera,
    Car,
    ChefHat,
    Cigarette,
    Clapperboard,
    Clock,
    Code,
    Coffee,
    Dumbbell,
    Gamepad,
    Heart,
    Music,
    Party,
    Pen,
    Phone,
    Pizza,
    Plane,
    Shopping,
    Star,
    Users,
}

/// A single logged unit of effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Store-assigned identifier
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    /// Owning user
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub user_id: u64,
    /// Free-text label, the grouping key for per-activity stats (case-sensitive)
    pub title: String,
    pub category: Category,
    /// Elapsed time; only whole minutes are meaningful
    #[serde(rename = "durationMinutes", with = "duration_minutes")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration: Duration,
    /// When the activity was performed, in the user's offset
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub timestamp: DateTime<FixedOffset>,
}

/// Request body for logging a new activity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub title: String,
    pub category: Category,
    pub duration_minutes: i64,
}

impl ActivityRequest {
    /// Check the request before it reaches the store.
    pub fn validate(&self) -> Result<(), String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title must not be blank".to_string());
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("Title must be at most {} characters", MAX_TITLE_LEN));
        }
        if self.duration_minutes < 0 {
            return Err("Duration must not be negative".to_string());
        }
        if self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(format!(
                "Duration must be at most {} minutes",
                MAX_DURATION_MINUTES
            ));
        }
        Ok(())
    }
}

/// Serialize a `chrono::Duration` as whole minutes.
mod duration_minutes {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let minutes = i64::deserialize(deserializer)?;
        Duration::try_minutes(minutes)
            .ok_or_else(|| serde::de::Error::custom("duration out of range"))
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display formatting for durations, day counts and weekday names.
//!
//! All functions are pure. Durations are handled at minute granularity;
//! seconds are dropped and negative durations count as zero.

use chrono::{Duration, Weekday};

const MINUTES_PER_HOUR: i64 = 60;

/// Whole minutes in `duration`, clamped at zero.
fn whole_minutes(duration: Duration) -> i64 {
    duration.num_minutes().max(0)
}

/// Format a duration as `"{H}h {M}min"`, `"{H}h"` or `"{M}min"`.
///
/// ```
/// use activity_stats::services::formatter::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(Duration::minutes(90)), "1h 30min");
/// assert_eq!(format_duration(Duration::hours(2)), "2h");
/// assert_eq!(format_duration(Duration::zero()), "0min");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = whole_minutes(duration);
    let hours = total / MINUTES_PER_HOUR;
    let minutes = total % MINUTES_PER_HOUR;

    match (hours, minutes) {
        (0, m) => format!("{}min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}min", h, m),
    }
}

/// Format a day count: `"1 day"`, otherwise `"{n} days"`.
pub fn format_day_count(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

/// Capitalized English weekday name.
pub fn format_weekday_label(weekday: Weekday) -> String {
    let name = match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    name.to_string()
}

/// Duration as decimal hours (whole minutes / 60).
pub fn format_hours(duration: Duration) -> f64 {
    whole_minutes(duration) as f64 / MINUTES_PER_HOUR as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(Duration::zero()), "0min");
        assert_eq!(format_duration(Duration::minutes(1)), "1min");
        assert_eq!(format_duration(Duration::minutes(59)), "59min");
    }

    #[test]
    fn test_format_duration_whole_hours() {
        assert_eq!(format_duration(Duration::minutes(60)), "1h");
        assert_eq!(format_duration(Duration::hours(25)), "25h");
    }

    #[test]
    fn test_format_duration_hours_and_minutes() {
        assert_eq!(format_duration(Duration::minutes(90)), "1h 30min");
        assert_eq!(format_duration(Duration::minutes(125)), "2h 5min");
    }

    #[test]
    fn test_format_duration_drops_seconds() {
        assert_eq!(
            format_duration(Duration::minutes(30) + Duration::seconds(59)),
            "30min"
        );
        assert_eq!(format_duration(Duration::seconds(59)), "0min");
        assert_eq!(
            format_duration(Duration::hours(1) + Duration::seconds(30)),
            "1h"
        );
    }

    #[test]
    fn test_format_duration_negative_is_zero() {
        assert_eq!(format_duration(Duration::minutes(-30)), "0min");
    }

    #[test]
    fn test_format_day_count() {
        assert_eq!(format_day_count(0), "0 days");
        assert_eq!(format_day_count(1), "1 day");
        assert_eq!(format_day_count(2), "2 days");
        assert_eq!(format_day_count(31), "31 days");
    }

    #[test]
    fn test_format_weekday_label() {
        assert_eq!(format_weekday_label(Weekday::Mon), "Monday");
        assert_eq!(format_weekday_label(Weekday::Wed), "Wednesday");
        assert_eq!(format_weekday_label(Weekday::Sun), "Sunday");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(Duration::zero()), 0.0);
        assert_eq!(format_hours(Duration::minutes(30)), 0.5);
        assert_eq!(format_hours(Duration::minutes(90)), 1.5);
        assert_eq!(format_hours(Duration::minutes(45) + Duration::seconds(40)), 0.75);
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity statistics aggregation.
//!
//! Turns a user's activity list plus the current instant into a
//! [`StatsReport`]. Every derivation is a read-only pass over the same
//! slice; dates are the local calendar date of each timestamp and weeks
//! start on Monday.

use crate::models::{
    Activity, ActivityBreakdown, ActivityStat, MonthlyStat, MostActiveDay, StatsReport,
    WeeklyStat,
};
use crate::services::formatter::{
    format_day_count, format_duration, format_hours, format_weekday_label,
};
use crate::time_utils::{
    days_in_month, first_of_month, is_within_range, monday_of_week, shift_days, DAYS_IN_WEEK,
    WEEKDAYS,
};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate};
use std::collections::{BTreeSet, HashMap};

/// Compute the full statistics report for `activities` as seen at `now`.
pub fn compute_stats(activities: &[Activity], now: DateTime<FixedOffset>) -> StatsReport {
    let aggregator = StatsAggregator::new(activities, now.date_naive());
    tracing::debug!(
        activities = activities.len(),
        today = %aggregator.today,
        "Computing activity stats"
    );
    aggregator.report()
}

/// Totals for one activity title.
#[derive(Debug, Clone)]
struct TitleTotals<'a> {
    title: &'a str,
    count: u64,
    total: Duration,
}

/// Derivations over one activity snapshot, anchored at a local date.
pub struct StatsAggregator<'a> {
    activities: &'a [Activity],
    today: NaiveDate,
}

impl<'a> StatsAggregator<'a> {
    pub fn new(activities: &'a [Activity], today: NaiveDate) -> Self {
        Self { activities, today }
    }

    /// Assemble the report from every derivation.
    pub fn report(&self) -> StatsReport {
        let by_title = self.totals_by_title();

        let report = StatsReport {
            total_time_this_week: format_duration(self.total_time_this_week()),
            time_logged_today: format_duration(self.time_logged_today()),
            total_time_logged: format_duration(self.total_time_logged()),
            total_time_last_week: format_duration(self.total_time_last_week()),
            current_streak: format_day_count(self.current_streak()),
            longest_streak: format_day_count(self.longest_streak()),
            most_active_day: self.most_active_day(),
            most_frequent_activity: most_frequent_activity(&by_title),
            top_activity: top_activity(&by_title),
            activity_breakdown: activity_breakdown(&by_title),
            weekly_stats: self.weekly_stats(),
            monthly_stats: self.monthly_stats(),
        };

        tracing::debug!(
            today = %self.today,
            current_streak = %report.current_streak,
            longest_streak = %report.longest_streak,
            titles = report.activity_breakdown.len(),
            "Stats computed"
        );
        report
    }

    pub fn total_time_logged(&self) -> Duration {
        let total = sum_durations(self.activities.iter());
        tracing::trace!(minutes = total.num_minutes(), "Total time logged");
        total
    }

    pub fn time_logged_today(&self) -> Duration {
        let total = self.total_between(self.today, self.today);
        tracing::trace!(minutes = total.num_minutes(), "Time logged today");
        total
    }

    /// Time from the Sunday before this week's Monday through today.
    ///
    /// Unlike the last-week and weekly-chart windows, this one opens on the
    /// Sunday before Monday.
    pub fn total_time_this_week(&self) -> Duration {
        let start = shift_days(monday_of_week(self.today), -1);
        let total = self.total_between(start, self.today);
        tracing::trace!(%start, minutes = total.num_minutes(), "Total time this week");
        total
    }

    /// Time in the full Monday..Sunday week before the current one.
    pub fn total_time_last_week(&self) -> Duration {
        let start = shift_days(monday_of_week(self.today), -i64::from(DAYS_IN_WEEK));
        let end = shift_days(start, i64::from(DAYS_IN_WEEK) - 1);
        let total = self.total_between(start, end);
        tracing::trace!(%start, %end, minutes = total.num_minutes(), "Total time last week");
        total
    }

    /// Consecutive active days ending today (zero if today is inactive).
    pub fn current_streak(&self) -> u32 {
        let days = self.activity_days();
        let mut day = self.today;
        let mut streak: u32 = 0;

        while days.contains(&day) {
            streak += 1;
            match day.pred_opt() {
                Some(previous) => day = previous,
                None => break,
            }
        }

        tracing::trace!(streak, "Current streak");
        streak
    }

    /// Longest run of consecutive active days anywhere in history.
    pub fn longest_streak(&self) -> u32 {
        let mut longest: u32 = 0;
        let mut run: u32 = 0;
        let mut previous: Option<NaiveDate> = None;

        for day in self.activity_days() {
            let continues = previous.and_then(|p| p.succ_opt()) == Some(day);
            run = if continues { run + 1 } else { 1 };
            longest = longest.max(run);
            previous = Some(day);
        }

        tracing::trace!(streak = longest, "Longest streak");
        longest
    }

    /// Weekday with the highest total across all history.
    ///
    /// Only weekdays that have at least one activity compete; on a tie the
    /// earlier weekday (Monday first) wins.
    pub fn most_active_day(&self) -> Option<MostActiveDay> {
        let mut totals: [Option<Duration>; 7] = [None; 7];
        for activity in self.activities {
            let slot = &mut totals[activity.timestamp.weekday().num_days_from_monday() as usize];
            *slot = Some(saturating_add(slot.unwrap_or_else(Duration::zero), activity.duration));
        }

        let mut best: Option<(usize, Duration)> = None;
        for (index, total) in totals.iter().enumerate() {
            if let Some(total) = *total {
                if best.is_none_or(|(_, current)| total > current) {
                    best = Some((index, total));
                }
            }
        }

        let day = best.map(|(index, total)| MostActiveDay {
            day_of_week: format_weekday_label(WEEKDAYS[index]),
            average_duration: format_duration(total),
        });

        match &day {
            Some(d) => tracing::trace!(
                day = %d.day_of_week,
                total = %d.average_duration,
                "Most active day"
            ),
            None => tracing::trace!("No most active day"),
        }
        day
    }

    /// Decimal hours per weekday of the current Monday..Sunday week.
    pub fn weekly_stats(&self) -> Vec<WeeklyStat> {
        let start = monday_of_week(self.today);
        let end = shift_days(start, i64::from(DAYS_IN_WEEK) - 1);

        let mut totals = [Duration::zero(); 7];
        for activity in self.activities_between(start, end) {
            let slot = &mut totals[activity.timestamp.weekday().num_days_from_monday() as usize];
            *slot = saturating_add(*slot, activity.duration);
        }

        WEEKDAYS
            .iter()
            .zip(totals)
            .map(|(weekday, total)| WeeklyStat {
                day_of_week: format_weekday_label(*weekday),
                duration: format_hours(total),
            })
            .collect()
    }

    /// Decimal hours per 7-day bucket of the current month.
    ///
    /// Buckets are counted from day 1 (days 1-7, 8-14, ...) and do not line up
    /// with calendar weeks. The last bucket may be short but is always present.
    pub fn monthly_stats(&self) -> Vec<MonthlyStat> {
        let first = first_of_month(self.today);
        let length = days_in_month(self.today);
        let last = shift_days(first, i64::from(length) - 1);
        let bucket_count = length.div_ceil(DAYS_IN_WEEK) as usize;

        let mut totals = vec![Duration::zero(); bucket_count];
        for activity in self.activities_between(first, last) {
            let bucket = ((activity.timestamp.day() - 1) / DAYS_IN_WEEK) as usize;
            if let Some(total) = totals.get_mut(bucket) {
                *total = saturating_add(*total, activity.duration);
            }
        }

        tracing::trace!(buckets = bucket_count, "Monthly stats");
        totals
            .into_iter()
            .enumerate()
            .map(|(index, total)| MonthlyStat {
                week: format!("Week {}", index + 1),
                duration: format_hours(total),
            })
            .collect()
    }

    /// Distinct local dates with at least one activity, ascending.
    fn activity_days(&self) -> BTreeSet<NaiveDate> {
        self.activities
            .iter()
            .map(|activity| activity.timestamp.date_naive())
            .collect()
    }

    fn activities_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &'a Activity> {
        self.activities
            .iter()
            .filter(move |activity| is_within_range(activity.timestamp.date_naive(), start, end))
    }

    fn total_between(&self, start: NaiveDate, end: NaiveDate) -> Duration {
        sum_durations(self.activities_between(start, end))
    }

    /// Count and total per title, in order of first appearance.
    fn totals_by_title(&self) -> Vec<TitleTotals<'a>> {
        let mut index: HashMap<&'a str, usize> = HashMap::new();
        let mut totals: Vec<TitleTotals<'a>> = Vec::new();

        for activity in self.activities {
            let slot = *index.entry(activity.title.as_str()).or_insert_with(|| {
                totals.push(TitleTotals {
                    title: activity.title.as_str(),
                    count: 0,
                    total: Duration::zero(),
                });
                totals.len() - 1
            });
            let entry = &mut totals[slot];
            entry.count += 1;
            entry.total = saturating_add(entry.total, activity.duration);
        }

        totals
    }
}

fn sum_durations<'a>(activities: impl Iterator<Item = &'a Activity>) -> Duration {
    activities.fold(Duration::zero(), |acc, activity| {
        saturating_add(acc, activity.duration)
    })
}

/// `a + b`, pinned at `Duration::MAX` instead of overflowing.
fn saturating_add(a: Duration, b: Duration) -> Duration {
    a.checked_add(&b).unwrap_or(Duration::MAX)
}

/// First entry that strictly beats every earlier one under `key`.
fn first_max_by<'t, 'a, K: PartialOrd>(
    totals: &'t [TitleTotals<'a>],
    key: impl Fn(&TitleTotals<'a>) -> K,
) -> Option<&'t TitleTotals<'a>> {
    let mut best: Option<&TitleTotals<'a>> = None;
    for entry in totals {
        if best.is_none_or(|b| key(entry) > key(b)) {
            best = Some(entry);
        }
    }
    best
}

/// Title logged most often, reported with its summed duration.
fn most_frequent_activity(totals: &[TitleTotals<'_>]) -> Option<ActivityStat> {
    let stat = first_max_by(totals, |t| t.count).map(|t| ActivityStat {
        activity_name: t.title.to_string(),
        duration: format_duration(t.total),
    });
    tracing::trace!(activity = ?stat.as_ref().map(|s| &s.activity_name), "Most frequent activity");
    stat
}

/// Title with the largest summed duration.
fn top_activity(totals: &[TitleTotals<'_>]) -> Option<ActivityStat> {
    let stat = first_max_by(totals, |t| t.total).map(|t| ActivityStat {
        activity_name: t.title.to_string(),
        duration: format_duration(t.total),
    });
    tracing::trace!(activity = ?stat.as_ref().map(|s| &s.activity_name), "Top activity");
    stat
}

fn activity_breakdown(totals: &[TitleTotals<'_>]) -> Vec<ActivityBreakdown> {
    totals
        .iter()
        .map(|t| ActivityBreakdown {
            activity_name: t.title.to_string(),
            duration: format_hours(t.total),
        })
        .collect()
}

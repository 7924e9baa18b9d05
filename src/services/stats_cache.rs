// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user stats service with an in-memory report cache.
//!
//! Reports depend only on the activity list and the local date of "now",
//! so a cached report stays valid until either the user's activities change
//! (the write path calls [`StatsService::invalidate`]) or the date rolls over.

use crate::db::SharedStore;
use crate::error::Result;
use crate::models::StatsReport;
use crate::services::stats::compute_stats;
use crate::time_utils::SharedClock;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

/// A report together with what it was computed against.
#[derive(Debug, Clone)]
pub struct CachedStats {
    pub report: StatsReport,
    /// Local date the report was computed for
    pub computed_for: NaiveDate,
    /// User generation at the time the activity list was read
    pub generation: u64,
}

/// Shared report cache type, keyed by user id.
pub type StatsCache = Arc<DashMap<u64, CachedStats>>;

/// Shared per-user write generations, bumped on every invalidation.
///
/// Holds one counter per user that has ever been written to. Entries are
/// never removed: dropping one would reset the counter and let a report
/// computed before the drop match again.
pub type Generations = Arc<DashMap<u64, u64>>;

/// Computes stats reports, memoising them per user when enabled.
#[derive(Clone)]
pub struct StatsService {
    store: SharedStore,
    clock: SharedClock,
    /// `None` disables caching entirely
    cache: Option<StatsCache>,
    generations: Generations,
}

impl StatsService {
    /// Create a service. Pass `enable_cache = false` to recompute on every call.
    pub fn new(store: SharedStore, clock: SharedClock, enable_cache: bool) -> Self {
        Self {
            store,
            clock,
            cache: enable_cache.then(|| Arc::new(DashMap::new())),
            generations: Arc::new(DashMap::new()),
        }
    }

    /// Stats for a user as of the clock's current instant.
    pub async fn get_stats(&self, user_id: u64) -> Result<StatsReport> {
        let now = self.clock.now();
        let today = now.date_naive();
        let generation = self.generation(user_id);

        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&user_id) {
                if cached.computed_for == today && cached.generation == generation {
                    tracing::debug!(user_id, "Stats cache hit");
                    return Ok(cached.report.clone());
                }
            }
        }

        tracing::info!(user_id, "Generating statistics");
        let activities = self.store.list_activities(user_id).await?;
        let report = tokio::task::spawn_blocking(move || compute_stats(&activities, now)).await?;

        if let Some(cache) = &self.cache {
            cache.insert(
                user_id,
                CachedStats {
                    report: report.clone(),
                    computed_for: today,
                    generation,
                },
            );
        }

        Ok(report)
    }

    /// Drop any cached report for a user. Called after every write.
    ///
    /// A computation that read the activity list before this call can still
    /// land in the cache afterwards, but it carries the old generation and
    /// is never served.
    pub fn invalidate(&self, user_id: u64) {
        *self.generations.entry(user_id).or_insert(0) += 1;
        if let Some(cache) = &self.cache {
            if cache.remove(&user_id).is_some() {
                tracing::debug!(user_id, "Evicted cached stats");
            }
        }
    }

    /// Whether a report for `user_id` is currently cached.
    pub fn is_cached(&self, user_id: u64) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|cache| cache.contains_key(&user_id))
    }

    fn generation(&self, user_id: u64) -> u64 {
        self.generations.get(&user_id).map(|g| *g).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ActivityStore, MemoryDb, NewActivity};
    use crate::error::AppError;
    use crate::models::{Activity, Category};
    use crate::time_utils::{Clock, FixedClock};
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, FixedOffset};
    use std::sync::Mutex;

    /// Clock that tests can move forward.
    struct MovableClock(Mutex<DateTime<FixedOffset>>);

    impl Clock for MovableClock {
        fn now(&self) -> DateTime<FixedOffset> {
            *self.0.lock().unwrap()
        }
    }

    fn instant(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    async fn log(db: &MemoryDb, user_id: u64, when: &str, minutes: i64) {
        db.insert_activity(NewActivity {
            user_id,
            title: "Run".to_string(),
            category: Category::Dumbbell,
            duration: Duration::minutes(minutes),
            timestamp: instant(when),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_cached_report_is_reused_until_invalidated() {
        let db = MemoryDb::new();
        let clock = Arc::new(FixedClock(instant("2024-05-15T12:00:00+00:00")));
        let service = StatsService::new(Arc::new(db.clone()), clock, true);

        log(&db, 1, "2024-05-15T08:00:00+00:00", 30).await;
        let first = service.get_stats(1).await.unwrap();
        assert_eq!(first.total_time_logged, "30min");
        assert!(service.is_cached(1));

        // Written behind the service's back: still served from cache
        log(&db, 1, "2024-05-15T09:00:00+00:00", 30).await;
        let cached = service.get_stats(1).await.unwrap();
        assert_eq!(cached.total_time_logged, "30min");

        service.invalidate(1);
        assert!(!service.is_cached(1));
        let fresh = service.get_stats(1).await.unwrap();
        assert_eq!(fresh.total_time_logged, "1h");
    }

    #[tokio::test]
    async fn test_cache_expires_when_date_changes() {
        let db = MemoryDb::new();
        let clock = Arc::new(MovableClock(Mutex::new(instant("2024-05-15T23:00:00+00:00"))));
        let service = StatsService::new(Arc::new(db.clone()), clock.clone(), true);

        log(&db, 1, "2024-05-15T08:00:00+00:00", 45).await;
        let today = service.get_stats(1).await.unwrap();
        assert_eq!(today.time_logged_today, "45min");
        assert_eq!(today.current_streak, "1 day");

        *clock.0.lock().unwrap() = instant("2024-05-16T01:00:00+00:00");
        let tomorrow = service.get_stats(1).await.unwrap();
        assert_eq!(tomorrow.time_logged_today, "0min");
        assert_eq!(tomorrow.current_streak, "0 days");
    }

    #[tokio::test]
    async fn test_stale_generation_is_not_served() {
        let db = MemoryDb::new();
        let clock = Arc::new(FixedClock(instant("2024-05-15T12:00:00+00:00")));
        let service = StatsService::new(Arc::new(db.clone()), clock, true);

        log(&db, 1, "2024-05-15T08:00:00+00:00", 10).await;
        service.get_stats(1).await.unwrap();

        // Simulate a report computed before a write landing after the eviction
        let stale = service.cache.as_ref().unwrap().get(&1).unwrap().value().clone();
        service.invalidate(1);
        log(&db, 1, "2024-05-15T09:00:00+00:00", 10).await;
        service.cache.as_ref().unwrap().insert(1, stale);

        let report = service.get_stats(1).await.unwrap();
        assert_eq!(report.total_time_logged, "20min");
    }

    #[tokio::test]
    async fn test_disabled_cache_always_recomputes() {
        let db = MemoryDb::new();
        let clock = Arc::new(FixedClock(instant("2024-05-15T12:00:00+00:00")));
        let service = StatsService::new(Arc::new(db.clone()), clock, false);

        log(&db, 1, "2024-05-15T08:00:00+00:00", 10).await;
        service.get_stats(1).await.unwrap();
        assert!(!service.is_cached(1));

        log(&db, 1, "2024-05-15T09:00:00+00:00", 10).await;
        let report = service.get_stats(1).await.unwrap();
        assert_eq!(report.total_time_logged, "20min");
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let clock = Arc::new(FixedClock(instant("2024-05-15T12:00:00+00:00")));
        let service = StatsService::new(Arc::new(MemoryDb::new_offline()), clock, true);
        assert!(service.get_stats(1).await.is_err());
        assert!(!service.is_cached(1));
    }

    /// Read-only store serving a fixed list for every user.
    struct SnapshotStore(Vec<Activity>);

    #[async_trait]
    impl ActivityStore for SnapshotStore {
        async fn list_activities(&self, user_id: u64) -> Result<Vec<Activity>> {
            Ok(self
                .0
                .iter()
                .filter(|activity| activity.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn insert_activity(&self, _new: NewActivity) -> Result<Activity> {
            Err(AppError::BadRequest("read-only store".to_string()))
        }

        async fn add_duration(
            &self,
            _user_id: u64,
            _activity_id: u64,
            _extra: Duration,
        ) -> Result<Option<Activity>> {
            Err(AppError::BadRequest("read-only store".to_string()))
        }

        async fn delete_activity(&self, _user_id: u64, _activity_id: u64) -> Result<bool> {
            Err(AppError::BadRequest("read-only store".to_string()))
        }
    }

    fn snapshot(user_id: u64, when: &str, title: &str, minutes: i64) -> Activity {
        Activity {
            id: 0,
            user_id,
            title: title.to_string(),
            category: Category::Book,
            duration: Duration::minutes(minutes),
            timestamp: instant(when),
        }
    }

    #[tokio::test]
    async fn test_reports_from_any_store() {
        let store = SnapshotStore(vec![
            snapshot(1, "2024-05-15T08:00:00+00:00", "Read", 40),
            snapshot(1, "2024-05-14T08:00:00+00:00", "Read", 20),
            snapshot(2, "2024-05-15T08:00:00+00:00", "Swim", 90),
        ]);
        let clock = Arc::new(FixedClock(instant("2024-05-15T12:00:00+00:00")));
        let service = StatsService::new(Arc::new(store), clock, true);

        let report = service.get_stats(1).await.unwrap();
        assert_eq!(report.total_time_logged, "1h");
        assert_eq!(report.current_streak, "2 days");
        assert_eq!(report.top_activity.unwrap().activity_name, "Read");

        let other = service.get_stats(2).await.unwrap();
        assert_eq!(other.total_time_logged, "1h 30min");
    }

    #[tokio::test]
    async fn test_generations_track_written_users_only() {
        let db = MemoryDb::new();
        let clock = Arc::new(FixedClock(instant("2024-05-15T12:00:00+00:00")));
        let service = StatsService::new(Arc::new(db.clone()), clock, true);

        for _ in 0..5 {
            service.invalidate(1);
            service.invalidate(2);
        }
        service.get_stats(3).await.unwrap();

        assert_eq!(service.generations.len(), 2);
        assert_eq!(service.generation(1), 5);
        assert_eq!(service.generation(3), 0);
    }
}

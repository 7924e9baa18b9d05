// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process activity store.
//!
//! Activities are kept per user in a `DashMap`, so reads and writes for
//! different users never contend. Each user's list is mutated under its
//! shard lock, which keeps a single user's writes atomic.

use super::ActivityStore;
use crate::error::AppError;
use crate::models::{Activity, Category};
use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Fields for a new activity; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: u64,
    pub title: String,
    pub category: Category,
    pub duration: Duration,
    pub timestamp: DateTime<FixedOffset>,
}

#[derive(Default)]
struct Tables {
    activities: DashMap<u64, Vec<Activity>>,
    next_id: AtomicU64,
}

/// Activity store handle. Cheap to clone; clones share the same tables.
#[derive(Clone)]
pub struct MemoryDb {
    tables: Option<Arc<Tables>>,
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDb {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            tables: Some(Arc::new(Tables::default())),
        }
    }

    /// A store whose every operation fails, for exercising error paths.
    pub fn new_offline() -> Self {
        Self { tables: None }
    }

    fn tables(&self) -> Result<&Tables, AppError> {
        self.tables
            .as_deref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Replace a user's activities wholesale (seeding and tests).
    pub async fn replace_activities(
        &self,
        user_id: u64,
        activities: Vec<Activity>,
    ) -> Result<(), AppError> {
        let tables = self.tables()?;
        if let Some(max_id) = activities.iter().map(|a| a.id).max() {
            tables.next_id.fetch_max(max_id, Ordering::Relaxed);
        }
        tables.activities.insert(user_id, activities);
        Ok(())
    }
}

#[async_trait]
impl ActivityStore for MemoryDb {
    async fn list_activities(&self, user_id: u64) -> Result<Vec<Activity>, AppError> {
        let activities = self
            .tables()?
            .activities
            .get(&user_id)
            .map(|list| list.value().clone())
            .unwrap_or_default();

        tracing::debug!(user_id, count = activities.len(), "Fetched activities");
        Ok(activities)
    }

    async fn insert_activity(&self, new: NewActivity) -> Result<Activity, AppError> {
        let tables = self.tables()?;
        let id = tables.next_id.fetch_add(1, Ordering::Relaxed) + 1;

        let activity = Activity {
            id,
            user_id: new.user_id,
            title: new.title,
            category: new.category,
            duration: new.duration,
            timestamp: new.timestamp,
        };

        tables
            .activities
            .entry(activity.user_id)
            .or_default()
            .push(activity.clone());

        Ok(activity)
    }

    async fn add_duration(
        &self,
        user_id: u64,
        activity_id: u64,
        extra: Duration,
    ) -> Result<Option<Activity>, AppError> {
        let tables = self.tables()?;
        let Some(mut list) = tables.activities.get_mut(&user_id) else {
            return Ok(None);
        };
        let Some(activity) = list.iter_mut().find(|activity| activity.id == activity_id) else {
            return Ok(None);
        };

        activity.duration = activity.duration.checked_add(&extra).ok_or_else(|| {
            AppError::BadRequest(format!("Duration of activity {} would overflow", activity_id))
        })?;
        Ok(Some(activity.clone()))
    }

    async fn delete_activity(&self, user_id: u64, activity_id: u64) -> Result<bool, AppError> {
        let tables = self.tables()?;
        let Some(mut list) = tables.activities.get_mut(&user_id) else {
            return Ok(false);
        };

        let before = list.len();
        list.retain(|activity| activity.id != activity_id);
        Ok(list.len() != before)
    }
}

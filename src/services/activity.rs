// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity bookkeeping service.
//!
//! Handles the write path for a user's activity log:
//! 1. Validate the request
//! 2. Stamp new activities with the service clock
//! 3. Persist through the store
//! 4. Evict the user's cached stats report

use crate::db::{NewActivity, SharedStore};
use crate::error::{AppError, Result};
use crate::models::activity::MAX_DURATION_MINUTES;
use crate::models::{Activity, ActivityRequest};
use crate::services::StatsService;
use crate::time_utils::SharedClock;
use chrono::Duration;

/// Adds, extends and deletes activities, keeping the stats cache honest.
#[derive(Clone)]
pub struct ActivityService {
    store: SharedStore,
    clock: SharedClock,
    stats: StatsService,
}

impl ActivityService {
    pub fn new(store: SharedStore, clock: SharedClock, stats: StatsService) -> Self {
        Self {
            store,
            clock,
            stats,
        }
    }

    /// All of a user's activities.
    pub async fn list_activities(&self, user_id: u64) -> Result<Vec<Activity>> {
        self.store.list_activities(user_id).await
    }

    /// Log a new activity performed now.
    pub async fn add_activity(&self, user_id: u64, request: ActivityRequest) -> Result<Activity> {
        request.validate().map_err(AppError::BadRequest)?;
        let duration = minutes(request.duration_minutes)?;

        let activity = self
            .store
            .insert_activity(NewActivity {
                user_id,
                title: request.title.trim().to_string(),
                category: request.category,
                duration,
                timestamp: self.clock.now(),
            })
            .await?;
        self.stats.invalidate(user_id);

        tracing::info!(
            user_id,
            activity_id = activity.id,
            minutes = request.duration_minutes,
            "Activity added"
        );
        Ok(activity)
    }

    /// Add progress minutes to an existing activity.
    pub async fn add_progress(
        &self,
        user_id: u64,
        activity_id: u64,
        progress_minutes: i64,
    ) -> Result<Activity> {
        if progress_minutes <= 0 {
            return Err(AppError::BadRequest(
                "Progress must be a positive number of minutes".to_string(),
            ));
        }
        if progress_minutes > MAX_DURATION_MINUTES {
            return Err(AppError::BadRequest(format!(
                "Progress must be at most {} minutes",
                MAX_DURATION_MINUTES
            )));
        }
        let extra = minutes(progress_minutes)?;

        let activity = self
            .store
            .add_duration(user_id, activity_id, extra)
            .await?
            .ok_or_else(|| not_found(activity_id))?;
        self.stats.invalidate(user_id);

        tracing::info!(
            user_id,
            activity_id,
            progress_minutes,
            total_minutes = activity.duration.num_minutes(),
            "Activity progress added"
        );
        Ok(activity)
    }

    /// Delete an activity.
    pub async fn delete_activity(&self, user_id: u64, activity_id: u64) -> Result<()> {
        if !self.store.delete_activity(user_id, activity_id).await? {
            return Err(not_found(activity_id));
        }
        self.stats.invalidate(user_id);

        tracing::info!(user_id, activity_id, "Activity deleted");
        Ok(())
    }
}

fn minutes(value: i64) -> Result<Duration> {
    Duration::try_minutes(value)
        .ok_or_else(|| AppError::BadRequest(format!("Duration of {} minutes is out of range", value)))
}

fn not_found(activity_id: u64) -> AppError {
    AppError::NotFound(format!("Activity {} not found", activity_id))
}

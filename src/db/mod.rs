//! Database layer (activity store boundary plus an in-memory implementation).

pub mod memory;

pub use memory::{MemoryDb, NewActivity};

use crate::error::AppError;
use crate::models::Activity;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

/// Per-user activity storage used by the services.
///
/// Listing is the only read the stats engine needs; the write methods back
/// the activity bookkeeping endpoints.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// All activities logged by a user, oldest first.
    async fn list_activities(&self, user_id: u64) -> Result<Vec<Activity>, AppError>;

    /// Insert a new activity and return it with its assigned id.
    async fn insert_activity(&self, new: NewActivity) -> Result<Activity, AppError>;

    /// Add `extra` to an activity's duration.
    ///
    /// Returns the updated activity, or `None` if the user has no such activity.
    async fn add_duration(
        &self,
        user_id: u64,
        activity_id: u64,
        extra: Duration,
    ) -> Result<Option<Activity>, AppError>;

    /// Delete an activity. Returns `false` if it did not exist.
    async fn delete_activity(&self, user_id: u64, activity_id: u64) -> Result<bool, AppError>;
}

/// Shared store handle held by the services.
pub type SharedStore = Arc<dyn ActivityStore>;

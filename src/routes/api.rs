// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user API routes: stats report and activity log.
//!
//! Callers are trusted for the user id in the path; no authorization
//! happens here.

use crate::error::Result;
use crate::models::{Activity, ActivityRequest, StatsReport};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// API routes for user stats and activities.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/users/{user_id}/stats", get(get_stats))
        .route(
            "/api/v1/users/{user_id}/activities",
            get(get_activities).post(add_activity),
        )
        .route(
            "/api/v1/users/{user_id}/activities/{activity_id}/progress",
            post(add_progress),
        )
        .route(
            "/api/v1/users/{user_id}/activities/{activity_id}",
            delete(delete_activity),
        )
}

// ─── Stats ───────────────────────────────────────────────────

/// Get the statistics report for a user.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> Result<Json<StatsReport>> {
    let report = state.stats_service.get_stats(user_id).await?;
    Ok(Json(report))
}

// ─── Activities ──────────────────────────────────────────────

/// List a user's activities.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> Result<Json<Vec<Activity>>> {
    tracing::debug!(user_id, "Fetching activities");
    let activities = state.activity_service.list_activities(user_id).await?;
    Ok(Json(activities))
}

/// Log a new activity.
async fn add_activity(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
    Json(request): Json<ActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    let activity = state
        .activity_service
        .add_activity(user_id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

#[derive(Deserialize)]
struct ProgressRequest {
    minutes: i64,
}

/// Add progress minutes to an activity.
async fn add_progress(
    State(state): State<Arc<AppState>>,
    Path((user_id, activity_id)): Path<(u64, u64)>,
    Json(request): Json<ProgressRequest>,
) -> Result<Json<Activity>> {
    let activity = state
        .activity_service
        .add_progress(user_id, activity_id, request.minutes)
        .await?;
    Ok(Json(activity))
}

/// Delete an activity.
async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Path((user_id, activity_id)): Path<(u64, u64)>,
) -> Result<StatusCode> {
    state
        .activity_service
        .delete_activity(user_id, activity_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_stats::config::Config;
use activity_stats::db::MemoryDb;
use activity_stats::error::AppError;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
};
use tower::ServiceExt;

mod common;

#[test]
fn test_error_codes() {
    assert_eq!(AppError::NotFound("x".to_string()).code(), "not_found");
    assert_eq!(AppError::BadRequest("x".to_string()).code(), "bad_request");
    assert_eq!(AppError::Database("x".to_string()).code(), "database_error");
    assert_eq!(
        AppError::Internal(anyhow::anyhow!("boom")).code(),
        "internal_error"
    );
}

#[tokio::test]
async fn test_database_error_hides_details() {
    let response = AppError::Database("connection string leaked".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "database_error");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_store_failure_surfaces_as_server_error() {
    let (app, _) = common::create_test_app_with(Config::test_default(), MemoryDb::new_offline());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/users/1/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_failed_background_task_is_internal_error() {
    let join_error = tokio::task::spawn_blocking(|| -> u32 { panic!("stats worker crashed") })
        .await
        .unwrap_err();

    let err = AppError::from(join_error);
    assert_eq!(err.code(), "internal_error");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json.get("details").is_none());
}

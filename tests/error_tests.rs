// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::to_bytes,
    http::StatusCode,
    response::IntoResponse,
};
use statify::error::{AppError, ErrorKind};

async fn render(err: AppError) -> (StatusCode, String) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[test]
fn test_error_kinds() {
    assert_eq!(
        AppError::BadRequest("No authorization code".to_string()).kind(),
        ErrorKind::Client
    );
    assert_eq!(
        AppError::TokenExchange("HTTP 400".to_string()).kind(),
        ErrorKind::Upstream
    );
    assert_eq!(
        AppError::UserInfo("JSON parse error".to_string()).kind(),
        ErrorKind::Upstream
    );
    assert_eq!(
        AppError::Database("locked".to_string()).kind(),
        ErrorKind::Persistence
    );
    assert_eq!(AppError::NotFound.kind(), ErrorKind::NotFound);
    assert_eq!(
        AppError::Internal(anyhow::anyhow!("boom")).kind(),
        ErrorKind::Internal
    );
}

#[test]
fn test_sqlx_error_is_persistence() {
    let err: AppError = sqlx::Error::PoolClosed.into();
    assert_eq!(err.kind(), ErrorKind::Persistence);
}

#[tokio::test]
async fn test_upstream_details_not_leaked() {
    let (status, body) = render(AppError::TokenExchange(
        "HTTP 400 Bad Request: {\"error\":\"invalid_client\"}".to_string(),
    ))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Authentication failed");

    let (status, body) = render(AppError::UserInfo("HTTP 401: expired".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to get user info");
}

#[tokio::test]
async fn test_database_details_not_leaked() {
    let (status, body) = render(AppError::Database(
        "UNIQUE constraint failed: users.spotify_id".to_string(),
    ))
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to save user");
}

#[tokio::test]
async fn test_client_and_not_found_responses() {
    let (status, body) = render(AppError::BadRequest("No authorization code".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "No authorization code");

    let (status, _) = render(AppError::NotFound).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

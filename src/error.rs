// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent plain-text responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Spotify token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Spotify user info request failed: {0}")]
    UserInfo(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found")]
    NotFound,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Coarse failure classes surfaced by the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent an unusable request.
    Client,
    /// Spotify answered with a non-200 status or an unparseable body.
    Upstream,
    /// The users table could not be read or written.
    Persistence,
    NotFound,
    Internal,
}

impl AppError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::BadRequest(_) => ErrorKind::Client,
            AppError::TokenExchange(_) | AppError::UserInfo(_) => ErrorKind::Upstream,
            AppError::Database(_) => ErrorKind::Persistence,
            AppError::NotFound => ErrorKind::NotFound,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Status code and caller-facing message. Upstream and database details
    /// stay in the server log.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::TokenExchange(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication failed".to_string(),
            ),
            AppError::UserInfo(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get user info".to_string(),
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save user".to_string(),
            ),
            AppError::NotFound => (StatusCode::NOT_FOUND, "404 page not found".to_string()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest(msg) => tracing::warn!(error = %msg, "Bad request"),
            AppError::TokenExchange(msg) => {
                tracing::error!(error = %msg, "Error exchanging code for token")
            }
            AppError::UserInfo(msg) => tracing::error!(error = %msg, "Error getting user info"),
            AppError::Database(msg) => tracing::error!(error = %msg, "Database error"),
            AppError::NotFound => {}
            AppError::Internal(err) => tracing::error!(error = %err, "Internal server error"),
        }

        let (status, message) = self.status_and_message();
        (status, message).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod assets;
pub mod auth;

use crate::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Build the complete router with all routes.
///
/// Paths not matched by an explicit route go to the frontend asset handler.
pub fn create_router(state: Arc<AppState>) -> Router {
    tracing::info!(
        redirect_uri = %state.config.spotify_redirect_uri,
        accounts_url = %state.config.spotify_accounts_url,
        api_url = %state.config.spotify_api_url,
        "Building router"
    );

    Router::new()
        .route("/health", get(health_check))
        .merge(auth::routes())
        .fallback(assets::serve)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test harness: in-memory app and a stand-in Spotify server.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Router,
};
use statify::config::Config;
use statify::db::SqliteDb;
use statify::routes::create_router;
use statify::services::{AssetSource, MemoryAssets, SpotifyClient, SpotifyService};
use statify::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"root\"></div></body></html>";

/// Canned answer for one stand-in Spotify endpoint.
#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
}

impl Canned {
    pub fn ok(body: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
        }
    }

    pub fn status(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// Local HTTP server playing the Spotify accounts service and Web API.
///
/// The token endpoint only answers with its canned response when the request
/// carries the expected Basic credentials, grant type, code and redirect URI;
/// otherwise it returns 400.
pub struct MockSpotify {
    pub base_url: String,
    token_calls: Arc<AtomicUsize>,
    profile_calls: Arc<AtomicUsize>,
}

struct MockState {
    expected_code: String,
    expected_auth: String,
    expected_redirect_uri: String,
    token: Canned,
    profile: Canned,
    token_calls: Arc<AtomicUsize>,
    profile_calls: Arc<AtomicUsize>,
}

impl MockSpotify {
    pub async fn start(expected_code: &str, token: Canned, profile: Canned) -> Self {
        let config = Config::test_default();
        let credentials = format!(
            "{}:{}",
            config.spotify_client_id, config.spotify_client_secret
        );
        let expected_auth = {
            use base64::{engine::general_purpose::STANDARD, Engine as _};
            format!("Basic {}", STANDARD.encode(credentials))
        };

        let token_calls = Arc::new(AtomicUsize::new(0));
        let profile_calls = Arc::new(AtomicUsize::new(0));

        let state = Arc::new(MockState {
            expected_code: expected_code.to_string(),
            expected_auth,
            expected_redirect_uri: config.spotify_redirect_uri,
            token,
            profile,
            token_calls: token_calls.clone(),
            profile_calls: profile_calls.clone(),
        });

        let app = Router::new()
            .route("/api/token", post(token_endpoint))
            .route("/v1/me", get(profile_endpoint))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock Spotify");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            token_calls,
            profile_calls,
        }
    }

    /// Config whose Spotify URLs point at this server.
    pub fn config(&self) -> Config {
        Config {
            spotify_accounts_url: self.base_url.clone(),
            spotify_api_url: format!("{}/v1", self.base_url),
            ..Config::test_default()
        }
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

async fn token_endpoint(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    state.token_calls.fetch_add(1, Ordering::SeqCst);

    let auth_ok = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        == Some(state.expected_auth.as_str());
    let form_ok = form.get("grant_type").map(String::as_str) == Some("authorization_code")
        && form.get("code") == Some(&state.expected_code)
        && form.get("redirect_uri") == Some(&state.expected_redirect_uri);

    if !auth_ok || !form_ok {
        return (
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant"}"#.to_string(),
        );
    }

    (state.token.status, state.token.body.clone())
}

async fn profile_endpoint(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.profile_calls.fetch_add(1, Ordering::SeqCst);

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    if !bearer.starts_with("Bearer ") {
        return (StatusCode::UNAUTHORIZED, String::new());
    }

    (state.profile.status, state.profile.body.clone())
}

/// Frontend tree with an entry document and a couple of bundled files.
pub fn test_assets() -> MemoryAssets {
    MemoryAssets::new()
        .with_file("index.html", INDEX_HTML)
        .with_file("assets/index-4f2a.js", "console.log('statify')")
        .with_file("assets/index-9c1d.css", "body { margin: 0 }")
        .with_file("favicon.svg", "<svg xmlns=\"http://www.w3.org/2000/svg\"/>")
        .with_file("my file.png", vec![0x89, b'P', b'N', b'G'])
}

/// Create a test app backed by an in-memory database.
/// Returns the router and the shared state.
pub async fn create_test_app(
    config: Config,
    assets: Arc<dyn AssetSource>,
) -> (Router, Arc<AppState>) {
    let db = SqliteDb::new_in_memory()
        .await
        .expect("Failed to open in-memory database");
    let spotify_client = SpotifyClient::new(&config).expect("Failed to build Spotify client");
    let spotify_service = SpotifyService::new(spotify_client, db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        spotify_service,
        assets,
    });

    (create_router(state.clone()), state)
}

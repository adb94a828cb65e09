// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify API client and OAuth callback handling.
//!
//! Handles:
//! - Authorization code exchange at the accounts service
//! - Fetching the authenticated user's profile
//! - Persisting the user and tokens

use crate::config::Config;
use crate::db::{SqliteDb, UpsertOutcome};
use crate::error::AppError;
use crate::models::{UserProfile, UserTokens};
use crate::time_utils::token_expiry;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::{header, StatusCode};
use serde::Deserialize;

/// Fixed timeout for every outbound call to Spotify.
pub const SPOTIFY_HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Spotify API client.
#[derive(Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    accounts_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl SpotifyClient {
    /// Create a new Spotify client from the OAuth settings in `config`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(SPOTIFY_HTTP_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            accounts_url: config.spotify_accounts_url.clone(),
            api_url: config.spotify_api_url.clone(),
            client_id: config.spotify_client_id.clone(),
            client_secret: config.spotify_client_secret.clone(),
            redirect_uri: config.spotify_redirect_uri.clone(),
        })
    }

    /// `Basic` credentials for the token endpoint.
    fn basic_auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
    }

    /// Exchange an authorization code for access and refresh tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<SpotifyTokenResponse, AppError> {
        let url = format!("{}/api/token", self.accounts_url);

        let response = self
            .http
            .post(&url)
            .header(header::AUTHORIZATION, self.basic_auth_header())
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::TokenExchange(format!("failed to make request: {}", e)))?;

        check_response_json(response, AppError::TokenExchange).await
    }

    /// Get the profile of the user the access token belongs to.
    pub async fn get_current_user(&self, access_token: &str) -> Result<SpotifyUser, AppError> {
        let url = format!("{}/me", self.api_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::UserInfo(format!("failed to make request: {}", e)))?;

        check_response_json(response, AppError::UserInfo).await
    }
}

/// Require a 200 and parse the JSON body, mapping failures with `err`.
async fn check_response_json<T, E>(response: reqwest::Response, err: E) -> Result<T, AppError>
where
    T: for<'de> Deserialize<'de>,
    E: Fn(String) -> AppError,
{
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| err(format!("failed to read response: {}", e)))?;

    if status != StatusCode::OK {
        return Err(err(format!("HTTP {}: {}", status, body)));
    }

    serde_json::from_str(&body).map_err(|e| err(format!("JSON parse error: {}", e)))
}

/// Token response from Spotify's accounts service.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub scope: String,
}

/// Profile returned by `GET /me`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// SpotifyService - login flow on top of the client
// ─────────────────────────────────────────────────────────────────────────────

/// Result of handling OAuth callback.
#[derive(Debug, Clone)]
pub struct OAuthResult {
    pub spotify_id: String,
    pub display_name: Option<String>,
    pub token_expires_at: DateTime<Utc>,
    pub outcome: UpsertOutcome,
}

/// High-level Spotify service that runs the login flow.
#[derive(Clone)]
pub struct SpotifyService {
    client: SpotifyClient,
    db: SqliteDb,
}

impl SpotifyService {
    pub fn new(client: SpotifyClient, db: SqliteDb) -> Self {
        Self { client, db }
    }

    /// Handle OAuth callback: exchange code, fetch profile, store user and tokens.
    ///
    /// Steps run in order and the first failure ends the flow; nothing is
    /// retried.
    pub async fn handle_oauth_callback(&self, code: &str) -> Result<OAuthResult, AppError> {
        let token_response = self.client.exchange_code(code).await?;
        tracing::debug!(
            token_type = %token_response.token_type,
            scope = %token_response.scope,
            expires_in = token_response.expires_in,
            "Authorization code exchanged"
        );

        let spotify_user = self
            .client
            .get_current_user(&token_response.access_token)
            .await?;

        let now = Utc::now();
        let expires_at = token_expiry(now, token_response.expires_in).ok_or_else(|| {
            AppError::TokenExchange(format!(
                "expires_in out of range: {}",
                token_response.expires_in
            ))
        })?;

        let profile = UserProfile {
            spotify_id: spotify_user.id,
            display_name: spotify_user.display_name,
            email: spotify_user.email,
        };
        let tokens = UserTokens {
            access_token: token_response.access_token,
            refresh_token: token_response.refresh_token,
            expires_at,
        };

        let outcome = self.db.upsert_user(&profile, &tokens, now).await?;

        Ok(OAuthResult {
            spotify_id: profile.spotify_id,
            display_name: profile.display_name,
            token_expires_at: expires_at,
            outcome,
        })
    }
}

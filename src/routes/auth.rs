// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spotify OAuth callback route.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;

/// Cookie carrying the logged-in user's Spotify ID.
pub const SESSION_COOKIE: &str = "spotify_user_id";

/// Session cookie lifetime.
const SESSION_MAX_AGE: time::Duration = time::Duration::hours(1);

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/login/callback", get(login_callback))
}

/// Query parameters Spotify sends to the callback.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    code: Option<String>,
    /// Set by Spotify when the user denies access.
    error: Option<String>,
}

impl CallbackParams {
    /// Collect parameters from raw query pairs. When a key repeats, the
    /// first value wins.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "code" => &mut params.code,
                "error" => &mut params.error,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

/// OAuth callback - exchange code for tokens, store the user, set the cookie.
async fn login_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<(CookieJar, Redirect)> {
    tracing::info!("Received callback request");
    let params = CallbackParams::from_pairs(pairs);

    if let Some(error) = params.error.as_deref() {
        tracing::warn!(error = %error, "OAuth error from Spotify");
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("No authorization code".to_string()))?;

    let oauth_result = state.spotify_service.handle_oauth_callback(&code).await?;

    tracing::info!(
        spotify_id = %oauth_result.spotify_id,
        display_name = oauth_result.display_name.as_deref().unwrap_or(""),
        outcome = ?oauth_result.outcome,
        token_expires_at = %format_utc_rfc3339(oauth_result.token_expires_at),
        "User authenticated successfully"
    );

    let cookie = session_cookie(oauth_result.spotify_id);
    tracing::debug!(name = SESSION_COOKIE, value = %cookie.value(), "Cookie set");

    Ok((jar.add(cookie), Redirect::to("/")))
}

/// Build the session cookie.
///
/// Readable from JavaScript, not restricted to HTTPS and unsigned: the
/// frontend reads it directly.
fn session_cookie(spotify_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, spotify_id))
        .path("/")
        .max_age(SESSION_MAX_AGE)
        .same_site(SameSite::Lax)
        .http_only(false)
        .secure(false)
        .build()
}

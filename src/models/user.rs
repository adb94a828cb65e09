//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User profile stored in the `users` table, one row per Spotify account.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Local surrogate key
    pub id: i64,
    /// Spotify user ID (unique)
    pub spotify_id: String,
    /// Display name (Spotify may return null)
    pub display_name: Option<String>,
    /// Email address (None without the user-read-email scope)
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: String,
    #[serde(skip_serializing)]
    pub refresh_token: String,
    #[serde(skip_serializing)]
    pub token_expires_at: DateTime<Utc>,
    /// When the user first logged in
    pub created_at: DateTime<Utc>,
    /// Last successful login
    pub updated_at: DateTime<Utc>,
}

/// Profile fields written on every login.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub spotify_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// OAuth tokens as stored alongside the profile.
#[derive(Debug, Clone)]
pub struct UserTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// When the access token expires
    pub expires_at: DateTime<Utc>,
}

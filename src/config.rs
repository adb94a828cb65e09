//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATABASE_URL: &str = "sqlite://statify.db?mode=rwc";
const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spotify OAuth client ID
    pub spotify_client_id: String,
    /// Spotify OAuth client secret
    pub spotify_client_secret: String,
    /// Redirect URI registered with Spotify (must point at `/login/callback`)
    pub spotify_redirect_uri: String,
    /// Base URL of the Spotify accounts service (token endpoint lives under it)
    pub spotify_accounts_url: String,
    /// Base URL of the Spotify Web API
    pub spotify_api_url: String,
    /// SQLite connection string
    pub database_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenvy::dotenv().is_err() {
            tracing::warn!(".env file not found, using system environment variables");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as missing for the required Spotify settings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            None => DEFAULT_PORT,
        };

        let config = Self {
            spotify_client_id: required("SPOTIFY_CLIENT_ID")?,
            spotify_client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            spotify_redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            spotify_accounts_url: optional("SPOTIFY_ACCOUNTS_URL", DEFAULT_SPOTIFY_ACCOUNTS_URL),
            spotify_api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port,
        };

        tracing::info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            spotify_client_id: "test_client_id".to_string(),
            spotify_client_secret: "test_secret".to_string(),
            spotify_redirect_uri: "http://127.0.0.1:3001/login/callback".to_string(),
            spotify_accounts_url: DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string(),
            spotify_api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            database_url: "sqlite::memory:".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite client wrapper with typed operations.
//!
//! Provides:
//! - Schema creation (`users`, `user_stats`)
//! - User lookup by Spotify ID
//! - Insert-or-update of a user's profile and tokens

use crate::db::tables;
use crate::error::AppError;
use crate::models::{User, UserProfile, UserTokens};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

const CREATE_USERS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        spotify_id TEXT UNIQUE NOT NULL,
        display_name TEXT,
        email TEXT,
        access_token TEXT,
        refresh_token TEXT,
        token_expires_at DATETIME,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
    )";

const CREATE_USER_STATS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS user_stats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER,
        artist_name TEXT,
        play_count INTEGER,
        last_updated DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users (id)
    )";

/// Whether an upsert created a new row or refreshed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// SQLite database client.
#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    /// Connect to the database at `url` and make sure the schema exists.
    ///
    /// In-memory URLs get a single long-lived connection, since every
    /// connection to `sqlite::memory:` opens a separate database.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let pool = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(url)
                .await
        } else {
            SqlitePoolOptions::new().connect(url).await
        }
        .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        tracing::info!("DB connection created");

        let db = Self { pool };
        db.create_tables().await?;
        Ok(db)
    }

    /// Fresh in-memory database with the schema applied.
    pub async fn new_in_memory() -> Result<Self, AppError> {
        Self::connect("sqlite::memory:").await
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection. Later queries fail with a database error.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn create_tables(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_USER_STATS_TABLE)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            tables = ?[tables::USERS, tables::USER_STATS],
            "DB tables created"
        );
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their Spotify ID.
    pub async fn get_user_by_spotify_id(&self, spotify_id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, spotify_id, display_name, email, access_token, refresh_token,
                    token_expires_at, created_at, updated_at
             FROM users WHERE spotify_id = ?",
        )
        .bind(spotify_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Create the user on first login, otherwise overwrite profile and tokens.
    ///
    /// `created_at` is only written on insert; `updated_at` is set to `now`
    /// either way.
    pub async fn upsert_user(
        &self,
        profile: &UserProfile,
        tokens: &UserTokens,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome, AppError> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE spotify_id = ?")
            .bind(&profile.spotify_id)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_none() {
            sqlx::query(
                "INSERT INTO users (spotify_id, display_name, email, access_token, refresh_token,
                                    token_expires_at, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&profile.spotify_id)
            .bind(&profile.display_name)
            .bind(&profile.email)
            .bind(&tokens.access_token)
            .bind(&tokens.refresh_token)
            .bind(tokens.expires_at)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;

            return Ok(UpsertOutcome::Created);
        }

        sqlx::query(
            "UPDATE users
             SET display_name = ?, email = ?, access_token = ?, refresh_token = ?,
                 token_expires_at = ?, updated_at = ?
             WHERE spotify_id = ?",
        )
        .bind(&profile.display_name)
        .bind(&profile.email)
        .bind(&tokens.access_token)
        .bind(&tokens.refresh_token)
        .bind(tokens.expires_at)
        .bind(now)
        .bind(&profile.spotify_id)
        .execute(&self.pool)
        .await?;

        Ok(UpsertOutcome::Updated)
    }

    /// Number of rows in `users`.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

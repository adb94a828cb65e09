//! Database layer (SQLite).

pub mod sqlite;

pub use sqlite::{SqliteDb, UpsertOutcome};

/// Table names as constants.
pub mod tables {
    pub const USERS: &str = "users";
    /// Per-artist play-count aggregates (reserved, not written yet)
    pub const USER_STATS: &str = "user_stats";
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Absolute expiry of a token issued at `issued_at` with a lifetime of
/// `expires_in` seconds. Negative lifetimes are treated as already expired.
///
/// Returns `None` when the lifetime does not fit in a `DateTime`.
pub fn token_expiry(issued_at: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    let lifetime = TimeDelta::try_seconds(expires_in.max(0))?;
    issued_at.checked_add_signed(lifetime)
}

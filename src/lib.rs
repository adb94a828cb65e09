// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Statify: Spotify login and frontend hosting
//!
//! This crate serves the embedded single-page frontend and handles the
//! Spotify OAuth callback that links a Spotify account to a local user.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SqliteDb;
use services::{AssetSource, SpotifyService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SqliteDb,
    pub spotify_service: SpotifyService,
    pub assets: Arc<dyn AssetSource>,
}

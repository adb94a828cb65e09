// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod assets;
pub mod spotify;

pub use assets::{AssetSource, EmbeddedAssets, MemoryAssets};
pub use spotify::{OAuthResult, SpotifyClient, SpotifyService};

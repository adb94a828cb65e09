// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Frontend asset serving with single-page-app fallback.

use axum::{
    extract::State,
    http::{header, Uri},
    response::{IntoResponse, Response},
};
use std::borrow::Cow;
use std::sync::Arc;

use crate::error::AppError;
use crate::services::assets;
use crate::AppState;

/// Serve the file matching the request path, or the entry document.
///
/// Mounted as the router fallback, so it sees every path no other route claims.
pub async fn serve(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let raw_path = uri.path();
    let path = urlencoding::decode(raw_path).unwrap_or(Cow::Borrowed(raw_path));

    match assets::resolve(state.assets.as_ref(), &path) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.data).into_response(),
        None => {
            tracing::debug!(path = %path, "Asset not found");
            AppError::NotFound.into_response()
        }
    }
}

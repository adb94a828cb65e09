// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only frontend asset tree and single-page-app path resolution.

use rust_embed::Embed;
use std::borrow::Cow;
use std::collections::HashMap;

/// Entry document, served for `/` and for unmatched paths.
pub const ENTRY_DOCUMENT: &str = "/index.html";

pub const CONTENT_TYPE_HTML: &str = "text/html";

/// Read-only lookup from a relative path to file contents.
pub trait AssetSource: Send + Sync {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>>;
}

/// Frontend build output compiled into the binary.
#[derive(Embed)]
#[folder = "frontend/dist/"]
struct Dist;

/// `AssetSource` backed by the embedded `frontend/dist` bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        Dist::get(path).map(|file| file.data)
    }
}

/// In-memory `AssetSource`, used for tests and for serving a fixed file set.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, keyed by its path relative to the tree root.
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl AssetSource for MemoryAssets {
    fn get(&self, path: &str) -> Option<Cow<'static, [u8]>> {
        self.files.get(path).map(|data| Cow::Owned(data.clone()))
    }
}

/// A resolved file ready to be written to the response.
#[derive(Debug, Clone)]
pub struct Asset {
    pub data: Cow<'static, [u8]>,
    pub content_type: &'static str,
}

/// Content type for a path, from its lower-cased extension.
///
/// The extension is whatever follows the last `.` of the final segment, so
/// a dotfile such as `/.png` counts as a `png`.
pub fn content_type_for(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path);
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") => CONTENT_TYPE_HTML,
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Resolve a request path against `source`.
///
/// `/` maps to the entry document. Unknown paths fall back to the entry
/// document as HTML; `None` means not found, which only happens when the
/// entry document itself is unavailable.
pub fn resolve(source: &dyn AssetSource, request_path: &str) -> Option<Asset> {
    let url_path = if request_path == "/" {
        ENTRY_DOCUMENT
    } else {
        request_path
    };

    let file_path = url_path.strip_prefix('/').unwrap_or(url_path);

    if let Some(data) = source.get(file_path) {
        return Some(Asset {
            data,
            content_type: content_type_for(url_path),
        });
    }

    if url_path == ENTRY_DOCUMENT {
        return None;
    }

    let entry = ENTRY_DOCUMENT.trim_start_matches('/');
    source.get(entry).map(|data| Asset {
        data,
        content_type: CONTENT_TYPE_HTML,
    })
}

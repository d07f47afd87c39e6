//! Static asset registration.
//!
//! Assets are registered explicitly during application startup rather than
//! pulled in as implicit imports: the registry is built once, frozen, and
//! served under the `/_assets` prefix (which the exclusion matcher keeps
//! out of locale routing).

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

const ADMIN_STYLESHEET: &str = include_str!("../assets/admin.css");

/// One registered asset.
#[derive(Debug, Clone)]
pub struct Asset {
    pub content_type: &'static str,
    pub body: &'static [u8],
}

/// Immutable registry of static assets, keyed by path relative to the
/// asset prefix.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<String, Asset>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in assets the gateway itself needs.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("admin.css", "text/css; charset=utf-8", ADMIN_STYLESHEET.as_bytes());
        registry
    }

    pub fn register(&mut self, path: impl Into<String>, content_type: &'static str, body: &'static [u8]) {
        self.assets.insert(path.into(), Asset { content_type, body });
    }

    pub fn get(&self, path: &str) -> Option<&Asset> {
        self.assets.get(path)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Serve a registered asset, or 404 for anything unregistered.
pub async fn serve_asset(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    match state.assets.get(&path) {
        Some(asset) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, asset.content_type),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            asset.body,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_contains_admin_stylesheet() {
        let registry = AssetRegistry::builtin();
        let asset = registry.get("admin.css").unwrap();
        assert_eq!(asset.content_type, "text/css; charset=utf-8");
        assert!(!asset.body.is_empty());
    }

    #[test]
    fn unregistered_paths_are_absent() {
        let registry = AssetRegistry::builtin();
        assert!(registry.get("missing.js").is_none());
    }

    #[test]
    fn registration_is_explicit() {
        let mut registry = AssetRegistry::new();
        assert!(registry.is_empty());
        registry.register("app.js", "text/javascript", b"console.log(1)");
        assert_eq!(registry.len(), 1);
    }
}

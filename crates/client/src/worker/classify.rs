//! Pure request classification feeding the strategy table.
//!
//! Keeping this free of I/O means each strategy can be unit-tested against
//! a mocked fetch/cache pair without touching the classification logic,
//! and vice versa.

use http::Method;

use super::fetch::{FetchRequest, RequestMode};

/// File extensions treated as static app-shell assets.
pub const STATIC_EXTENSIONS: &[&str] = &[
    ".js", ".css", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".woff", ".woff2", ".ttf", ".eot",
];

/// What kind of request the routing policy is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestClass {
    /// Full-page load.
    Navigation,
    /// Script, stylesheet, image or font, matched by extension.
    StaticAsset,
    /// Everything else: API calls and dynamic content.
    Dynamic,
}

/// Caching strategy applied to a request class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Network first; cache fallback; offline placeholder as last resort.
    NetworkFirstWithOffline,
    /// Cached copy immediately, refreshed from the network afterwards
    /// (stale-while-revalidate); network when not cached.
    CacheFirstRevalidate,
    /// Network first; fall back to any cached match.
    NetworkFirst,
}

/// Whether the worker answers this request at all.
///
/// Non-GET requests and non-http(s) schemes (browser extensions, data
/// URLs) pass through untouched.
#[must_use]
pub fn is_interceptable(request: &FetchRequest) -> bool {
    request.method == Method::GET && matches!(request.url.scheme(), "http" | "https")
}

/// Classify a request for the policy table.
#[must_use]
pub fn classify(request: &FetchRequest) -> RequestClass {
    if request.mode == RequestMode::Navigate {
        return RequestClass::Navigation;
    }

    let path = request.url.path();
    if STATIC_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        RequestClass::StaticAsset
    } else {
        RequestClass::Dynamic
    }
}

/// The policy table: which strategy serves which request class.
#[must_use]
pub const fn strategy_for(class: RequestClass) -> Strategy {
    match class {
        RequestClass::Navigation => Strategy::NetworkFirstWithOffline,
        RequestClass::StaticAsset => Strategy::CacheFirstRevalidate,
        RequestClass::Dynamic => Strategy::NetworkFirst,
    }
}

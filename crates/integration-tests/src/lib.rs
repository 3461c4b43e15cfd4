//! Integration tests for Özlasteksan.
//!
//! Tests live in `tests/` and exercise the site router in-process via
//! `tower::ServiceExt::oneshot` plus the offline worker and tracked
//! lists with in-memory fakes. No sockets are bound and no external
//! services are required.
//!
//! # Test Categories
//!
//! - `site_routes` - Router responses, headers, and error paths
//! - `lead_forms` - Contact and quote form submission flows
//! - `offline_flow` - Worker lifecycle and cross-tab list sync

use std::path::PathBuf;

use ozlasteksan_site::config::SiteConfig;
use ozlasteksan_site::state::AppState;

/// Build an application state with a localhost test configuration.
#[must_use]
pub fn test_state() -> AppState {
    #[allow(clippy::unwrap_used)]
    let config = SiteConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost".to_string(),
        sentry_dsn: None,
    };
    AppState::new(config)
}

/// Filesystem location of the site's static asset tree, anchored at this
/// crate's manifest directory so tests pass regardless of working directory.
#[must_use]
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../site/static")
}

/// Build the full site router backed by a fresh test state.
#[must_use]
pub fn test_app() -> axum::Router {
    ozlasteksan_site::app(test_state(), static_dir())
}

//! Özlasteksan Site library.
//!
//! This crate provides the public marketing/catalog site as a library,
//! allowing the router to be exercised in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use state::AppState;

/// Path of the content-hashed stylesheet every rendered page links.
///
/// The hash comes from the build script; offline workers register this
/// path as an app-shell asset since it cannot be a compile-time constant
/// of the client crate.
pub const HASHED_CSS_PATH: &str = concat!("/static/css/derived/site.", env!("CSS_HASH"), ".css");

/// Build the full application router.
///
/// `static_dir` is the filesystem location of the `static/` asset tree;
/// the binary passes the crate-relative path, tests pass a path anchored
/// at their own manifest directory.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. There are no backing services
/// to probe - the catalog is in-memory.
async fn health() -> &'static str {
    "ok"
}

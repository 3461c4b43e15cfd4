//! Request/response model and the worker's injected I/O seams.
//!
//! The worker never talks to a real network or a real cache store; it sees
//! a [`NetworkClient`] and a [`CacheBackend`]. The browser shell wires
//! these to `fetch` and the Cache API; tests wire them to the in-memory
//! fakes in [`crate::worker::fakes`].

use bytes::Bytes;
use http::{Method, StatusCode};
use thiserror::Error;
use url::Url;

/// How the request was initiated, as far as the routing policy cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// A full-page load.
    Navigate,
    /// Everything else (subresource, API call).
    Resource,
}

/// An intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub mode: RequestMode,
}

impl FetchRequest {
    /// A GET subresource/API request.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            mode: RequestMode::Resource,
        }
    }

    /// A GET navigation (full-page load).
    #[must_use]
    pub fn navigation(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            mode: RequestMode::Navigate,
        }
    }

    /// The cache key for this request: its full URL.
    #[must_use]
    pub fn cache_key(&self) -> &str {
        self.url.as_str()
    }
}

/// Response visibility, mirroring the fetch response `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Same-origin response with readable body.
    Basic,
    /// Cross-origin response with an unreadable body. Never cached.
    Opaque,
    /// Synthesized error response.
    Error,
}

/// A response body as the worker stores and serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerResponse {
    pub status: StatusCode,
    pub kind: ResponseKind,
    pub body: Bytes,
    pub url: String,
}

impl WorkerResponse {
    /// A same-origin 200 response.
    #[must_use]
    pub fn basic(url: &str, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            kind: ResponseKind::Basic,
            body: body.into(),
            url: url.to_string(),
        }
    }

    /// The synthesized last-resort response when the network is down and
    /// nothing relevant is cached.
    #[must_use]
    pub fn service_unavailable() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            kind: ResponseKind::Error,
            body: Bytes::from_static(b"offline"),
            url: String::new(),
        }
    }

    /// Whether this response may be stored in the runtime generation:
    /// status exactly 200 and a same-origin basic body. Opaque
    /// cross-origin responses and error bodies are never cached.
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.status == StatusCode::OK && self.kind == ResponseKind::Basic
    }
}

/// Network fetch failure (rejection). The routing policy reacts to this
/// and nothing else - there are no explicit timeouts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    Network(String),
}

/// Cache backend failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Durable store of responses, grouped into named cache generations.
#[allow(async_fn_in_trait)]
pub trait CacheBackend {
    /// Store `response` under `url` in the generation named `cache`,
    /// creating the generation if needed.
    async fn put(&self, cache: &str, url: &str, response: WorkerResponse)
    -> Result<(), CacheError>;

    /// Look up `url` in one generation.
    async fn lookup(&self, cache: &str, url: &str) -> Result<Option<WorkerResponse>, CacheError>;

    /// Look up `url` across all generations, first match wins.
    async fn lookup_any(&self, url: &str) -> Result<Option<WorkerResponse>, CacheError>;

    /// Names of all existing generations.
    async fn cache_names(&self) -> Result<Vec<String>, CacheError>;

    /// Delete a whole generation. Returns whether it existed.
    async fn delete_cache(&self, name: &str) -> Result<bool, CacheError>;

    /// Requests queued in `cache` (used for the form replay queue).
    async fn queued_requests(&self, cache: &str) -> Result<Vec<FetchRequest>, CacheError>;

    /// Remove a single entry. Returns whether it existed.
    async fn remove_entry(&self, cache: &str, url: &str) -> Result<bool, CacheError>;
}

/// The network, as the worker sees it: a fetch either resolves with a
/// response or fails. Cancellation is not modeled.
#[allow(async_fn_in_trait)]
pub trait NetworkClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<WorkerResponse, FetchError>;
}

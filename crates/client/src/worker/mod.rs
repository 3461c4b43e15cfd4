//! The offline cache worker.
//!
//! Lifecycle mirrors the service worker model: `Installing → Waiting →
//! Activating → Activated`, with `Redundant` as the terminal failure
//! state. On install the fixed app-shell list is fetched and committed to
//! a versioned static generation, all-or-nothing. On activation every
//! stale generation of this application's cache family is pruned and the
//! worker starts answering fetches immediately (no reload required).
//!
//! Per-request routing is the composition of two pure functions -
//! [`classify::classify`] and [`classify::strategy_for`] - and three
//! strategy implementations:
//!
//! - navigations: network first, runtime-cache the copy, fall back to the
//!   cache and then to the offline placeholder;
//! - static assets: cache first with a background-style refresh
//!   (stale-while-revalidate);
//! - everything else: network first with cache fallback, storing only
//!   successful same-origin responses.
//!
//! The worker also carries three independent best-effort duties: replaying
//! queued form submissions ([`Worker::sync`]), rendering push
//! notifications ([`push`]), and the skip-waiting control message.

pub mod classify;
pub mod fakes;
pub mod fetch;
pub mod push;

use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::events::{ChangeEvent, EventSink};

pub use classify::{RequestClass, Strategy, STATIC_EXTENSIONS};
pub use fetch::{
    CacheBackend, CacheError, FetchError, FetchRequest, NetworkClient, RequestMode, ResponseKind,
    WorkerResponse,
};
pub use push::{
    build_notification, notification_click, ClickOutcome, Notification, NotificationAction,
};

/// Prefix shared by every cache generation this application owns.
pub const CACHE_FAMILY: &str = "ozlasteksan-";
/// The runtime generation: grows opportunistically, survives upgrades.
pub const RUNTIME_CACHE: &str = "ozlasteksan-runtime";
/// Queue of failed form submissions awaiting replay. Not part of the
/// cache family, so activation never prunes it.
pub const FORM_DATA_CACHE: &str = "form-data";
/// Background sync tag that triggers form replay.
pub const SYNC_FORMS_TAG: &str = "sync-forms";
/// The offline placeholder document.
pub const OFFLINE_URL: &str = "/offline.html";
/// Version baked into the static generation name.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// App-shell resources cached during install. All must be fetchable at
/// install time or installation fails. Assets whose URL is only known at
/// build time (the content-hashed stylesheet) are added per worker via
/// [`Worker::precache_asset`].
pub const STATIC_CACHE_URLS: &[&str] = &[
    "/",
    "/about",
    "/products",
    "/contact",
    "/quote",
    "/static/js/site.js",
    "/manifest.json",
    OFFLINE_URL,
];

/// Worker lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerPhase {
    Installing,
    Waiting,
    Activating,
    Activated,
    Redundant,
}

/// Control messages the page can post to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Force a waiting worker to activate now instead of at next reload.
    SkipWaiting,
}

/// What the worker decided for an intercepted fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The worker does not answer; the request proceeds untouched.
    PassThrough,
    /// The worker answers with this response.
    Respond(WorkerResponse),
}

/// Install failure. Fatal to this worker version only - the page keeps
/// running on whatever was active before.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("app-shell url {url} could not be fetched: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("app-shell url {url} answered {status}")]
    BadStatus { url: String, status: u16 },
    #[error("invalid app-shell url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// The offline cache worker. Generic over its I/O seams so the whole
/// lifecycle runs against in-memory fakes in tests.
pub struct Worker<C, N, E> {
    origin: Url,
    version: String,
    static_cache_name: String,
    phase: WorkerPhase,
    extra_shell: Vec<String>,
    caches: Arc<C>,
    network: Arc<N>,
    events: Arc<E>,
}

impl<C: CacheBackend, N: NetworkClient, E: EventSink> Worker<C, N, E> {
    /// Create a worker scoped to `origin` at [`DEFAULT_VERSION`].
    #[must_use]
    pub fn new(origin: Url, caches: Arc<C>, network: Arc<N>, events: Arc<E>) -> Self {
        Self::with_version(origin, DEFAULT_VERSION, caches, network, events)
    }

    /// Create a worker for a specific deployed version.
    #[must_use]
    pub fn with_version(
        origin: Url,
        version: &str,
        caches: Arc<C>,
        network: Arc<N>,
        events: Arc<E>,
    ) -> Self {
        Self {
            origin,
            version: version.to_string(),
            static_cache_name: format!("{CACHE_FAMILY}v{version}"),
            phase: WorkerPhase::Installing,
            extra_shell: Vec::new(),
            caches,
            network,
            events,
        }
    }

    /// Add a page asset to the app-shell install list.
    ///
    /// For assets whose path is only known at build or deploy time, like
    /// the content-hashed stylesheet every page links. Must be called
    /// before [`Worker::install`].
    pub fn precache_asset(&mut self, path: impl Into<String>) {
        self.extra_shell.push(path.into());
    }

    #[must_use]
    pub const fn phase(&self) -> WorkerPhase {
        self.phase
    }

    /// Name of this version's static generation.
    #[must_use]
    pub fn static_cache_name(&self) -> &str {
        &self.static_cache_name
    }

    /// Populate the static generation with the app-shell list.
    ///
    /// All-or-nothing: every URL is fetched and buffered first, and
    /// nothing is committed unless all of them succeeded. On success the
    /// worker is `Waiting` and a [`ChangeEvent::CacheUpdateAvailable`] is
    /// emitted so the page can offer the refresh.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError`] if any app-shell URL cannot be fetched or
    /// answers with a non-success status; the worker becomes `Redundant`.
    pub async fn install(&mut self) -> Result<(), InstallError> {
        self.phase = WorkerPhase::Installing;
        tracing::info!(cache = %self.static_cache_name, "worker installing");

        let shell = STATIC_CACHE_URLS
            .iter()
            .copied()
            .chain(self.extra_shell.iter().map(String::as_str));

        let mut staged = Vec::with_capacity(STATIC_CACHE_URLS.len() + self.extra_shell.len());
        for path in shell {
            let url = match self.origin.join(path) {
                Ok(url) => url,
                Err(source) => {
                    self.phase = WorkerPhase::Redundant;
                    return Err(InstallError::InvalidUrl(source));
                }
            };
            let request = FetchRequest::get(url);
            let response = match self.network.fetch(&request).await {
                Ok(response) => response,
                Err(source) => {
                    self.phase = WorkerPhase::Redundant;
                    return Err(InstallError::Fetch {
                        url: request.url.to_string(),
                        source,
                    });
                }
            };
            if !response.status.is_success() {
                self.phase = WorkerPhase::Redundant;
                return Err(InstallError::BadStatus {
                    url: request.url.to_string(),
                    status: response.status.as_u16(),
                });
            }
            staged.push((request.cache_key().to_string(), response));
        }

        for (url, response) in staged {
            if let Err(err) = self.caches.put(&self.static_cache_name, &url, response).await {
                // Roll back the partially committed generation.
                let _ = self.caches.delete_cache(&self.static_cache_name).await;
                self.phase = WorkerPhase::Redundant;
                return Err(err.into());
            }
        }

        self.phase = WorkerPhase::Waiting;
        self.events.emit(ChangeEvent::CacheUpdateAvailable {
            version: self.version.clone(),
        });
        tracing::info!(cache = %self.static_cache_name, "worker installed");
        Ok(())
    }

    /// Prune stale generations and take control.
    ///
    /// Deletes every cache whose name belongs to this application's
    /// family but is neither the current static generation nor the
    /// runtime generation. The worker then answers fetches immediately
    /// rather than waiting for a reload.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be enumerated.
    pub async fn activate(&mut self) -> Result<(), CacheError> {
        self.phase = WorkerPhase::Activating;

        for name in self.caches.cache_names().await? {
            let stale = name.starts_with(CACHE_FAMILY)
                && name != self.static_cache_name
                && name != RUNTIME_CACHE;
            if stale && self.caches.delete_cache(&name).await? {
                tracing::info!(cache = %name, "pruned stale cache generation");
            }
        }

        self.phase = WorkerPhase::Activated;
        tracing::info!(cache = %self.static_cache_name, "worker activated");
        Ok(())
    }

    /// Route an intercepted fetch.
    ///
    /// Non-GET requests, non-http(s) schemes and anything seen before
    /// activation pass through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] only for backend failures; network failures
    /// are handled by the fallback policy and never escape.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> Result<FetchOutcome, CacheError> {
        if self.phase != WorkerPhase::Activated || !classify::is_interceptable(request) {
            return Ok(FetchOutcome::PassThrough);
        }

        let response = match classify::strategy_for(classify::classify(request)) {
            Strategy::NetworkFirstWithOffline => self.navigation(request).await?,
            Strategy::CacheFirstRevalidate => self.static_asset(request).await?,
            Strategy::NetworkFirst => self.dynamic(request).await?,
        };
        Ok(FetchOutcome::Respond(response))
    }

    /// Navigation: network first, cache fallback, offline placeholder.
    async fn navigation(&self, request: &FetchRequest) -> Result<WorkerResponse, CacheError> {
        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.caches
                        .put(RUNTIME_CACHE, request.cache_key(), response.clone())
                        .await?;
                }
                Ok(response)
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "navigation fetch failed, falling back");
                if let Some(cached) = self.caches.lookup_any(request.cache_key()).await? {
                    return Ok(cached);
                }
                let offline = self
                    .origin
                    .join(OFFLINE_URL)
                    .ok()
                    .map(|url| url.to_string());
                if let Some(offline_url) = offline {
                    if let Some(cached) = self.caches.lookup_any(&offline_url).await? {
                        return Ok(cached);
                    }
                }
                Ok(WorkerResponse::service_unavailable())
            }
        }
    }

    /// Static asset: cache first, refreshed from the network afterwards.
    async fn static_asset(&self, request: &FetchRequest) -> Result<WorkerResponse, CacheError> {
        if let Some(cached) = self.caches.lookup_any(request.cache_key()).await? {
            self.revalidate(request).await;
            return Ok(cached);
        }

        match self.fetch_and_cache(request).await? {
            Some(response) => Ok(response),
            None => Ok(WorkerResponse::service_unavailable()),
        }
    }

    /// Dynamic content: network first, cache fallback.
    async fn dynamic(&self, request: &FetchRequest) -> Result<WorkerResponse, CacheError> {
        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.caches
                        .put(RUNTIME_CACHE, request.cache_key(), response.clone())
                        .await?;
                }
                Ok(response)
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "dynamic fetch failed, trying cache");
                match self.caches.lookup_any(request.cache_key()).await? {
                    Some(cached) => Ok(cached),
                    None => Ok(WorkerResponse::service_unavailable()),
                }
            }
        }
    }

    /// Refresh the runtime cache from the network. Best effort: failures
    /// are logged and the already-served cached copy stands.
    async fn revalidate(&self, request: &FetchRequest) {
        match self.fetch_and_cache(request).await {
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "revalidation failed");
            }
        }
    }

    /// Fetch and, when the response is a cacheable success, store a copy
    /// in the runtime generation. `None` means the network failed.
    async fn fetch_and_cache(
        &self,
        request: &FetchRequest,
    ) -> Result<Option<WorkerResponse>, CacheError> {
        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    self.caches
                        .put(RUNTIME_CACHE, request.cache_key(), response.clone())
                        .await?;
                }
                Ok(Some(response))
            }
            Err(err) => {
                tracing::debug!(url = %request.url, error = %err, "network fetch failed");
                Ok(None)
            }
        }
    }

    /// Handle a background sync event.
    ///
    /// For the [`SYNC_FORMS_TAG`] tag, replays every queued form
    /// submission and evicts an entry only when its refetch succeeded.
    /// All failures are logged and swallowed.
    pub async fn sync(&self, tag: &str) {
        if tag != SYNC_FORMS_TAG {
            return;
        }
        if let Err(err) = self.replay_queued_forms().await {
            tracing::warn!(error = %err, "form replay failed");
        }
    }

    async fn replay_queued_forms(&self) -> Result<(), CacheError> {
        for request in self.caches.queued_requests(FORM_DATA_CACHE).await? {
            match self.network.fetch(&request).await {
                Ok(response) if response.status.is_success() => {
                    self.caches
                        .remove_entry(FORM_DATA_CACHE, request.cache_key())
                        .await?;
                    tracing::info!(url = %request.url, "queued form submission replayed");
                }
                Ok(response) => {
                    tracing::debug!(url = %request.url, status = response.status.as_u16(), "form replay rejected, kept in queue");
                }
                Err(err) => {
                    tracing::debug!(url = %request.url, error = %err, "form replay failed, kept in queue");
                }
            }
        }
        Ok(())
    }

    /// Handle a control message from the page.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if skip-waiting activation cannot enumerate
    /// the cache backend.
    pub async fn on_message(&mut self, message: WorkerMessage) -> Result<(), CacheError> {
        match message {
            WorkerMessage::SkipWaiting => {
                if self.phase == WorkerPhase::Waiting {
                    tracing::info!("skip-waiting requested, activating now");
                    self.activate().await?;
                }
                Ok(())
            }
        }
    }
}

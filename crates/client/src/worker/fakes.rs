//! In-memory doubles for the worker's I/O seams.
//!
//! Used by this crate's unit tests and by the workspace integration
//! tests; also handy for embedding the worker in a native shell that has
//! no real Cache API.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::fetch::{
    CacheBackend, CacheError, FetchError, FetchRequest, NetworkClient, WorkerResponse,
};

/// In-memory [`CacheBackend`]: named generations of URL-keyed responses,
/// plus per-cache request queues for the form replay path.
#[derive(Debug, Default)]
pub struct InMemoryCaches {
    stores: Mutex<BTreeMap<String, BTreeMap<String, WorkerResponse>>>,
    queues: Mutex<BTreeMap<String, Vec<FetchRequest>>>,
}

impl InMemoryCaches {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request in `cache` (the page does this when a form
    /// submission fails while offline).
    pub fn queue_request(&self, cache: &str, request: FetchRequest) {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(cache.to_string())
            .or_default()
            .push(request);
    }

    /// Whether `url` is stored in `cache`.
    #[must_use]
    pub fn contains(&self, cache: &str, url: &str) -> bool {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(cache)
            .is_some_and(|entries| entries.contains_key(url))
    }

    /// URLs stored in `cache`, in key order.
    #[must_use]
    pub fn urls_in(&self, cache: &str) -> Vec<String> {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(cache)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl CacheBackend for InMemoryCaches {
    async fn put(
        &self,
        cache: &str,
        url: &str,
        response: WorkerResponse,
    ) -> Result<(), CacheError> {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(cache.to_string())
            .or_default()
            .insert(url.to_string(), response);
        Ok(())
    }

    async fn lookup(&self, cache: &str, url: &str) -> Result<Option<WorkerResponse>, CacheError> {
        Ok(self
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(cache)
            .and_then(|entries| entries.get(url).cloned()))
    }

    async fn lookup_any(&self, url: &str) -> Result<Option<WorkerResponse>, CacheError> {
        Ok(self
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find_map(|entries| entries.get(url).cloned()))
    }

    async fn cache_names(&self) -> Result<Vec<String>, CacheError> {
        let mut names: Vec<String> = self
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        for name in self
            .queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
        {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        Ok(names)
    }

    async fn delete_cache(&self, name: &str) -> Result<bool, CacheError> {
        let stored = self
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();
        let queued = self
            .queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some();
        Ok(stored || queued)
    }

    async fn queued_requests(&self, cache: &str) -> Result<Vec<FetchRequest>, CacheError> {
        Ok(self
            .queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(cache)
            .cloned()
            .unwrap_or_default())
    }

    async fn remove_entry(&self, cache: &str, url: &str) -> Result<bool, CacheError> {
        let stored = self
            .stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(cache)
            .and_then(|entries| entries.remove(url))
            .is_some();

        let mut queues = self.queues.lock().unwrap_or_else(PoisonError::into_inner);
        let queued = if let Some(queue) = queues.get_mut(cache) {
            let before = queue.len();
            queue.retain(|req| req.url.as_str() != url);
            queue.len() != before
        } else {
            false
        };

        Ok(stored || queued)
    }
}

/// Scripted [`NetworkClient`] that records every fetch.
#[derive(Debug, Default)]
pub struct ScriptedNetwork {
    responses: Mutex<BTreeMap<String, WorkerResponse>>,
    failing: Mutex<HashSet<String>>,
    offline: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedNetwork {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for `url`.
    pub fn respond(&self, url: &str, response: WorkerResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), response);
    }

    /// Script a 200 same-origin text response for `url`.
    pub fn respond_ok(&self, url: &str, body: &str) {
        self.respond(url, WorkerResponse::basic(url, body.as_bytes().to_vec()));
    }

    /// Make fetches of `url` fail.
    pub fn fail(&self, url: &str) {
        self.failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string());
    }

    /// Make every fetch fail.
    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    /// Restore scripted responses after [`Self::go_offline`].
    pub fn go_online(&self) {
        self.offline.store(false, Ordering::SeqCst);
    }

    /// Every fetched URL, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `url` was fetched.
    #[must_use]
    pub fn call_count(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|called| called.as_str() == url)
            .count()
    }
}

impl NetworkClient for ScriptedNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<WorkerResponse, FetchError> {
        let url = request.url.as_str().to_string();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());

        if self.offline.load(Ordering::SeqCst) {
            return Err(FetchError::Network("offline".to_string()));
        }
        if self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&url)
        {
            return Err(FetchError::Network(format!("connection refused: {url}")));
        }

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&url)
            .cloned()
            .ok_or_else(|| FetchError::Network(format!("no route to {url}")))
    }
}

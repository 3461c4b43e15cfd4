//! Durable key-value storage behind the list managers.
//!
//! The browser shell backs this with `localStorage`; tests and the
//! cross-tab simulation use [`InMemoryStore`]. Values are opaque strings -
//! the managers serialize their own JSON.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors surfaced by a [`ListStore`].
///
/// All of these are soft failures: the managers report them through a
/// warning event and keep running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store refused the write (quota exceeded).
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// The backing store is unusable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable string storage keyed by a fixed string key.
pub trait ListStore {
    /// Read the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory [`ListStore`].
///
/// Shared via `Arc`, it doubles as the "same backing store observed by two
/// tabs" fixture: two managers holding the same `InMemoryStore` see each
/// other's writes exactly like two tabs sharing `localStorage`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, for assertions on persisted state.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl ListStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

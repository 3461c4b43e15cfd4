//! Özlasteksan Client - offline cache worker and list managers.
//!
//! This crate holds the client-side machinery of the Özlasteksan site,
//! written as plain logic over injected dependencies so every piece can be
//! exercised with in-memory fakes:
//!
//! - [`worker`] - the offline cache worker: per-request routing between
//!   cache-first, network-first and offline-fallback strategies, versioned
//!   cache generations pruned on activation, queued form replay, push
//!   notifications and the skip-waiting control message.
//! - [`lists`] - the favorites and comparison list managers: bounded,
//!   deduplicated, persisted lists of product identifiers with change
//!   events and cross-tab reconciliation.
//!
//! The two facilities do not call each other; they share only the
//! [`events`] contract that UI fragments subscribe to.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod events;
pub mod lists;
pub mod storage;
pub mod worker;

pub use events::{ChangeEvent, EventSink, NullSink, RecordingSink};
pub use lists::{
    AddOutcome, ClearOutcome, Confirmation, ListKind, ToggleOutcome, TrackedList,
    COMPARISON_KEY, FAVORITES_KEY, MAX_COMPARISON, MAX_FAVORITES, MIN_COMPARISON,
};
pub use storage::{InMemoryStore, ListStore, StorageError};
pub use worker::{
    FetchOutcome, FetchRequest, RequestMode, ResponseKind, Worker, WorkerMessage, WorkerPhase,
    WorkerResponse, OFFLINE_URL, RUNTIME_CACHE, STATIC_CACHE_URLS,
};

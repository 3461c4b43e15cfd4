//! Change events emitted by the list managers and the cache worker.
//!
//! Counters, buttons and modals all re-render from these notifications
//! instead of polling the managers, so the transport is deliberately
//! narrow: a sink receives the full updated list (or update signal) and
//! fans it out however the embedding shell wants.

use std::sync::{Mutex, PoisonError};

/// A notification about client-side state that UI fragments subscribe to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The favorites list changed; carries the new list and its count.
    FavoritesChanged { items: Vec<String>, count: usize },
    /// The comparison list changed; carries the new list and its count.
    ComparisonChanged { items: Vec<String>, count: usize },
    /// A new worker version finished installing and is waiting to take over.
    CacheUpdateAvailable { version: String },
    /// A soft, user-visible warning (list full, persistence failed).
    /// Never fatal; the application stays usable.
    Warning { key: String, message: String },
}

/// Receiver for [`ChangeEvent`]s.
///
/// Implementations must not panic; emitting an event is always best effort.
pub trait EventSink {
    fn emit(&self, event: ChangeEvent);
}

/// Sink that drops every event. Useful when a caller only wants return
/// values and has no UI to notify.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ChangeEvent) {}
}

/// Sink that records every event in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<ChangeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Number of emitted events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ChangeEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(ChangeEvent::CacheUpdateAvailable {
            version: "1.0.0".to_string(),
        });
        sink.emit(ChangeEvent::FavoritesChanged {
            items: vec!["1".to_string()],
            count: 1,
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events.first(),
            Some(ChangeEvent::CacheUpdateAvailable { .. })
        ));
        assert!(matches!(
            sink.last(),
            Some(ChangeEvent::FavoritesChanged { count: 1, .. })
        ));
    }

    #[test]
    fn test_null_sink_is_silent() {
        // Compiles and does nothing; the point is the trait object shape.
        NullSink.emit(ChangeEvent::Warning {
            key: "k".to_string(),
            message: "m".to_string(),
        });
    }
}

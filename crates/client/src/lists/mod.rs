//! Bounded, deduplicated, persisted lists of product identifiers.
//!
//! Two instances exist in the shell: the favorites list (up to 50 entries)
//! and the comparison list (up to 4 entries, 2 required before a
//! comparison can be shown). Both persist a JSON array of ID strings under
//! a fixed storage key, emit a change event after every successful
//! mutation, and reconcile with writes made by other tabs via
//! [`TrackedList::on_external_change`]. Concurrent edits from two tabs are
//! resolved last-writer-wins - no merging.

use std::sync::Arc;

use crate::events::{ChangeEvent, EventSink};
use crate::storage::ListStore;

/// Storage key for the favorites list.
pub const FAVORITES_KEY: &str = "ozlasteksan_favorites";
/// Storage key for the comparison list.
pub const COMPARISON_KEY: &str = "ozlasteksan_comparison";

/// Maximum number of favorite products.
pub const MAX_FAVORITES: usize = 50;
/// Maximum number of products in a comparison.
pub const MAX_COMPARISON: usize = 4;
/// Minimum number of products required to show a comparison.
pub const MIN_COMPARISON: usize = 2;

/// Which list a manager instance maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Favorites,
    Comparison,
}

/// Result of [`TrackedList::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended and persisted.
    Added,
    /// Already in the list; nothing changed.
    AlreadyPresent,
    /// List is at its maximum; a warning event was emitted.
    Rejected,
    /// Empty identifier; ignored.
    IgnoredEmpty,
}

/// Result of [`TrackedList::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The add side was rejected (list full) or the id was empty.
    Unchanged,
}

/// Caller-side confirmation state for [`TrackedList::clear`].
///
/// Clearing favorites is destructive enough that the UI asks first; the
/// manager models that as a two-step contract so it stays testable with no
/// UI attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Requested,
    Confirmed,
}

/// Result of [`TrackedList::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Emptied and persisted.
    Cleared,
    /// Nothing changed; the caller must come back with
    /// [`Confirmation::Confirmed`].
    ConfirmationRequired,
}

/// A bounded, deduplicated, persisted list of product identifier strings.
///
/// Storage and event delivery are injected so the manager runs identically
/// against browser storage, an in-memory fake, or anything else.
pub struct TrackedList<S, E> {
    kind: ListKind,
    key: &'static str,
    max: usize,
    floor: Option<usize>,
    items: Vec<String>,
    store: Arc<S>,
    events: Arc<E>,
}

impl<S: ListStore, E: EventSink> TrackedList<S, E> {
    /// Create the favorites manager and load its persisted state.
    pub fn favorites(store: Arc<S>, events: Arc<E>) -> Self {
        let mut list = Self {
            kind: ListKind::Favorites,
            key: FAVORITES_KEY,
            max: MAX_FAVORITES,
            floor: None,
            items: Vec::new(),
            store,
            events,
        };
        list.load();
        list
    }

    /// Create the comparison manager and load its persisted state.
    pub fn comparison(store: Arc<S>, events: Arc<E>) -> Self {
        let mut list = Self {
            kind: ListKind::Comparison,
            key: COMPARISON_KEY,
            max: MAX_COMPARISON,
            floor: Some(MIN_COMPARISON),
            items: Vec::new(),
            store,
            events,
        };
        list.load();
        list
    }

    /// Reload the in-memory list from the store.
    ///
    /// Fails soft: a missing key, unreadable store, parse failure or
    /// non-array value all reset to an empty list. Empty identifiers are
    /// dropped and the list is truncated to its maximum.
    pub fn load(&mut self) {
        let stored = match self.store.read(self.key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = self.key, error = %err, "list storage unreadable, resetting");
                None
            }
        };

        self.items = stored
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default();

        self.items.retain(|id| !id.is_empty());
        if self.items.len() > self.max {
            self.items.truncate(self.max);
        }
    }

    /// Add an identifier to the list.
    ///
    /// Empty ids are ignored and duplicates are no-ops. When the list is
    /// already at its maximum the add is rejected and a [`ChangeEvent::Warning`]
    /// is emitted instead of an error - the page stays usable.
    pub fn add(&mut self, id: &str) -> AddOutcome {
        let id = id.trim();
        if id.is_empty() {
            return AddOutcome::IgnoredEmpty;
        }
        if self.contains(id) {
            return AddOutcome::AlreadyPresent;
        }
        if self.items.len() >= self.max {
            self.events.emit(ChangeEvent::Warning {
                key: self.key.to_string(),
                message: format!("list is full ({} max)", self.max),
            });
            return AddOutcome::Rejected;
        }

        self.items.push(id.to_string());
        self.persist();
        AddOutcome::Added
    }

    /// Remove an identifier from the list. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|x| x != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Add or remove based on current membership.
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        if self.contains(id.trim()) {
            self.remove(id.trim());
            ToggleOutcome::Removed
        } else {
            match self.add(id) {
                AddOutcome::Added => ToggleOutcome::Added,
                _ => ToggleOutcome::Unchanged,
            }
        }
    }

    /// Empty the list.
    ///
    /// With [`Confirmation::Requested`] nothing is mutated; the caller is
    /// told to confirm first. With [`Confirmation::Confirmed`] the list is
    /// emptied and persisted.
    pub fn clear(&mut self, confirmation: Confirmation) -> ClearOutcome {
        match confirmation {
            Confirmation::Requested => ClearOutcome::ConfirmationRequired,
            Confirmation::Confirmed => {
                self.items.clear();
                self.persist();
                ClearOutcome::Cleared
            }
        }
    }

    /// Whether `id` is in the list.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|x| x == id)
    }

    /// Number of identifiers in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Defensive copy of the list, never the live internal vector.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        self.items.clone()
    }

    /// Whether enough products are selected to show a comparison.
    ///
    /// Always `false` for lists without a floor (favorites).
    #[must_use]
    pub fn can_compare(&self) -> bool {
        self.floor.is_some_and(|floor| self.items.len() >= floor)
    }

    #[must_use]
    pub const fn kind(&self) -> ListKind {
        self.kind
    }

    /// The storage key this list persists under.
    #[must_use]
    pub const fn storage_key(&self) -> &'static str {
        self.key
    }

    /// React to a storage change made by another tab.
    ///
    /// If `key` matches this list's storage key, the in-memory list is
    /// reloaded from the store (without re-persisting - last writer wins)
    /// and the change event is re-emitted so this tab's UI refreshes.
    /// Returns whether the notification was for this list.
    pub fn on_external_change(&mut self, key: &str) -> bool {
        if key != self.key {
            return false;
        }
        self.load();
        self.emit_changed();
        true
    }

    /// Persist the full list and notify listeners.
    ///
    /// On a write failure the in-memory mutation is kept (best-effort
    /// durability: the tab keeps working offline) and a warning event is
    /// emitted instead of the change event, matching what a reload would
    /// observe.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(key = self.key, error = %err, "list serialization failed");
                return;
            }
        };

        match self.store.write(self.key, &json) {
            Ok(()) => self.emit_changed(),
            Err(err) => {
                tracing::warn!(key = self.key, error = %err, "list persistence failed");
                self.events.emit(ChangeEvent::Warning {
                    key: self.key.to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    fn emit_changed(&self) {
        let event = match self.kind {
            ListKind::Favorites => ChangeEvent::FavoritesChanged {
                items: self.items.clone(),
                count: self.items.len(),
            },
            ListKind::Comparison => ChangeEvent::ComparisonChanged {
                items: self.items.clone(),
                count: self.items.len(),
            },
        };
        self.events.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::PoisonError;

    use super::*;
    use crate::events::RecordingSink;
    use crate::storage::{InMemoryStore, StorageError};

    fn favorites() -> (TrackedList<InMemoryStore, RecordingSink>, Arc<InMemoryStore>, Arc<RecordingSink>)
    {
        let store = Arc::new(InMemoryStore::new());
        let sink = Arc::new(RecordingSink::new());
        let list = TrackedList::favorites(Arc::clone(&store), Arc::clone(&sink));
        (list, store, sink)
    }

    #[test]
    fn test_add_deduplicates() {
        let (mut list, _, _) = favorites();
        assert_eq!(list.add("1"), AddOutcome::Added);
        assert_eq!(list.add("1"), AddOutcome::AlreadyPresent);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_ignores_empty() {
        let (mut list, _, _) = favorites();
        assert_eq!(list.add(""), AddOutcome::IgnoredEmpty);
        assert_eq!(list.add("   "), AddOutcome::IgnoredEmpty);
        assert!(list.is_empty());
    }

    #[test]
    fn test_no_duplicates_and_bounded_for_any_sequence() {
        let (mut list, _, _) = favorites();
        for i in 0..200 {
            let id = (i % 60).to_string();
            match i % 3 {
                0 => {
                    list.add(&id);
                }
                1 => {
                    list.toggle(&id);
                }
                _ => {
                    list.remove(&id);
                }
            }
            let items = list.items();
            let mut deduped = items.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), items.len(), "duplicates after step {i}");
            assert!(items.len() <= MAX_FAVORITES);
        }
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let (mut list, _, _) = favorites();
        list.add("5");

        assert!(!list.contains("9"));
        list.toggle("9");
        list.toggle("9");
        assert!(!list.contains("9"));

        assert!(list.contains("5"));
        list.toggle("5");
        list.toggle("5");
        assert!(list.contains("5"));
    }

    #[test]
    fn test_persisted_json_round_trips() {
        let store = Arc::new(InMemoryStore::new());
        let sink = Arc::new(RecordingSink::new());
        let mut list = TrackedList::favorites(Arc::clone(&store), Arc::clone(&sink));
        list.add("3");
        list.add("1");
        list.add("2");

        let reloaded = TrackedList::favorites(Arc::clone(&store), sink);
        assert_eq!(reloaded.items(), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_load_resets_on_garbage() {
        let store = Arc::new(InMemoryStore::new());
        store.write(FAVORITES_KEY, "{not json").expect("write");
        let sink = Arc::new(RecordingSink::new());
        let list = TrackedList::favorites(Arc::clone(&store), Arc::clone(&sink));
        assert!(list.is_empty());

        store.write(FAVORITES_KEY, "{\"a\":1}").expect("write");
        let mut list = TrackedList::favorites(store, sink);
        list.load();
        assert!(list.is_empty());
    }

    #[test]
    fn test_comparison_truncates_oversized_persisted_list() {
        let store = Arc::new(InMemoryStore::new());
        store
            .write(COMPARISON_KEY, r#"["1","2","3","4","5","6"]"#)
            .expect("write");
        let list = TrackedList::comparison(store, Arc::new(RecordingSink::new()));
        assert_eq!(list.len(), MAX_COMPARISON);
    }

    #[test]
    fn test_comparison_fifth_add_rejected_order_unchanged() {
        let sink = Arc::new(RecordingSink::new());
        let mut list = TrackedList::comparison(Arc::new(InMemoryStore::new()), Arc::clone(&sink));
        for id in ["1", "2", "3", "4"] {
            assert_eq!(list.add(id), AddOutcome::Added);
        }

        assert_eq!(list.add("5"), AddOutcome::Rejected);
        assert_eq!(list.items(), vec!["1", "2", "3", "4"]);
        assert!(matches!(sink.last(), Some(ChangeEvent::Warning { .. })));
    }

    #[test]
    fn test_comparison_floor() {
        let mut list =
            TrackedList::comparison(Arc::new(InMemoryStore::new()), Arc::new(RecordingSink::new()));
        assert!(!list.can_compare());
        list.add("1");
        assert!(!list.can_compare());
        list.add("2");
        assert!(list.can_compare());
    }

    #[test]
    fn test_favorites_never_compare() {
        let (mut list, _, _) = favorites();
        list.add("1");
        list.add("2");
        list.add("3");
        assert!(!list.can_compare());
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let (mut list, store, _) = favorites();
        list.add("1");

        assert_eq!(list.clear(Confirmation::Requested), ClearOutcome::ConfirmationRequired);
        assert_eq!(list.len(), 1);

        assert_eq!(list.clear(Confirmation::Confirmed), ClearOutcome::Cleared);
        assert!(list.is_empty());
        assert_eq!(store.raw(FAVORITES_KEY), Some("[]".to_string()));
    }

    #[test]
    fn test_mutation_emits_change_event_with_items_and_count() {
        let (mut list, _, sink) = favorites();
        list.add("7");
        assert_eq!(
            sink.last(),
            Some(ChangeEvent::FavoritesChanged {
                items: vec!["7".to_string()],
                count: 1
            })
        );

        list.remove("7");
        assert_eq!(
            sink.last(),
            Some(ChangeEvent::FavoritesChanged {
                items: Vec::new(),
                count: 0
            })
        );
    }

    #[test]
    fn test_cross_tab_reload_without_repersist() {
        let store = Arc::new(InMemoryStore::new());
        let sink_a = Arc::new(RecordingSink::new());
        let sink_b = Arc::new(RecordingSink::new());

        let mut tab_a = TrackedList::favorites(Arc::clone(&store), sink_a);
        let mut tab_b = TrackedList::favorites(Arc::clone(&store), Arc::clone(&sink_b));

        tab_a.add("1");
        tab_a.add("2");
        let persisted = store.raw(FAVORITES_KEY);

        assert!(tab_b.on_external_change(FAVORITES_KEY));
        assert_eq!(tab_b.len(), 2);
        assert!(tab_b.contains("1"));
        // B re-emitted its own refresh signal but did not write.
        assert_eq!(store.raw(FAVORITES_KEY), persisted);
        assert!(matches!(
            sink_b.last(),
            Some(ChangeEvent::FavoritesChanged { count: 2, .. })
        ));

        // Notifications for other keys are ignored.
        assert!(!tab_b.on_external_change("some_other_key"));
    }

    /// Store that accepts reads but fails every write.
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: Mutex<Option<String>>,
    }

    impl ListStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(self
                .inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone())
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded)
        }
    }

    #[test]
    fn test_write_failure_keeps_memory_and_warns() {
        let store = Arc::new(ReadOnlyStore::default());
        let sink = Arc::new(RecordingSink::new());
        let mut list = TrackedList::favorites(Arc::clone(&store), Arc::clone(&sink));

        assert_eq!(list.add("1"), AddOutcome::Added);
        // Mutation kept in memory even though persistence failed.
        assert!(list.contains("1"));
        assert!(matches!(sink.last(), Some(ChangeEvent::Warning { .. })));

        // A reload reflects the last successfully persisted state (empty),
        // not the in-memory state - the documented divergence.
        list.load();
        assert!(list.is_empty());
    }
}

//! End-to-end offline behavior tests.
//!
//! Runs the offline worker lifecycle against in-memory fakes and drives
//! two tracked lists over a shared store, the way two browser tabs share
//! local storage.

use std::sync::Arc;

use ozlasteksan_client::worker::fakes::{InMemoryCaches, ScriptedNetwork};
use ozlasteksan_client::{
    ChangeEvent, Confirmation, FetchOutcome, FetchRequest, InMemoryStore, RecordingSink,
    ToggleOutcome, TrackedList, Worker, WorkerMessage, WorkerPhase, COMPARISON_KEY, FAVORITES_KEY,
    MAX_COMPARISON, OFFLINE_URL, STATIC_CACHE_URLS,
};
use url::Url;

const ORIGIN: &str = "https://www.ozlasteksan.com";

fn url(path: &str) -> Url {
    Url::parse(&format!("{ORIGIN}{path}")).expect("test url")
}

struct Harness {
    caches: Arc<InMemoryCaches>,
    network: Arc<ScriptedNetwork>,
    events: Arc<RecordingSink>,
}

impl Harness {
    fn new() -> Self {
        Self {
            caches: Arc::new(InMemoryCaches::new()),
            network: Arc::new(ScriptedNetwork::new()),
            events: Arc::new(RecordingSink::new()),
        }
    }

    fn worker(&self) -> Worker<InMemoryCaches, ScriptedNetwork, RecordingSink> {
        Worker::new(
            Url::parse(ORIGIN).expect("origin"),
            Arc::clone(&self.caches),
            Arc::clone(&self.network),
            Arc::clone(&self.events),
        )
    }

    fn script_shell(&self) {
        for path in STATIC_CACHE_URLS {
            self.network
                .respond_ok(&format!("{ORIGIN}{path}"), &format!("shell:{path}"));
        }
    }
}

#[tokio::test]
async fn test_full_lifecycle_then_offline_navigation() {
    let harness = Harness::new();
    harness.script_shell();

    let mut worker = harness.worker();
    worker.install().await.expect("install");
    assert_eq!(worker.phase(), WorkerPhase::Waiting);

    worker
        .on_message(WorkerMessage::SkipWaiting)
        .await
        .expect("skip waiting");
    assert_eq!(worker.phase(), WorkerPhase::Activated);

    // Visit a page while online so it lands in the runtime cache
    harness
        .network
        .respond_ok(&format!("{ORIGIN}/products/3"), "detail:kaplin");
    let outcome = worker
        .handle_fetch(&FetchRequest::navigation(url("/products/3")))
        .await
        .expect("fetch");
    assert!(matches!(outcome, FetchOutcome::Respond(_)));

    // Connection drops; the visited page still loads
    harness.network.go_offline();
    let outcome = worker
        .handle_fetch(&FetchRequest::navigation(url("/products/3")))
        .await
        .expect("fetch");
    let FetchOutcome::Respond(response) = outcome else {
        panic!("expected a response");
    };
    assert_eq!(response.body, "detail:kaplin");

    // A page never visited falls back to the offline page
    let outcome = worker
        .handle_fetch(&FetchRequest::navigation(url("/products/17")))
        .await
        .expect("fetch");
    let FetchOutcome::Respond(response) = outcome else {
        panic!("expected a response");
    };
    assert_eq!(response.body, format!("shell:{OFFLINE_URL}"));
}

#[tokio::test]
async fn test_hashed_stylesheet_is_precached_and_served_offline() {
    let harness = Harness::new();
    harness.script_shell();
    let css_path = ozlasteksan_site::HASHED_CSS_PATH;
    harness
        .network
        .respond_ok(&format!("{ORIGIN}{css_path}"), "body{color:#1a1a2e}");

    let mut worker = harness.worker();
    worker.precache_asset(css_path);
    worker.install().await.expect("install");
    worker
        .on_message(WorkerMessage::SkipWaiting)
        .await
        .expect("activate");

    // The stylesheet every shell page links is servable with no network
    harness.network.go_offline();
    let outcome = worker
        .handle_fetch(&FetchRequest::get(url(css_path)))
        .await
        .expect("fetch");
    let FetchOutcome::Respond(response) = outcome else {
        panic!("expected a response");
    };
    assert_eq!(response.body, "body{color:#1a1a2e}");
}

#[tokio::test]
async fn test_new_version_prunes_old_generation_after_takeover() {
    let harness = Harness::new();
    harness.script_shell();

    let mut old = harness.worker();
    old.install().await.expect("install v1");
    old.on_message(WorkerMessage::SkipWaiting)
        .await
        .expect("activate v1");

    let mut new = Worker::with_version(
        Url::parse(ORIGIN).expect("origin"),
        "2.0.0",
        Arc::clone(&harness.caches),
        Arc::clone(&harness.network),
        Arc::clone(&harness.events),
    );
    new.install().await.expect("install v2");

    // Both generations coexist while the old worker still controls pages
    assert!(harness.caches.contains("ozlasteksan-v1.0.0", &format!("{ORIGIN}/")));
    assert!(harness.caches.contains("ozlasteksan-v2.0.0", &format!("{ORIGIN}/")));

    new.on_message(WorkerMessage::SkipWaiting)
        .await
        .expect("activate v2");

    assert!(!harness.caches.contains("ozlasteksan-v1.0.0", &format!("{ORIGIN}/")));
    assert!(harness.caches.contains("ozlasteksan-v2.0.0", &format!("{ORIGIN}/")));

    // An update event was announced for each install
    let updates: Vec<_> = harness
        .events
        .events()
        .into_iter()
        .filter(|e| matches!(e, ChangeEvent::CacheUpdateAvailable { .. }))
        .collect();
    assert_eq!(updates.len(), 2);
}

#[tokio::test]
async fn test_cross_tab_favorites_sync() {
    let store = Arc::new(InMemoryStore::new());
    let events_a = Arc::new(RecordingSink::new());
    let events_b = Arc::new(RecordingSink::new());

    let mut tab_a = TrackedList::favorites(Arc::clone(&store), events_a);
    let mut tab_b = TrackedList::favorites(Arc::clone(&store), Arc::clone(&events_b));

    tab_a.add("3");
    tab_a.add("7");
    assert!(!tab_b.contains("3"));

    // The storage event fires in the other tab
    assert!(tab_b.on_external_change(FAVORITES_KEY));
    assert!(tab_b.contains("3"));
    assert!(tab_b.contains("7"));

    // The reload re-announces the state so tab B's UI can refresh
    assert!(matches!(
        events_b.last(),
        Some(ChangeEvent::FavoritesChanged { count: 2, .. })
    ));

    // An event for an unrelated key is ignored
    assert!(!tab_b.on_external_change("some_other_key"));
}

#[tokio::test]
async fn test_comparison_stays_bounded_across_tabs() {
    let store = Arc::new(InMemoryStore::new());

    let mut tab_a = TrackedList::comparison(Arc::clone(&store), Arc::new(RecordingSink::new()));
    let mut tab_b = TrackedList::comparison(Arc::clone(&store), Arc::new(RecordingSink::new()));

    for id in ["1", "2", "3", "4"] {
        tab_a.add(id);
    }
    tab_b.on_external_change(COMPARISON_KEY);
    assert_eq!(tab_b.len(), MAX_COMPARISON);
    assert!(tab_b.can_compare());

    // The other tab cannot push the list past its bound either
    assert!(matches!(tab_b.toggle("5"), ToggleOutcome::Unchanged));
    assert_eq!(tab_b.len(), MAX_COMPARISON);

    // Clearing in one tab empties the other after the storage event
    tab_b.clear(Confirmation::Confirmed);
    tab_a.on_external_change(COMPARISON_KEY);
    assert!(tab_a.is_empty());
}

//! Driver tests run on paused tokio time, so sleeps advance the clock
//! instantly and deterministically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::watch;
use vitrina_core::SearchResultSummary;
use vitrina_search::{
    NavKey, Phase, SearchConfig, SearchDriver, SearchMode, SearchSnapshot, SuggestionSource,
};

const DEBOUNCE: Duration = Duration::from_millis(300);

fn summary(id: &str) -> SearchResultSummary {
    SearchResultSummary {
        id: id.to_owned(),
        title: id.to_owned(),
        price: Decimal::new(999, 2),
        currency: "US$".to_owned(),
        image: String::new(),
        description: None,
        product_type: None,
    }
}

/// Answers every query with one summary whose id is the query itself,
/// after a per-query latency.
#[derive(Clone, Default)]
struct FakeSource {
    calls: Arc<Mutex<Vec<(String, SearchMode)>>>,
    latency: Arc<HashMap<String, Duration>>,
    failing: Arc<Vec<String>>,
}

impl FakeSource {
    fn with_latency(pairs: &[(&str, u64)]) -> Self {
        Self {
            latency: Arc::new(
                pairs
                    .iter()
                    .map(|(q, ms)| ((*q).to_owned(), Duration::from_millis(*ms)))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    fn failing_on(query: &str) -> Self {
        Self {
            failing: Arc::new(vec![query.to_owned()]),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<(String, SearchMode)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SuggestionSource for FakeSource {
    type Error = String;

    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
    ) -> Result<Vec<SearchResultSummary>, String> {
        self.calls.lock().unwrap().push((query.to_owned(), mode));
        let latency = self
            .latency
            .get(query)
            .copied()
            .unwrap_or(Duration::from_millis(10));
        tokio::time::sleep(latency).await;
        if self.failing.iter().any(|q| q == query) {
            return Err(format!("backend down for {query}"));
        }
        Ok(vec![summary(query)])
    }
}

fn config() -> SearchConfig {
    SearchConfig {
        debounce: DEBOUNCE,
        hide_delay: Duration::from_millis(200),
    }
}

async fn settled(rx: &mut watch::Receiver<SearchSnapshot>) -> SearchSnapshot {
    rx.wait_for(|s| s.phase == Phase::Settled && !s.fetching)
        .await
        .unwrap()
        .clone()
}

#[tokio::test(start_paused = true)]
async fn rapid_typing_collapses_into_one_fetch() {
    let source = FakeSource::default();
    let handle = SearchDriver::spawn(source.clone(), config());
    let mut rx = handle.subscribe();

    for query in ["p", "ph", "pho", "phon", "phone"] {
        handle.input(query);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let snapshot = settled(&mut rx).await;
    assert_eq!(source.calls(), vec![("phone".to_owned(), SearchMode::Suggestions)]);
    assert_eq!(snapshot.results[0].id, "phone");
    assert!(snapshot.panel_visible);
}

#[tokio::test(start_paused = true)]
async fn slow_older_response_never_overwrites_newer() {
    let source = FakeSource::with_latency(&[("ph", 1_000), ("pho", 10)]);
    let handle = SearchDriver::spawn(source.clone(), config());
    let mut rx = handle.subscribe();

    handle.input("ph");
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(50)).await;
    handle.input("pho");

    let snapshot = settled(&mut rx).await;
    assert_eq!(snapshot.results[0].id, "pho");

    // Let the slow "ph" response arrive; it must be discarded.
    tokio::time::sleep(Duration::from_secs(2)).await;
    let snapshot = rx.borrow().clone();
    assert_eq!(snapshot.results.len(), 1);
    assert_eq!(snapshot.results[0].id, "pho");
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn submit_skips_debounce_and_hides_panel() {
    let source = FakeSource::default();
    let handle = SearchDriver::spawn(source.clone(), config());
    let mut rx = handle.subscribe();

    handle.input("phone");
    handle.submit("phone");

    let snapshot = settled(&mut rx).await;
    assert!(!snapshot.panel_visible);

    tokio::time::sleep(DEBOUNCE * 2).await;
    assert_eq!(source.calls(), vec![("phone".to_owned(), SearchMode::Full)]);
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_settles_with_empty_results() {
    let source = FakeSource::failing_on("tablet");
    let handle = SearchDriver::spawn(source, config());
    let mut rx = handle.subscribe();

    handle.input("tablet");
    let snapshot = settled(&mut rx).await;
    assert!(snapshot.results.is_empty());
    assert!(!snapshot.panel_visible);
}

#[tokio::test(start_paused = true)]
async fn blur_hides_after_delay_unless_refocused() {
    let source = FakeSource::default();
    let handle = SearchDriver::spawn(source, config());
    let mut rx = handle.subscribe();

    handle.input("phone");
    settled(&mut rx).await;

    handle.blur();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.borrow().panel_visible);
    handle.focus();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(rx.borrow().panel_visible);

    handle.blur();
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(!rx.borrow().panel_visible);
}

#[tokio::test(start_paused = true)]
async fn confirm_on_selection_reports_opened_product() {
    let source = FakeSource::default();
    let handle = SearchDriver::spawn(source, config());
    let mut rx = handle.subscribe();
    let mut opened = handle.opened();

    handle.input("phone");
    settled(&mut rx).await;

    handle.navigate(NavKey::Next);
    handle.navigate(NavKey::Confirm);
    let product = opened.recv().await.unwrap();
    assert_eq!(product.id, "phone");
}

#[tokio::test(start_paused = true)]
async fn clear_discards_in_flight_fetch() {
    let source = FakeSource::with_latency(&[("phone", 500)]);
    let handle = SearchDriver::spawn(source, config());
    let mut rx = handle.subscribe();

    handle.input("phone");
    rx.wait_for(|s| s.fetching).await.unwrap();
    handle.clear();

    tokio::time::sleep(Duration::from_secs(1)).await;
    let snapshot = rx.borrow().clone();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert!(snapshot.results.is_empty());
    assert_eq!(snapshot.query, "");
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_work() {
    let source = FakeSource::default();
    let handle = SearchDriver::spawn(source.clone(), config());
    let mut rx = handle.subscribe();

    handle.input("phone");
    handle.shutdown();

    // The snapshot sender goes away with the session task.
    while rx.changed().await.is_ok() {}
    tokio::time::sleep(DEBOUNCE * 2).await;
    assert!(source.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_tears_session_down() {
    let source = FakeSource::default();
    let handle = SearchDriver::spawn(source.clone(), config());
    let mut rx = handle.subscribe();

    handle.input("phone");
    drop(handle);

    while rx.changed().await.is_ok() {}
    tokio::time::sleep(DEBOUNCE * 2).await;
    assert!(source.calls().is_empty());
}

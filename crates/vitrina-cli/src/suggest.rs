//! Drives the debounced suggestion pipeline from the terminal by replaying a
//! query as individual keystrokes.

use std::time::Duration;

use vitrina_client::{Catalog, ProductClient};
use vitrina_core::AppConfig;
use vitrina_search::{Phase, SearchConfig, SearchDriver};

use crate::browse::print_json;

/// Every prefix of `query`, shortest first, split on char boundaries.
pub(crate) fn keystrokes(query: &str) -> Vec<&str> {
    query
        .char_indices()
        .map(|(i, c)| &query[..i + c.len_utf8()])
        .collect()
}

pub(crate) async fn run_suggest(
    catalog: Catalog<ProductClient>,
    config: &AppConfig,
    query: &str,
    keystroke_ms: u64,
) -> anyhow::Result<()> {
    if query.trim().is_empty() {
        return print_json(&Vec::<()>::new());
    }

    let search_config = SearchConfig::from_app_config(config);
    let settle_timeout = search_config.debounce
        + Duration::from_secs(config.request_timeout_secs.saturating_mul(2));
    let handle = SearchDriver::spawn(catalog, search_config);
    let mut snapshots = handle.subscribe();

    handle.focus();
    let strokes = keystrokes(query);
    for (n, prefix) in strokes.iter().enumerate() {
        handle.input(*prefix);
        if n + 1 < strokes.len() {
            tokio::time::sleep(Duration::from_millis(keystroke_ms)).await;
        }
    }
    tracing::info!(query, keystrokes = strokes.len(), "typing finished, waiting for suggestions");

    let settled = tokio::time::timeout(
        settle_timeout,
        snapshots.wait_for(|s| s.phase == Phase::Settled && !s.fetching && s.query == query),
    )
    .await
    .map_err(|_| anyhow::anyhow!("suggestions did not settle within {settle_timeout:?}"))?
    .map_err(|_| anyhow::anyhow!("search session ended before settling"))?
    .clone();

    handle.shutdown();
    tracing::info!(
        count = settled.results.len(),
        panel = settled.panel_visible,
        "suggestions settled"
    );
    print_json(&settled.results)
}

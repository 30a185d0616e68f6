use std::future::Future;

use vitrina_core::SearchResultSummary;

use crate::session::SearchMode;

/// Anything that can answer a search query with product summaries.
pub trait SuggestionSource: Send + Sync + 'static {
    type Error: std::fmt::Display + Send + 'static;

    fn search(
        &self,
        query: &str,
        mode: SearchMode,
    ) -> impl Future<Output = Result<Vec<SearchResultSummary>, Self::Error>> + Send;
}

//! The search box flow: run a query, record it in the history, show the
//! results in the list.

use crate::backend::SearchSource;
use searchhub_common::{Result, SearchHubError};
use searchhub_view::{ResultListView, ViewOptions};

pub const DEFAULT_SEARCH_TYPE: &str = "general";

/// What a search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSummary {
    pub query: String,
    pub search_type: String,
    pub result_count: usize,
    pub from_cache: bool,
    /// `false` when the history entry could not be written.
    pub history_recorded: bool,
}

/// Search, then hand the results to `view`.
///
/// A blank query or a failed search returns `Err` and leaves the view as it
/// was. History is best effort: a failure is logged and the results are
/// still displayed.
pub async fn search_and_display(
    source: &dyn SearchSource,
    view: &mut ResultListView,
    query: &str,
    search_type: &str,
    options: ViewOptions,
) -> Result<SearchSummary> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchHubError::Invalid("Please enter a search query".into()));
    }
    let search_type = match search_type.trim() {
        "" => DEFAULT_SEARCH_TYPE,
        other => other,
    };

    let response = source.search(query, search_type).await.map_err(|err| {
        tracing::warn!(target: "searchhub::search", query, search_type, error = %err, "search.failed");
        err
    })?;
    let records = response.records();
    let result_count = records.len();

    let history_recorded = match source.record_history(query, search_type, result_count).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(target: "searchhub::search", query, error = %err, "search.history.failed");
            false
        }
    };

    view.display(records, options);
    tracing::info!(
        target: "searchhub::search",
        query,
        search_type,
        results = result_count,
        from_cache = ?response.from_cache,
        "search.displayed"
    );

    Ok(SearchSummary {
        query: query.to_string(),
        search_type: search_type.to_string(),
        result_count,
        from_cache: response.from_cache.unwrap_or(false),
        history_recorded,
    })
}

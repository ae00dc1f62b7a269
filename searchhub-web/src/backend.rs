//! Collaborators backed by the SearchHub REST API.

use crate::types::{
    ContentResponse, HistoryRequest, HistoryResponse, SavedItemRequest, SavedItemResponse,
    SearchRequest, SearchResponse,
};
use async_trait::async_trait;
use searchhub_common::{Result, SearchHubError};
use searchhub_http::{HttpClient, HttpError, RequestOpts};
use searchhub_view::{SaveGateway, SavedItem};
use std::borrow::Cow;

pub const SAVED_ITEMS_PATH: &str = "api/saved-items";
pub const CONTENT_PATH: &str = "api/content";
pub const SEARCH_PATH: &str = "api/search";
pub const HISTORY_PATH: &str = "api/history";

/// Runs searches and records them in the search history.
#[async_trait]
pub trait SearchSource: Send + Sync {
    async fn search(&self, query: &str, search_type: &str) -> Result<SearchResponse>;

    async fn record_history(
        &self,
        query: &str,
        search_type: &str,
        results_count: usize,
    ) -> Result<()>;
}

/// Fetches the readable content of an article.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ContentResponse>;
}

/// `POST /api/saved-items`.
#[derive(Clone, Debug)]
pub struct HttpSaveGateway {
    http: HttpClient,
}

impl HttpSaveGateway {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SaveGateway for HttpSaveGateway {
    async fn save(&self, title: &str, url: &str, summary: &str) -> Result<SavedItem> {
        let body = SavedItemRequest {
            title,
            url,
            summary,
        };
        let saved: SavedItemResponse = self
            .http
            .post_json(SAVED_ITEMS_PATH, &body, RequestOpts::default())
            .await
            .map_err(|err| match err {
                HttpError::Api { message, .. } => SearchHubError::Rejected(message),
                other => SearchHubError::Transport(other.to_string()),
            })?;
        tracing::debug!(target: "searchhub::web", id = ?saved.id, url, "backend.saved");
        Ok(saved.into())
    }
}

/// `GET /api/content?url=...`.
#[derive(Clone, Debug)]
pub struct HttpContentSource {
    http: HttpClient,
}

impl HttpContentSource {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, url: &str) -> Result<ContentResponse> {
        let opts = RequestOpts {
            query: Some(vec![("url", Cow::Borrowed(url))]),
            ..Default::default()
        };
        self.http
            .get_json(CONTENT_PATH, opts)
            .await
            .map_err(|err| match err {
                HttpError::Api { status, .. } => SearchHubError::Other(anyhow::anyhow!(
                    "Request failed ({})",
                    status.as_u16()
                )),
                other => SearchHubError::Transport(other.to_string()),
            })
    }
}

/// `POST /api/search` and `POST /api/history`.
#[derive(Clone, Debug)]
pub struct HttpSearchSource {
    http: HttpClient,
}

impl HttpSearchSource {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl SearchSource for HttpSearchSource {
    async fn search(&self, query: &str, search_type: &str) -> Result<SearchResponse> {
        let body = SearchRequest { query, search_type };
        self.http
            .post_json(SEARCH_PATH, &body, RequestOpts::default())
            .await
            .map_err(|err| match err {
                HttpError::Api { status, message } if status.is_client_error() => {
                    SearchHubError::Rejected(message)
                }
                HttpError::Api { status, .. } => SearchHubError::Other(anyhow::anyhow!(
                    "Search failed ({})",
                    status.as_u16()
                )),
                other => SearchHubError::Transport(other.to_string()),
            })
    }

    async fn record_history(
        &self,
        query: &str,
        search_type: &str,
        results_count: usize,
    ) -> Result<()> {
        let body = HistoryRequest {
            query,
            search_type,
            results_count,
        };
        let entry: HistoryResponse = self
            .http
            .post_json(HISTORY_PATH, &body, RequestOpts::default())
            .await
            .map_err(|err| match err {
                HttpError::Api { message, .. } => SearchHubError::Rejected(message),
                other => SearchHubError::Transport(other.to_string()),
            })?;
        tracing::debug!(target: "searchhub::web", id = ?entry.id, query, "backend.history_recorded");
        Ok(())
    }
}

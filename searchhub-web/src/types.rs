//! Wire shapes of the backend's `/api/search`, `/api/history`,
//! `/api/content` and `/api/saved-items`.

use chrono::{DateTime, NaiveDateTime};
use searchhub_view::{RawRecord, SavedItem};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `GET /api/content?url=...`.
///
/// Every field is optional on the wire; the modal supplies its own fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentResponse {
    pub url: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub word_count: Option<u64>,
    /// ISO-8601 local date-time as the backend serialises it.
    pub fetched_at: Option<String>,
    pub cached: Option<bool>,
}

impl ContentResponse {
    /// `fetchedAt` as `YYYY-MM-DD HH:MM:SS`, `Unknown` when absent.
    ///
    /// ```
    /// use searchhub_web::ContentResponse;
    ///
    /// let resp = ContentResponse {
    ///     fetched_at: Some("2024-05-01T10:15:30.123456".into()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(resp.fetched_at_label(), "2024-05-01 10:15:30");
    /// assert_eq!(ContentResponse::default().fetched_at_label(), "Unknown");
    /// ```
    pub fn fetched_at_label(&self) -> String {
        let Some(raw) = self.fetched_at.as_deref().map(str::trim).filter(|s| !s.is_empty())
        else {
            return "Unknown".to_string();
        };
        if let Ok(local) = raw.parse::<NaiveDateTime>() {
            return local.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
            return zoned.format("%Y-%m-%d %H:%M:%S").to_string();
        }
        raw.to_string()
    }

    /// `Cached • 120 words • 2024-05-01 10:15:30`
    pub fn meta_line(&self) -> String {
        let label = if self.cached.unwrap_or(false) {
            "Cached"
        } else {
            "Fresh"
        };
        format!(
            "{label} • {} words • {}",
            self.word_count.unwrap_or(0),
            self.fetched_at_label()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedItemRequest<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub summary: &'a str,
}

/// `201 Created` body of `POST /api/saved-items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedItemResponse {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub saved_date: Option<String>,
}

impl From<SavedItemResponse> for SavedItem {
    fn from(resp: SavedItemResponse) -> Self {
        SavedItem {
            id: resp.id,
            title: resp.title.unwrap_or_default(),
            url: resp.url,
            summary: resp.summary.unwrap_or_default(),
        }
    }
}

/// Body of `POST /api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub search_type: &'a str,
}

/// Response of `POST /api/search`. `results` is kept as raw JSON and read
/// leniently through [`SearchResponse::records`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    pub query: Option<String>,
    pub search_type: Option<String>,
    pub results: Value,
    pub result_count: Option<u64>,
    pub timestamp: Option<String>,
    pub from_cache: Option<bool>,
}

impl SearchResponse {
    /// `results` as records; a missing or non-array value is an empty list.
    ///
    /// ```
    /// use searchhub_web::SearchResponse;
    ///
    /// let resp: SearchResponse = serde_json::from_str(
    ///     r#"{"query": "rust", "results": [{"title": "A", "url": "http://a"}], "fromCache": true}"#,
    /// ).unwrap();
    /// assert_eq!(resp.records().len(), 1);
    /// assert_eq!(SearchResponse::default().records().len(), 0);
    /// ```
    pub fn records(&self) -> Vec<RawRecord> {
        RawRecord::list_from_value(&self.results)
    }
}

/// Body of `POST /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest<'a> {
    pub query: &'a str,
    pub search_type: &'a str,
    pub results_count: usize,
}

/// `201 Created` body of `POST /api/history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryResponse {
    pub id: Option<i64>,
    pub query: Option<String>,
    pub search_type: Option<String>,
    pub results_count: Option<u64>,
    pub searched_at: Option<String>,
}

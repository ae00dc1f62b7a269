//! Result records as the backend sends them, and the canonical shape the view
//! renders.
//!
//! Upstream field names drifted between API versions (`name`/`title`,
//! `link`/`url`, `snippet`/`description`/`summary`). [`RawRecord`] accepts all
//! of them; [`normalize`] picks one value per field with a fixed precedence.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNTITLED: &str = "Untitled result";
pub const NO_SUMMARY: &str = "No summary provided.";

/// A loosely shaped record. Every field is optional and non-string scalars
/// are stringified (`0` and `false` become absent), so deserialization never
/// rejects a record for its shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub snippet: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub publisher: Option<String>,
    #[serde(rename = "publishedAt", deserialize_with = "lenient")]
    pub published_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub published: Option<String>,
}

impl RawRecord {
    /// Read one record from arbitrary JSON. Non-objects yield an empty record.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }

    /// Read a result list. Anything but a JSON array yields an empty list.
    ///
    /// ```
    /// use searchhub_view::RawRecord;
    /// use serde_json::json;
    ///
    /// let records = RawRecord::list_from_value(&json!([
    ///     {"title": "A", "url": "http://a"},
    ///     null,
    ///     {"name": "B", "link": "http://b", "score": 0.4}
    /// ]));
    /// assert_eq!(records.len(), 3);
    /// assert_eq!(records[2].name.as_deref(), Some("B"));
    ///
    /// assert!(RawRecord::list_from_value(&json!({"results": []})).is_empty());
    /// ```
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.iter().map(Self::from_value).collect(),
            _ => Vec::new(),
        }
    }

    pub fn titled(title: &str, url: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            ..Self::default()
        }
    }
}

fn lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        // `0` and `false` count as absent, like an empty string.
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

/// The canonical record the view renders and hands to its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub source: String,
    pub published_at: String,
}

impl ResultRecord {
    /// Header line shown above the title: `source • date`, or `Result`.
    pub fn meta_line(&self) -> String {
        match (self.source.is_empty(), self.published_at.is_empty()) {
            (true, true) => "Result".to_string(),
            (false, true) => self.source.clone(),
            (true, false) => format!("Result • {}", self.published_at),
            (false, false) => format!("{} • {}", self.source, self.published_at),
        }
    }
}

fn first_present(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Map a raw record onto the canonical shape.
///
/// Precedence: `title` > `name`; `url` > `link`; `summary` > `snippet` >
/// `description`; `source` > `publisher`; `publishedAt` > `published`.
/// Empty strings count as missing.
///
/// ```
/// use searchhub_view::{normalize, RawRecord};
///
/// let raw = RawRecord { name: Some("X".into()), snippet: Some("S".into()), ..Default::default() };
/// let rec = normalize(&raw);
/// assert_eq!(rec.title, "X");
/// assert_eq!(rec.url, "");
/// assert_eq!(rec.summary, "S");
/// ```
pub fn normalize(raw: &RawRecord) -> ResultRecord {
    ResultRecord {
        title: first_present(&[&raw.title, &raw.name]).unwrap_or_else(|| UNTITLED.to_string()),
        url: first_present(&[&raw.url, &raw.link]).unwrap_or_default(),
        summary: first_present(&[&raw.summary, &raw.snippet, &raw.description])
            .unwrap_or_else(|| NO_SUMMARY.to_string()),
        source: first_present(&[&raw.source, &raw.publisher]).unwrap_or_default(),
        published_at: first_present(&[&raw.published_at, &raw.published]).unwrap_or_default(),
    }
}

use async_trait::async_trait;
use searchhub_common::Result;
use serde::{Deserialize, Serialize};

/// What the view already knows about an item when it asks for a detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewContext {
    pub title: Option<String>,
    pub summary: Option<String>,
}

/// Opens a detail overlay for a URL. The view calls [`ContentViewer::open`]
/// and moves on; loading and failure handling belong to the viewer.
pub trait ContentViewer: Send + Sync {
    fn open(&self, url: &str, context: ViewContext);
}

/// A bookmark as acknowledged by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: Option<i64>,
    pub title: String,
    pub url: String,
    pub summary: String,
}

/// Persists a record to the saved-items store.
#[async_trait]
pub trait SaveGateway: Send + Sync {
    /// Save one item. Any `Err` is a failed save.
    async fn save(&self, title: &str, url: &str, summary: &str) -> Result<SavedItem>;
}

/// Result of a save triggered from the view, handed back to the host so it
/// can decide on user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(SavedItem),
    Failed { url: String, reason: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

//! Article overlay opened by the result list's "view" action.
//!
//! [`ContentModal::open`] shows the overlay, renders a loading state and
//! spawns the fetch. Each open bumps a generation counter; a fetch that
//! finishes after a newer open is discarded instead of overwriting it.

use crate::backend::ContentSource;
use crate::types::ContentResponse;
use regex::Regex;
use searchhub_view::markup::escape_html;
use searchhub_view::{ContentViewer, Document, SaveGateway, SaveOutcome, ViewContext};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tokio::task::JoinHandle;

pub const LOADING_TITLE: &str = "Loading content...";
pub const LOADING_BODY: &str = "Fetching article content...";
pub const ERROR_TITLE: &str = "Unable to load content";
pub const EMPTY_CONTENT: &str = "No content available.";

/// Element ids the modal writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalIds {
    pub modal: String,
    pub title: String,
    pub meta: String,
    pub body: String,
    pub status: String,
}

impl Default for ModalIds {
    fn default() -> Self {
        Self {
            modal: "contentModal".into(),
            title: "contentModalTitle".into(),
            meta: "contentModalMeta".into(),
            body: "contentModalBody".into(),
            status: "contentModalStatus".into(),
        }
    }
}

/// The item currently shown, as handed to a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownItem {
    pub url: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Default)]
struct ModalState {
    generation: u64,
    open: bool,
    item: Option<ShownItem>,
}

struct Inner {
    document: Arc<dyn Document>,
    source: Arc<dyn ContentSource>,
    gateway: Arc<dyn SaveGateway>,
    ids: ModalIds,
    state: Mutex<ModalState>,
}

/// Cheap to clone; clones drive the same overlay.
#[derive(Clone)]
pub struct ContentModal {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ContentModal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentModal")
            .field("ids", &self.inner.ids)
            .field("state", &*self.inner.lock())
            .finish()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, ModalState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render_loading(&self) {
        let doc = &self.document;
        doc.set_text(&self.ids.title, LOADING_TITLE);
        doc.set_text(&self.ids.meta, "");
        doc.set_inner_html(&self.ids.body, &status_block(LOADING_BODY));
        doc.set_text(&self.ids.status, "");
    }

    fn render_content(&self, fallback_title: &str, resp: &ContentResponse) {
        let title = resp
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(Some(fallback_title).filter(|t| !t.is_empty()))
            .unwrap_or("Untitled");
        let content = resp
            .content
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(EMPTY_CONTENT);

        let doc = &self.document;
        doc.set_text(&self.ids.title, title);
        doc.set_text(&self.ids.meta, &resp.meta_line());
        doc.set_inner_html(&self.ids.body, &format_paragraphs(content));
    }

    fn render_error(&self, message: &str) {
        let message = if message.is_empty() {
            "Unknown error"
        } else {
            message
        };
        let doc = &self.document;
        doc.set_text(&self.ids.title, ERROR_TITLE);
        doc.set_text(&self.ids.meta, "");
        doc.set_inner_html(&self.ids.body, &status_block(&format!("Error: {message}")));
    }
}

impl ContentModal {
    pub fn new(
        document: Arc<dyn Document>,
        source: Arc<dyn ContentSource>,
        gateway: Arc<dyn SaveGateway>,
    ) -> Self {
        Self::with_ids(document, source, gateway, ModalIds::default())
    }

    pub fn with_ids(
        document: Arc<dyn Document>,
        source: Arc<dyn ContentSource>,
        gateway: Arc<dyn SaveGateway>,
        ids: ModalIds,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                document,
                source,
                gateway,
                ids,
                state: Mutex::new(ModalState::default()),
            }),
        }
    }

    pub fn ids(&self) -> &ModalIds {
        &self.inner.ids
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().open
    }

    pub fn current(&self) -> Option<ShownItem> {
        self.inner.lock().item.clone()
    }

    /// Show the overlay for `url` and start loading it.
    ///
    /// Returns the fetch task, or `None` when the modal element is missing
    /// or there is no Tokio runtime to fetch on (the error is rendered).
    pub fn load(&self, url: &str, context: ViewContext) -> Option<JoinHandle<()>> {
        let inner = &self.inner;
        if !inner.document.has_element(&inner.ids.modal) {
            tracing::debug!(target: "searchhub::modal", id = %inner.ids.modal, "modal.mount_missing");
            return None;
        }

        let item = ShownItem {
            url: url.to_string(),
            title: context
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| url.to_string()),
            summary: context.summary.unwrap_or_default(),
        };
        let generation = {
            let mut state = inner.lock();
            state.generation += 1;
            state.open = true;
            state.item = Some(item.clone());
            state.generation
        };

        inner.document.set_visible(&inner.ids.modal, true);
        inner.render_loading();
        tracing::debug!(target: "searchhub::modal", url, generation, "modal.open");

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                tracing::warn!(target: "searchhub::modal", url, error = %err, "modal.no_runtime");
                inner.render_error(&err.to_string());
                return None;
            }
        };

        let task = Arc::clone(inner);
        Some(runtime.spawn(async move {
            let result = task.source.fetch(&item.url).await;

            let state = task.lock();
            if state.generation != generation {
                tracing::debug!(
                    target: "searchhub::modal",
                    url = %item.url,
                    generation,
                    current = state.generation,
                    "modal.fetch.stale"
                );
                return;
            }
            match result {
                Ok(resp) => {
                    tracing::debug!(
                        target: "searchhub::modal",
                        url = %item.url,
                        cached = ?resp.cached,
                        words = ?resp.word_count,
                        "modal.fetch.ok"
                    );
                    task.render_content(&item.title, &resp);
                }
                Err(err) => {
                    tracing::warn!(target: "searchhub::modal", url = %item.url, error = %err, "modal.fetch.failed");
                    task.render_error(&err.to_string());
                }
            }
            drop(state);
        }))
    }

    /// Hide the overlay. In-flight fetches still render into it.
    pub fn close(&self) {
        let inner = &self.inner;
        inner.lock().open = false;
        inner.document.set_visible(&inner.ids.modal, false);
    }

    /// Keyboard hook: `Escape` closes an open modal. Returns whether the key
    /// was consumed.
    pub fn handle_key(&self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.close();
            return true;
        }
        false
    }

    /// Save the item currently shown. `None` when nothing has been opened.
    pub async fn save_current(&self) -> Option<SaveOutcome> {
        let item = self.current()?;
        let outcome = match self
            .inner
            .gateway
            .save(&item.title, &item.url, &item.summary)
            .await
        {
            Ok(saved) => {
                tracing::info!(target: "searchhub::modal", url = %item.url, "modal.save.ok");
                SaveOutcome::Saved(saved)
            }
            Err(err) => {
                tracing::warn!(target: "searchhub::modal", url = %item.url, error = %err, "modal.save.failed");
                SaveOutcome::Failed {
                    url: item.url,
                    reason: err.to_string(),
                }
            }
        };
        Some(outcome)
    }
}

impl ContentViewer for ContentModal {
    fn open(&self, url: &str, context: ViewContext) {
        let _ = self.load(url, context);
    }
}

fn status_block(text: &str) -> String {
    format!(
        r#"<div class="content-modal__status">{}</div>"#,
        escape_html(text)
    )
}

fn paragraph_break() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").ok()).as_ref()
}

/// Split on blank lines into escaped `<p>` blocks.
///
/// ```
/// use searchhub_web::modal::format_paragraphs;
///
/// assert_eq!(format_paragraphs("a\n\n\nb & c"), "<p>a</p><p>b &amp; c</p>");
/// assert_eq!(format_paragraphs("   "), "<p>No content available.</p>");
/// ```
pub fn format_paragraphs(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return format!("<p>{EMPTY_CONTENT}</p>");
    }
    match paragraph_break() {
        Some(re) => re
            .split(trimmed)
            .map(|block| format!("<p>{}</p>", escape_html(block)))
            .collect(),
        None => format!("<p>{}</p>", escape_html(trimmed)),
    }
}

//! The slice of the DOM the view and the content modal touch.
//!
//! A browser binding implements [`Document`] over real elements;
//! [`MemoryDocument`] keeps element state in a map and is what tests and the
//! headless CLI render into.

use crate::markup::escape_html;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Delegated click handler registered on a mount point.
pub type ClickListener = Box<dyn Fn(ClickEvent) + Send + Sync>;

type SharedListener = Arc<dyn Fn(ClickEvent) + Send + Sync>;

/// Mount points looked up by element id. Every method returns `false` when
/// the element does not exist; callers treat that as "nothing to do".
pub trait Document: Send + Sync {
    fn has_element(&self, id: &str) -> bool;

    fn set_inner_html(&self, id: &str, html: &str) -> bool;

    /// Set text content (escaped).
    fn set_text(&self, id: &str, text: &str) -> bool {
        self.set_inner_html(id, &escape_html(text))
    }

    /// Toggle the element's display.
    fn set_visible(&self, id: &str, visible: bool) -> bool;

    /// Register a click listener on the element. Clicks on descendants bubble
    /// to it.
    fn add_click_listener(&self, id: &str, listener: ClickListener) -> bool;
}

/// A click that bubbled up to a delegated listener.
///
/// `data` holds the `data-*` attributes met on the way from the clicked node
/// up to the element the listener is bound on, nearest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub current_target: String,
    pub data: Vec<(String, String)>,
}

impl ClickEvent {
    pub fn new(current_target: impl Into<String>) -> Self {
        Self {
            current_target: current_target.into(),
            data: Vec::new(),
        }
    }

    /// Append a `data-*` attribute one level further from the clicked node.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    /// Click on a card button: the button carries `data-action`, its card
    /// carries `data-index`.
    pub fn card_action(container_id: &str, index: usize, action: &str) -> Self {
        Self::new(container_id)
            .with_data("action", action)
            .with_data("index", index.to_string())
    }

    /// Click on a pagination control.
    pub fn page(pagination_id: &str, page: &str) -> Self {
        Self::new(pagination_id).with_data("page", page)
    }

    /// Nearest `data-<key>` value, like `closest('[data-key]')`.
    pub fn closest(&self, key: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

struct MemoryElement {
    inner_html: String,
    visible: bool,
    listeners: Vec<SharedListener>,
}

impl MemoryElement {
    fn new() -> Self {
        Self {
            inner_html: String::new(),
            visible: true,
            listeners: Vec::new(),
        }
    }
}

/// In-memory [`Document`]. Clones share the same elements.
///
/// ```
/// use searchhub_view::{Document, MemoryDocument};
///
/// let doc = MemoryDocument::with_elements(["resultsContainer"]);
/// assert!(doc.set_inner_html("resultsContainer", "<p>hi</p>"));
/// assert!(!doc.set_inner_html("missing", "<p>hi</p>"));
/// assert_eq!(doc.inner_html("resultsContainer").as_deref(), Some("<p>hi</p>"));
/// ```
#[derive(Clone, Default)]
pub struct MemoryDocument {
    elements: Arc<Mutex<HashMap<String, MemoryElement>>>,
}

impl std::fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<String> = self.lock().keys().cloned().collect();
        ids.sort();
        f.debug_struct("MemoryDocument").field("elements", &ids).finish()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let doc = Self::new();
        for id in ids {
            doc.insert(id);
        }
        doc
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, MemoryElement>> {
        self.elements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add an empty, visible element. Existing elements are left untouched.
    pub fn insert(&self, id: impl Into<String>) {
        self.lock().entry(id.into()).or_insert_with(MemoryElement::new);
    }

    pub fn remove(&self, id: &str) {
        self.lock().remove(id);
    }

    pub fn inner_html(&self, id: &str) -> Option<String> {
        self.lock().get(id).map(|e| e.inner_html.clone())
    }

    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.lock().get(id).map(|e| e.visible)
    }

    pub fn listener_count(&self, id: &str) -> usize {
        self.lock().get(id).map_or(0, |e| e.listeners.len())
    }

    /// Deliver a click to every listener on `event.current_target`.
    /// Returns how many listeners ran.
    pub fn click(&self, event: ClickEvent) -> usize {
        // Listeners run outside the lock so they may touch the document.
        let listeners: Vec<SharedListener> = self
            .lock()
            .get(&event.current_target)
            .map(|e| e.listeners.clone())
            .unwrap_or_default();
        for listener in &listeners {
            listener(event.clone());
        }
        listeners.len()
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        match self.lock().get_mut(id) {
            Some(el) => {
                el.inner_html = html.to_string();
                true
            }
            None => false,
        }
    }

    fn set_visible(&self, id: &str, visible: bool) -> bool {
        match self.lock().get_mut(id) {
            Some(el) => {
                el.visible = visible;
                true
            }
            None => false,
        }
    }

    fn add_click_listener(&self, id: &str, listener: ClickListener) -> bool {
        match self.lock().get_mut(id) {
            Some(el) => {
                el.listeners.push(Arc::from(listener));
                true
            }
            None => false,
        }
    }
}

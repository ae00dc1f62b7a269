//! The result list controller.
//!
//! [`ResultListView`] owns one [`ViewState`] per `display` call. Listener
//! wiring happens once per mount point; rendering only replaces markup.
//! Delegated listeners push [`ClickEvent`]s into a channel the host drains
//! with [`ResultListView::next_event`] and feeds back through
//! [`ResultListView::handle_click`], so events are processed one at a time.

use crate::dom::{ClickEvent, Document};
use crate::markup::{render_cards, render_pagination};
use crate::record::{RawRecord, ResultRecord, normalize};
use crate::state::{DEFAULT_PAGE_SIZE, PageNav, ViewState};
use crate::traits::{ContentViewer, SaveGateway, SaveOutcome, ViewContext};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Options for one `display` call.
#[derive(Clone)]
pub struct ViewOptions {
    pub container_id: String,
    pub empty_id: String,
    pub pagination_id: String,
    pub page_size: usize,
    /// Overrides the view's registered gateway for this session.
    pub on_save: Option<Arc<dyn SaveGateway>>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            container_id: "resultsContainer".into(),
            empty_id: "resultsEmpty".into(),
            pagination_id: "resultsPagination".into(),
            page_size: DEFAULT_PAGE_SIZE,
            on_save: None,
        }
    }
}

impl fmt::Debug for ViewOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewOptions")
            .field("container_id", &self.container_id)
            .field("empty_id", &self.empty_id)
            .field("pagination_id", &self.pagination_id)
            .field("page_size", &self.page_size)
            .field("on_save", &self.on_save.is_some())
            .finish()
    }
}

impl ViewOptions {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_on_save(mut self, gateway: Arc<dyn SaveGateway>) -> Self {
        self.on_save = Some(gateway);
        self
    }

    pub fn with_mounts(mut self, container_id: &str, empty_id: &str, pagination_id: &str) -> Self {
        self.container_id = container_id.to_string();
        self.empty_id = empty_id.to_string();
        self.pagination_id = pagination_id.to_string();
        self
    }
}

/// What [`ResultListView::handle_click`] did with an event.
#[derive(Debug)]
pub enum Dispatch {
    /// Not a click on anything actionable, or a no-op navigation.
    Ignored,
    Viewed { index: usize, url: String },
    Paged { page: usize },
    /// A save is in flight; await the handle for its outcome.
    Saving {
        index: usize,
        task: JoinHandle<SaveOutcome>,
    },
    /// The save could not be started (no Tokio runtime). Already logged.
    SaveFailed { index: usize, outcome: SaveOutcome },
}

struct Session {
    options: ViewOptions,
    state: ViewState,
}

pub struct ResultListView {
    document: Arc<dyn Document>,
    viewer: Arc<dyn ContentViewer>,
    save_gateway: Arc<dyn SaveGateway>,
    events_tx: UnboundedSender<ClickEvent>,
    events_rx: UnboundedReceiver<ClickEvent>,
    bound: HashSet<String>,
    session: Option<Session>,
}

impl fmt::Debug for ResultListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultListView")
            .field("bound", &self.bound)
            .field("current_page", &self.current_page())
            .field("total_pages", &self.total_pages())
            .finish()
    }
}

impl ResultListView {
    /// `save_gateway` is used for every session whose options carry no
    /// `on_save` override.
    pub fn new(
        document: Arc<dyn Document>,
        viewer: Arc<dyn ContentViewer>,
        save_gateway: Arc<dyn SaveGateway>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            document,
            viewer,
            save_gateway,
            events_tx,
            events_rx,
            bound: HashSet::new(),
            session: None,
        }
    }

    /// Replace the shown results and render page 1.
    ///
    /// Silently does nothing visible if any of the three mount points is
    /// missing from the document.
    pub fn display(&mut self, results: Vec<RawRecord>, options: ViewOptions) {
        let records: Vec<ResultRecord> = results.iter().map(normalize).collect();
        let state = ViewState::new(records, options.page_size);
        tracing::debug!(
            target: "searchhub::view",
            results = state.results().len(),
            page_size = state.page_size(),
            container = %options.container_id,
            "view.display"
        );
        self.session = Some(Session { options, state });

        let Some(session) = &self.session else {
            return;
        };
        let mounts = [
            session.options.container_id.clone(),
            session.options.empty_id.clone(),
            session.options.pagination_id.clone(),
        ];
        if let Some(missing) = mounts.iter().find(|id| !self.document.has_element(id)) {
            tracing::debug!(target: "searchhub::view", id = %missing, "view.mount_missing");
            return;
        }

        self.bind(&mounts[0]);
        self.bind(&mounts[2]);
        self.render();
    }

    fn bind(&mut self, id: &str) {
        if self.bound.contains(id) {
            return;
        }
        let tx = self.events_tx.clone();
        let listener = Box::new(move |event: ClickEvent| {
            let _ = tx.send(event);
        });
        if self.document.add_click_listener(id, listener) {
            self.bound.insert(id.to_string());
            tracing::trace!(target: "searchhub::view", id, "view.listener_bound");
        }
    }

    /// Write the current page's cards, empty state and pagination.
    fn render(&self) {
        let Some(Session { options, state }) = &self.session else {
            return;
        };
        let doc = &self.document;

        if state.is_empty() {
            doc.set_visible(&options.empty_id, true);
            doc.set_inner_html(&options.container_id, "");
            doc.set_inner_html(&options.pagination_id, "");
            return;
        }

        doc.set_visible(&options.empty_id, false);
        doc.set_inner_html(&options.container_id, &render_cards(state));
        doc.set_inner_html(
            &options.pagination_id,
            &render_pagination(state.current_page(), state.total_pages()),
        );
    }

    /// Wait for the next click delivered by a bound listener.
    pub async fn next_event(&mut self) -> Option<ClickEvent> {
        self.events_rx.recv().await
    }

    /// Handle every click already queued, in arrival order.
    pub fn drain_events(&mut self) -> Vec<Dispatch> {
        let mut out = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            out.push(self.handle_click(event));
        }
        out
    }

    /// React to one delegated click. Saves are spawned on the current Tokio
    /// runtime; outside of one they resolve to [`Dispatch::SaveFailed`].
    pub fn handle_click(&mut self, event: ClickEvent) -> Dispatch {
        let Some(session) = self.session.as_mut() else {
            return Dispatch::Ignored;
        };

        if event.current_target == session.options.pagination_id {
            let Some(nav) = event.closest("page").and_then(PageNav::parse) else {
                return Dispatch::Ignored;
            };
            if !session.state.navigate(nav) {
                return Dispatch::Ignored;
            }
            let page = session.state.current_page();
            tracing::debug!(target: "searchhub::view", page, "view.paged");
            self.render();
            return Dispatch::Paged { page };
        }

        if event.current_target != session.options.container_id {
            return Dispatch::Ignored;
        }

        let action = event.closest("action");
        let index = event.closest("index").and_then(|i| i.parse::<usize>().ok());
        let (Some(action), Some(index)) = (action, index) else {
            return Dispatch::Ignored;
        };
        let Some(record) = session.state.record(index).cloned() else {
            return Dispatch::Ignored;
        };

        match action {
            "view" => {
                self.viewer.open(
                    &record.url,
                    ViewContext {
                        title: Some(record.title.clone()),
                        summary: Some(record.summary.clone()),
                    },
                );
                Dispatch::Viewed {
                    index,
                    url: record.url,
                }
            }
            "save" => {
                let gateway = session
                    .options
                    .on_save
                    .clone()
                    .unwrap_or_else(|| self.save_gateway.clone());
                match tokio::runtime::Handle::try_current() {
                    Ok(runtime) => Dispatch::Saving {
                        index,
                        task: runtime.spawn(run_save(gateway, record)),
                    },
                    Err(err) => Dispatch::SaveFailed {
                        index,
                        outcome: save_failed(record.url, err.to_string()),
                    },
                }
            }
            _ => Dispatch::Ignored,
        }
    }

    pub fn current_page(&self) -> Option<usize> {
        self.session
            .as_ref()
            .filter(|s| !s.state.is_empty())
            .map(|s| s.state.current_page())
    }

    pub fn total_pages(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.state.total_pages())
    }

    pub fn state(&self) -> Option<&ViewState> {
        self.session.as_ref().map(|s| &s.state)
    }
}

async fn run_save(gateway: Arc<dyn SaveGateway>, record: ResultRecord) -> SaveOutcome {
    match gateway
        .save(&record.title, &record.url, &record.summary)
        .await
    {
        Ok(item) => {
            tracing::info!(target: "searchhub::view", url = %record.url, "view.save.ok");
            SaveOutcome::Saved(item)
        }
        Err(err) => save_failed(record.url, err.to_string()),
    }
}

fn save_failed(url: String, reason: String) -> SaveOutcome {
    tracing::warn!(
        target: "searchhub::view",
        url = %url,
        error = %reason,
        "view.save.failed"
    );
    SaveOutcome::Failed { url, reason }
}

#![allow(dead_code)]

use async_trait::async_trait;
use searchhub_common::SearchHubError;
use searchhub_view::{
    ContentViewer, MemoryDocument, RawRecord, ResultListView, SaveGateway, SavedItem, ViewContext,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::layer::{Context, Layer};

pub const CONTAINER: &str = "resultsContainer";
pub const EMPTY: &str = "resultsEmpty";
pub const PAGINATION: &str = "resultsPagination";

#[derive(Default)]
pub struct RecordingViewer {
    pub opened: Mutex<Vec<(String, ViewContext)>>,
}

impl ContentViewer for RecordingViewer {
    fn open(&self, url: &str, context: ViewContext) {
        self.opened.lock().unwrap().push((url.to_string(), context));
    }
}

/// Gateway that records calls and either succeeds or rejects.
pub struct FakeGateway {
    pub calls: Mutex<Vec<(String, String, String)>>,
    reject_with: Option<String>,
}

impl FakeGateway {
    pub fn accepting() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject_with: None,
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject_with: Some(message.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SaveGateway for FakeGateway {
    async fn save(
        &self,
        title: &str,
        url: &str,
        summary: &str,
    ) -> searchhub_common::Result<SavedItem> {
        self.calls
            .lock()
            .unwrap()
            .push((title.to_string(), url.to_string(), summary.to_string()));
        match &self.reject_with {
            Some(message) => Err(SearchHubError::Rejected(message.clone())),
            None => Ok(SavedItem {
                id: Some(1),
                title: title.to_string(),
                url: url.to_string(),
                summary: summary.to_string(),
            }),
        }
    }
}

/// Counts WARN events seen by the subscriber it is installed in.
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub struct Harness {
    pub doc: MemoryDocument,
    pub viewer: Arc<RecordingViewer>,
    pub gateway: Arc<FakeGateway>,
    pub view: ResultListView,
}

pub fn harness_with(gateway: FakeGateway) -> Harness {
    let doc = MemoryDocument::with_elements([CONTAINER, EMPTY, PAGINATION]);
    let viewer = Arc::new(RecordingViewer::default());
    let gateway = Arc::new(gateway);
    let view = ResultListView::new(Arc::new(doc.clone()), viewer.clone(), gateway.clone());
    Harness {
        doc,
        viewer,
        gateway,
        view,
    }
}

pub fn harness() -> Harness {
    harness_with(FakeGateway::accepting())
}

pub fn abc() -> Vec<RawRecord> {
    vec![
        RawRecord::titled("A", "http://a"),
        RawRecord::titled("B", "http://b"),
        RawRecord::titled("C", "http://c"),
    ]
}

pub fn numbered(n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| RawRecord::titled(&format!("Item {i}"), &format!("http://item/{i}")))
        .collect()
}

/// Titles of the cards currently in the container, in markup order.
pub fn card_titles(doc: &MemoryDocument) -> Vec<String> {
    let html = doc.inner_html(CONTAINER).unwrap_or_default();
    html.split(r#"<h3 class="result-title">"#)
        .skip(1)
        .filter_map(|rest| rest.split("</h3>").next())
        .map(str::to_string)
        .collect()
}

/// `data-index` values of the cards currently in the container.
pub fn card_indices(doc: &MemoryDocument) -> Vec<usize> {
    let html = doc.inner_html(CONTAINER).unwrap_or_default();
    html.split(r#"data-index=""#)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter_map(|n| n.parse().ok())
        .collect()
}

use crate::cli::{RenderArgs, SearchArgs};
use anyhow::{Context, Result};
use searchhub_config::SearchHubConfig;
use searchhub_http::HttpClient;
use searchhub_view::{
    ClickEvent, MemoryDocument, RawRecord, ResultListView, ViewContext, ViewOptions,
};
use searchhub_web::{
    ContentModal, HttpContentSource, HttpSaveGateway, HttpSearchSource, ModalIds, SearchSummary,
    search_and_display,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Markup of one rendered page.
#[derive(Debug)]
pub struct RenderedPage {
    pub container: String,
    pub pagination: String,
    pub current_page: usize,
    pub total_pages: usize,
}

/// What the content modal ended up showing.
#[derive(Debug)]
pub struct ModalText {
    pub title: String,
    pub meta: String,
    pub body: String,
}

fn modal_ids(cfg: &SearchHubConfig) -> ModalIds {
    ModalIds {
        modal: cfg.modal.modal_id.clone(),
        title: cfg.modal.title_id.clone(),
        meta: cfg.modal.meta_id.clone(),
        body: cfg.modal.body_id.clone(),
        status: cfg.modal.status_id.clone(),
    }
}

fn http_client(cfg: &SearchHubConfig) -> Result<HttpClient> {
    Ok(HttpClient::new(&cfg.api.base_url)
        .with_context(|| format!("invalid api.base_url {:?}", cfg.api.base_url))?
        .with_timeout(Duration::from_secs(cfg.api.timeout_secs)))
}

/// A document holding every mount point the configuration names.
fn document_for(cfg: &SearchHubConfig) -> MemoryDocument {
    let ids = modal_ids(cfg);
    MemoryDocument::with_elements([
        cfg.view.container_id.clone(),
        cfg.view.empty_id.clone(),
        cfg.view.pagination_id.clone(),
        ids.modal,
        ids.title,
        ids.meta,
        ids.body,
        ids.status,
    ])
}

/// Accepts a bare array or an object with a `results` array.
pub fn records_from_json(value: &Value) -> Vec<RawRecord> {
    RawRecord::list_from_value(value.get("results").unwrap_or(value))
}

pub fn render(cfg: &SearchHubConfig, args: &RenderArgs) -> Result<RenderedPage> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.input.display()))?;
    render_records(cfg, records_from_json(&value), args.page, args.page_size)
}

fn list_view(cfg: &SearchHubConfig, doc: &MemoryDocument, http: HttpClient) -> ResultListView {
    let gateway = Arc::new(HttpSaveGateway::new(http.clone()));
    let modal = Arc::new(ContentModal::with_ids(
        Arc::new(doc.clone()),
        Arc::new(HttpContentSource::new(http)),
        gateway.clone(),
        modal_ids(cfg),
    ));
    ResultListView::new(Arc::new(doc.clone()), modal, gateway)
}

fn view_options(cfg: &SearchHubConfig, page_size: Option<usize>) -> ViewOptions {
    ViewOptions::default()
        .with_mounts(
            &cfg.view.container_id,
            &cfg.view.empty_id,
            &cfg.view.pagination_id,
        )
        .with_page_size(page_size.unwrap_or(cfg.view.page_size))
}

/// Click through to `page` the way a user would, then read the markup back.
fn show_page(
    cfg: &SearchHubConfig,
    doc: &MemoryDocument,
    view: &mut ResultListView,
    page: usize,
) -> RenderedPage {
    if page > 1 {
        doc.click(ClickEvent::page(&cfg.view.pagination_id, &page.to_string()));
        view.drain_events();
    }
    tracing::info!(
        target: "searchhub::app",
        page = ?view.current_page(),
        total_pages = view.total_pages(),
        "app.rendered"
    );
    RenderedPage {
        container: doc.inner_html(&cfg.view.container_id).unwrap_or_default(),
        pagination: doc.inner_html(&cfg.view.pagination_id).unwrap_or_default(),
        current_page: view.current_page().unwrap_or(0),
        total_pages: view.total_pages(),
    }
}

pub fn render_records(
    cfg: &SearchHubConfig,
    records: Vec<RawRecord>,
    page: usize,
    page_size: Option<usize>,
) -> Result<RenderedPage> {
    let doc = document_for(cfg);
    let mut view = list_view(cfg, &doc, http_client(cfg)?);
    view.display(records, view_options(cfg, page_size));
    Ok(show_page(cfg, &doc, &mut view, page))
}

/// Run a query against the backend and render the requested page of results.
pub async fn search(
    cfg: &SearchHubConfig,
    args: &SearchArgs,
) -> Result<(SearchSummary, RenderedPage)> {
    let doc = document_for(cfg);
    let http = http_client(cfg)?;
    let source = HttpSearchSource::new(http.clone());
    let mut view = list_view(cfg, &doc, http);

    let summary = search_and_display(
        &source,
        &mut view,
        &args.query,
        &args.search_type,
        view_options(cfg, args.page_size),
    )
    .await
    .with_context(|| format!("searching for {:?}", args.query))?;
    let page = show_page(cfg, &doc, &mut view, args.page);
    Ok((summary, page))
}

pub async fn content(cfg: &SearchHubConfig, url: &str) -> Result<ModalText> {
    let doc = document_for(cfg);
    let http = http_client(cfg)?;
    let ids = modal_ids(cfg);
    let modal = ContentModal::with_ids(
        Arc::new(doc.clone()),
        Arc::new(HttpContentSource::new(http.clone())),
        Arc::new(HttpSaveGateway::new(http)),
        ids.clone(),
    );

    if let Some(task) = modal.load(url, ViewContext::default()) {
        task.await.context("content fetch task")?;
    }
    Ok(ModalText {
        title: doc.inner_html(&ids.title).unwrap_or_default(),
        meta: doc.inner_html(&ids.meta).unwrap_or_default(),
        body: doc.inner_html(&ids.body).unwrap_or_default(),
    })
}

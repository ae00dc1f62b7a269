mod common;

use common::*;
use searchhub_view::{ClickEvent, Dispatch, Document, RawRecord, SaveOutcome, ViewOptions};
use serde_json::json;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;

fn pagination(h: &Harness) -> String {
    h.doc.inner_html(PAGINATION).unwrap_or_default()
}

#[test]
fn three_results_two_per_page() {
    let mut h = harness();
    h.view.display(abc(), ViewOptions::default().with_page_size(2));

    assert_eq!(card_titles(&h.doc), vec!["A", "B"]);
    assert_eq!(
        pagination(&h),
        concat!(
            r#"<button disabled data-page="prev">Prev</button>"#,
            r#"<button class="active" data-page="1">1</button>"#,
            r#"<button data-page="2">2</button>"#,
            r#"<button data-page="next">Next</button>"#,
        )
    );

    let dispatch = h.view.handle_click(ClickEvent::page(PAGINATION, "2"));
    assert!(matches!(dispatch, Dispatch::Paged { page: 2 }));
    assert_eq!(card_titles(&h.doc), vec!["C"]);
    assert_eq!(card_indices(&h.doc), vec![2]);
    assert_eq!(
        pagination(&h),
        concat!(
            r#"<button data-page="prev">Prev</button>"#,
            r#"<button data-page="1">1</button>"#,
            r#"<button class="active" data-page="2">2</button>"#,
            r#"<button disabled data-page="next">Next</button>"#,
        )
    );
}

#[test]
fn every_page_matches_its_slice() {
    let mut h = harness();
    h.view.display(numbered(11), ViewOptions::default().with_page_size(4));
    assert_eq!(h.view.total_pages(), 3);
    assert_eq!(h.view.current_page(), Some(1));

    for page in 1..=3usize {
        h.view
            .handle_click(ClickEvent::page(PAGINATION, &page.to_string()));
        let expected: Vec<usize> = ((page - 1) * 4..(page * 4).min(11)).collect();
        assert_eq!(card_indices(&h.doc), expected, "page {page}");
    }
}

#[test]
fn default_page_size_is_six() {
    let mut h = harness();
    h.view.display(numbered(7), ViewOptions::default());
    assert_eq!(card_indices(&h.doc), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(h.view.total_pages(), 2);
}

#[test]
fn edges_are_no_ops() {
    let mut h = harness();
    h.view.display(abc(), ViewOptions::default().with_page_size(2));

    let before = h.doc.inner_html(CONTAINER);
    assert!(matches!(
        h.view.handle_click(ClickEvent::page(PAGINATION, "prev")),
        Dispatch::Ignored
    ));
    assert_eq!(h.view.current_page(), Some(1));
    assert_eq!(h.doc.inner_html(CONTAINER), before);

    h.view.handle_click(ClickEvent::page(PAGINATION, "next"));
    assert_eq!(h.view.current_page(), Some(2));
    assert!(matches!(
        h.view.handle_click(ClickEvent::page(PAGINATION, "next")),
        Dispatch::Ignored
    ));
    assert_eq!(h.view.current_page(), Some(2));
}

#[test]
fn out_of_range_page_numbers_are_clamped() {
    let mut h = harness();
    h.view.display(numbered(5), ViewOptions::default().with_page_size(2));
    h.view.handle_click(ClickEvent::page(PAGINATION, "40"));
    assert_eq!(h.view.current_page(), Some(3));
    assert_eq!(card_indices(&h.doc), vec![4]);
}

#[test]
fn empty_results_show_empty_state() {
    let mut h = harness();
    h.view.display(abc(), ViewOptions::default().with_page_size(2));
    assert_eq!(h.doc.is_visible(EMPTY), Some(false));

    h.view.display(Vec::new(), ViewOptions::default().with_page_size(2));
    assert_eq!(h.doc.is_visible(EMPTY), Some(true));
    assert_eq!(h.doc.inner_html(CONTAINER).as_deref(), Some(""));
    assert_eq!(h.doc.inner_html(PAGINATION).as_deref(), Some(""));
    assert_eq!(h.view.current_page(), None);
}

#[test]
fn second_display_resets_page_and_content() {
    let mut h = harness();
    h.view.display(numbered(9), ViewOptions::default().with_page_size(3));
    h.view.handle_click(ClickEvent::page(PAGINATION, "3"));
    assert_eq!(h.view.current_page(), Some(3));

    h.view.display(abc(), ViewOptions::default().with_page_size(3));
    assert_eq!(h.view.current_page(), Some(1));
    assert_eq!(card_titles(&h.doc), vec!["A", "B", "C"]);
    assert!(!h.doc.inner_html(CONTAINER).unwrap().contains("Item"));
    assert_eq!(pagination(&h), "");
}

#[test]
fn alternate_field_names_render_identically() {
    let mut legacy = harness();
    legacy.view.display(
        RawRecord::list_from_value(&json!([{"name": "X", "link": "http://u", "snippet": "S"}])),
        ViewOptions::default(),
    );
    let mut current = harness();
    current.view.display(
        RawRecord::list_from_value(&json!([{"title": "X", "url": "http://u", "summary": "S"}])),
        ViewOptions::default(),
    );
    assert_eq!(
        legacy.doc.inner_html(CONTAINER),
        current.doc.inner_html(CONTAINER)
    );
}

#[test]
fn missing_mount_point_is_a_silent_no_op() {
    for missing in [CONTAINER, EMPTY, PAGINATION] {
        let mut h = harness();
        for id in [CONTAINER, EMPTY, PAGINATION] {
            h.doc.set_inner_html(id, "untouched");
        }
        h.doc.set_visible(EMPTY, false);
        h.doc.remove(missing);

        h.view.display(abc(), ViewOptions::default());

        for id in [CONTAINER, EMPTY, PAGINATION].into_iter().filter(|id| *id != missing) {
            assert_eq!(
                h.doc.inner_html(id).as_deref(),
                Some("untouched"),
                "{id} changed while {missing} was missing"
            );
            assert_eq!(h.doc.listener_count(id), 0, "{id} bound while {missing} was missing");
        }
        if missing != EMPTY {
            assert_eq!(h.doc.is_visible(EMPTY), Some(false), "{missing} missing");
        }
    }
}

#[test]
fn listeners_are_bound_once() {
    let mut h = harness();
    for _ in 0..3 {
        h.view.display(abc(), ViewOptions::default().with_page_size(1));
    }
    assert_eq!(h.doc.listener_count(CONTAINER), 1);
    assert_eq!(h.doc.listener_count(PAGINATION), 1);

    assert_eq!(h.doc.click(ClickEvent::page(PAGINATION, "next")), 1);
    let handled = h.view.drain_events();
    assert_eq!(handled.len(), 1);
    assert_eq!(h.view.current_page(), Some(2));
}

#[test]
fn view_action_opens_viewer_with_original_record() {
    let mut h = harness();
    h.view.display(
        RawRecord::list_from_value(&json!([
            {"title": "A", "url": "http://a", "summary": "first"},
            {"title": "B", "url": "http://b", "snippet": "second"},
            {"title": "C", "url": "http://c"}
        ])),
        ViewOptions::default().with_page_size(2),
    );
    h.view.handle_click(ClickEvent::page(PAGINATION, "2"));

    let dispatch = h
        .view
        .handle_click(ClickEvent::card_action(CONTAINER, 1, "view"));
    match dispatch {
        Dispatch::Viewed { index, url } => {
            assert_eq!(index, 1);
            assert_eq!(url, "http://b");
        }
        other => panic!("expected Viewed, got {other:?}"),
    }

    let opened = h.viewer.opened.lock().unwrap();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].0, "http://b");
    assert_eq!(opened[0].1.title.as_deref(), Some("B"));
    assert_eq!(opened[0].1.summary.as_deref(), Some("second"));
}

#[test]
fn clicks_without_a_valid_target_are_ignored() {
    let mut h = harness();
    h.view.display(abc(), ViewOptions::default());

    let stray = [
        ClickEvent::new(CONTAINER),
        ClickEvent::new(CONTAINER).with_data("index", "0"),
        ClickEvent::card_action(CONTAINER, 99, "view"),
        ClickEvent::card_action(CONTAINER, 0, "delete"),
        ClickEvent::card_action("elsewhere", 0, "view"),
        ClickEvent::page(PAGINATION, "last"),
    ];
    for event in stray {
        assert!(matches!(h.view.handle_click(event), Dispatch::Ignored));
    }
    assert!(h.viewer.opened.lock().unwrap().is_empty());
}

#[test]
fn clicks_before_any_display_are_ignored() {
    let mut h = harness();
    assert!(matches!(
        h.view
            .handle_click(ClickEvent::card_action(CONTAINER, 0, "view")),
        Dispatch::Ignored
    ));
}

#[tokio::test]
async fn save_uses_registered_gateway_by_default() {
    let mut h = harness();
    h.view.display(abc(), ViewOptions::default());

    let Dispatch::Saving { index, task } = h
        .view
        .handle_click(ClickEvent::card_action(CONTAINER, 2, "save"))
    else {
        panic!("expected a save");
    };
    assert_eq!(index, 2);
    let outcome = task.await.unwrap();
    assert!(outcome.is_saved());
    assert_eq!(
        h.gateway.calls.lock().unwrap().as_slice(),
        &[(
            "C".to_string(),
            "http://c".to_string(),
            "No summary provided.".to_string()
        )]
    );
}

#[tokio::test]
async fn on_save_option_overrides_registered_gateway() {
    let mut h = harness();
    let page_gateway = Arc::new(FakeGateway::accepting());
    h.view.display(
        abc(),
        ViewOptions::default().with_on_save(page_gateway.clone()),
    );

    let Dispatch::Saving { task, .. } = h
        .view
        .handle_click(ClickEvent::card_action(CONTAINER, 0, "save"))
    else {
        panic!("expected a save");
    };
    task.await.unwrap();
    assert_eq!(page_gateway.call_count(), 1);
    assert_eq!(h.gateway.call_count(), 0);
}

#[tokio::test]
async fn rejected_save_logs_once_and_leaves_markup_alone() {
    let warnings = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut h = harness_with(FakeGateway::rejecting("URL already saved"));
    h.view.display(abc(), ViewOptions::default());
    let before = h.doc.inner_html(CONTAINER);

    let Dispatch::Saving { task, .. } = h
        .view
        .handle_click(ClickEvent::card_action(CONTAINER, 1, "save"))
    else {
        panic!("expected a save");
    };
    let outcome = task.await.unwrap();

    assert_eq!(
        outcome,
        SaveOutcome::Failed {
            url: "http://b".into(),
            reason: "Rejected by backend: URL already saved".into(),
        }
    );
    assert_eq!(h.doc.inner_html(CONTAINER), before);
    assert_eq!(warnings.count(), 1);
}

#[tokio::test]
async fn events_flow_through_the_listener_channel() {
    let mut h = harness();
    h.view.display(abc(), ViewOptions::default().with_page_size(1));

    h.doc.click(ClickEvent::page(PAGINATION, "3"));
    h.doc.click(ClickEvent::card_action(CONTAINER, 2, "view"));

    let first = h.view.next_event().await.unwrap();
    assert!(matches!(h.view.handle_click(first), Dispatch::Paged { page: 3 }));
    let second = h.view.next_event().await.unwrap();
    assert!(matches!(
        h.view.handle_click(second),
        Dispatch::Viewed { index: 2, .. }
    ));
}

#[test]
fn save_without_runtime_fails_softly() {
    let warnings = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(warnings.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut h = harness();
    h.view.display(abc(), ViewOptions::default());
    let before = h.doc.inner_html(CONTAINER);

    h.doc.click(ClickEvent::card_action(CONTAINER, 0, "save"));
    let dispatched = h.view.drain_events();

    assert_eq!(dispatched.len(), 1);
    match &dispatched[0] {
        Dispatch::SaveFailed { index, outcome } => {
            assert_eq!(*index, 0);
            assert!(matches!(outcome, SaveOutcome::Failed { url, .. } if url == "http://a"));
        }
        other => panic!("expected SaveFailed, got {other:?}"),
    }
    assert_eq!(h.gateway.call_count(), 0);
    assert_eq!(h.doc.inner_html(CONTAINER), before);
    assert_eq!(warnings.count(), 1);
}

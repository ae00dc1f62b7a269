//! HTML fragments for cards and pagination controls.
//!
//! Only two things are load-bearing for behavior: each card carries
//! `data-index` (its position in the full result list) and each control
//! carries `data-action` or `data-page`. Class names are styling hooks.

use crate::record::ResultRecord;
use crate::state::ViewState;

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_card(record: &ResultRecord, index: usize) -> String {
    format!(
        r#"<article class="result-card" data-index="{index}">
    <div class="result-meta">{meta}</div>
    <h3 class="result-title">{title}</h3>
    <p class="result-snippet">{summary}</p>
    <div class="result-actions">
        <button class="btn" data-action="view">View content</button>
        <button class="btn btn-secondary" data-action="save">Save</button>
    </div>
</article>
"#,
        meta = escape_html(&record.meta_line()),
        title = escape_html(&record.title),
        summary = escape_html(&record.summary),
    )
}

/// Cards for the current page, in original order.
pub fn render_cards(state: &ViewState) -> String {
    state
        .visible()
        .map(|(index, record)| render_card(record, index))
        .collect()
}

/// Prev, one button per page, Next. Empty when there is at most one page.
pub fn render_pagination(current: usize, total: usize) -> String {
    if total <= 1 {
        return String::new();
    }

    let mut buttons = Vec::with_capacity(total + 2);
    buttons.push(format!(
        r#"<button{} data-page="prev">Prev</button>"#,
        if current == 1 { " disabled" } else { "" }
    ));
    for page in 1..=total {
        let active = if page == current {
            r#" class="active""#
        } else {
            ""
        };
        buttons.push(format!(
            r#"<button{active} data-page="{page}">{page}</button>"#
        ));
    }
    buttons.push(format!(
        r#"<button{} data-page="next">Next</button>"#,
        if current == total { " disabled" } else { "" }
    ));
    buttons.concat()
}

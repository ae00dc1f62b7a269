//! Per-session paging state.

use crate::record::ResultRecord;
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// A pagination request, as carried by a control's `data-page` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Prev,
    Next,
    Number(usize),
}

impl PageNav {
    /// `"prev"`, `"next"` or a page number; anything else is not a request.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            other => other.parse::<usize>().ok().map(Self::Number),
        }
    }
}

/// The results of one `display` call plus the page being shown.
///
/// Invariant: when `results` is non-empty, `1 <= current_page <= total_pages()`.
#[derive(Debug, Clone)]
pub struct ViewState {
    results: Vec<ResultRecord>,
    page_size: usize,
    current_page: usize,
}

impl ViewState {
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`].
    pub fn new(results: Vec<ResultRecord>, page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            results,
            page_size,
            current_page: 1,
        }
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(len / page_size)`; zero for an empty result set.
    pub fn total_pages(&self) -> usize {
        self.results.len().div_ceil(self.page_size)
    }

    /// Indices into `results` shown on the current page.
    pub fn page_range(&self) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(self.results.len());
        let end = start.saturating_add(self.page_size).min(self.results.len());
        start..end
    }

    /// Records on the current page, each paired with its index in `results`.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &ResultRecord)> {
        let range = self.page_range();
        self.results[range.clone()]
            .iter()
            .enumerate()
            .map(move |(offset, record)| (range.start + offset, record))
    }

    /// Look up a record by its index in the full result list.
    pub fn record(&self, index: usize) -> Option<&ResultRecord> {
        self.results.get(index)
    }

    /// Apply a navigation request. Returns `true` if the page changed.
    pub fn navigate(&mut self, nav: PageNav) -> bool {
        let total = self.total_pages();
        if total == 0 {
            return false;
        }
        let target = match nav {
            PageNav::Prev => self.current_page.saturating_sub(1),
            PageNav::Next => self.current_page + 1,
            PageNav::Number(n) => n,
        }
        .clamp(1, total);

        if target == self.current_page {
            return false;
        }
        self.current_page = target;
        true
    }
}

//! Browser-side collaborators of the result list.
//!
//! - [`modal::ContentModal`]: the content viewer overlay
//! - [`backend`]: [`HttpSaveGateway`], [`HttpContentSource`] and
//!   [`HttpSearchSource`] over the REST API
//! - [`search`]: search, record history, display
//! - [`types`]: wire shapes of the backend responses

pub mod backend;
pub mod modal;
pub mod search;
pub mod types;

pub use backend::{
    ContentSource, HttpContentSource, HttpSaveGateway, HttpSearchSource, SearchSource,
};
pub use modal::{ContentModal, ModalIds, ShownItem};
pub use search::{DEFAULT_SEARCH_TYPE, SearchSummary, search_and_display};
pub use types::{
    ContentResponse, HistoryRequest, HistoryResponse, SavedItemRequest, SavedItemResponse,
    SearchRequest, SearchResponse,
};

//! Paginated, action-bound result list.
//!
//! - [`record`]: loosely shaped input and the canonical [`ResultRecord`]
//! - [`state`]: paging state for one display session
//! - [`markup`]: card and pagination HTML
//! - [`dom`]: the [`Document`] seam and an in-memory implementation
//! - [`traits`]: collaborators the view calls ([`ContentViewer`], [`SaveGateway`])
//! - [`view`]: the [`ResultListView`] controller
//!
//! ```rust
//! use searchhub_view::{
//!     ContentViewer, MemoryDocument, RawRecord, ResultListView, SaveGateway, SavedItem,
//!     ViewContext, ViewOptions,
//! };
//! use std::sync::Arc;
//!
//! struct NoViewer;
//! impl ContentViewer for NoViewer {
//!     fn open(&self, _url: &str, _context: ViewContext) {}
//! }
//!
//! struct NoStore;
//! #[async_trait::async_trait]
//! impl SaveGateway for NoStore {
//!     async fn save(&self, title: &str, url: &str, summary: &str) -> searchhub_common::Result<SavedItem> {
//!         Ok(SavedItem { id: None, title: title.into(), url: url.into(), summary: summary.into() })
//!     }
//! }
//!
//! let doc = MemoryDocument::with_elements(["resultsContainer", "resultsEmpty", "resultsPagination"]);
//! let mut view = ResultListView::new(Arc::new(doc.clone()), Arc::new(NoViewer), Arc::new(NoStore));
//! view.display(vec![RawRecord::titled("A", "http://a")], ViewOptions::default());
//!
//! assert!(doc.inner_html("resultsContainer").unwrap().contains("A"));
//! assert_eq!(doc.is_visible("resultsEmpty"), Some(false));
//! assert_eq!(view.total_pages(), 1);
//! ```

pub mod dom;
pub mod markup;
pub mod record;
pub mod state;
pub mod traits;
pub mod view;

pub use dom::{ClickEvent, ClickListener, Document, MemoryDocument};
pub use record::{RawRecord, ResultRecord, normalize};
pub use state::{DEFAULT_PAGE_SIZE, PageNav, ViewState};
pub use traits::{ContentViewer, SaveGateway, SaveOutcome, SavedItem, ViewContext};
pub use view::{Dispatch, ResultListView, ViewOptions};

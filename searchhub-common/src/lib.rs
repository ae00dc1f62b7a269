//! Types shared by every SearchHub crate.
//!
//! The view, the HTTP adapters and the binary all depend on it. It carries
//! the shared error type and the [`observability`] bootstrap.
//!
//! ```rust
//! use searchhub_common::SearchHubError;
//!
//! let err = SearchHubError::Rejected("URL already saved".into());
//! assert_eq!(err.to_string(), "Rejected by backend: URL already saved");
//! assert!(err.is_rejection());
//! ```

pub mod observability;

/// Errors surfaced by SearchHub collaborators (save gateways, content sources).
#[derive(thiserror::Error, Debug)]
pub enum SearchHubError {
    /// The backend answered, but refused the request (4xx with a message).
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    /// Transport-level failure: connect, timeout, non-JSON body.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The caller's input was refused before any request was made.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else bubbled up from a collaborator.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SearchHubError {
    /// True when the backend understood the request and declined it.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Convenient alias for results that use [`SearchHubError`].
pub type Result<T> = std::result::Result<T, SearchHubError>;

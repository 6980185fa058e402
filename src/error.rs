//! Error types for index lifecycle and document operations

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during index lifecycle and document operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Operation requires a persisted record with an assigned key
    #[error("Record is not persisted and has no key")]
    NotPersisted,

    /// Alias create/delete/resolve failure
    #[error("Alias operation failed: {0}")]
    AliasOperation(String),

    /// Incompatible field-type change in a mapping update
    #[error("Mapping conflict: {0}")]
    MappingConflict(String),

    /// Operation targeted a nonexistent physical index or unresolved alias
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Hit violates the response contract (missing `_source` or `_score`)
    #[error("Malformed hit: {0}")]
    MalformedHit(String),

    /// Opaque failure from the underlying network/client layer
    #[error("Transport error: {0}")]
    Transport(String),

    /// Document or request body serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Transport(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            SearchError::Transport(format!("Failed to connect to engine: {}", err))
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Serialization(err.to_string())
    }
}

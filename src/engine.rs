//! Engine-facing interface
//!
//! The wire protocol and cluster internals are external collaborators; this
//! module pins down only the request shapes the orchestration layer needs.
//! [`HttpEngine`](crate::http::HttpEngine) is the production implementation;
//! tests substitute an in-memory fake.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SearchResult;
use crate::params::RequestParams;

/// Settings fixed at physical index creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSettings {
    pub shards: u32,
    pub replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            shards: 1,
            replicas: 0,
        }
    }
}

/// One step of a multi-action alias update
///
/// Serializes to the engine's action format, e.g.
/// `{"add": {"index": "blog_1700000000", "alias": "blog_write"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasAction {
    Add { index: String, alias: String },
    Remove { index: String, alias: String },
}

/// Engine acknowledgement of an index-write request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexAck {
    /// Document id, mirrors the record key
    #[serde(rename = "_id")]
    pub id: String,

    /// Version assigned or confirmed by the engine
    #[serde(rename = "_version")]
    pub version: i64,

    /// True when the write created the document rather than updating it
    #[serde(default)]
    pub created: bool,
}

/// Engine acknowledgement of a delete-by-id request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAck {
    #[serde(rename = "_id")]
    pub id: String,

    /// False when no document with that id existed
    #[serde(default)]
    pub found: bool,
}

/// A stored document returned by a get-by-id request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_version")]
    pub version: Option<i64>,

    #[serde(rename = "_source")]
    pub source: Map<String, Value>,
}

/// One raw match returned by a query, prior to hydration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_score")]
    pub score: Option<f64>,

    #[serde(rename = "_version", skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,

    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Map<String, Value>>,

    /// Field-level projections, overlaid onto `_source` during hydration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
}

/// The hits section of a search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HitsBlock {
    /// Total matches before pagination
    pub total: u64,

    pub max_score: Option<f64>,

    pub hits: Vec<RawHit>,
}

/// Raw result envelope of a search request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchEnvelope {
    /// Engine-reported execution time in milliseconds
    #[serde(default)]
    pub took: Option<u64>,

    pub hits: HitsBlock,

    /// Serialized caller query, attached for traceability; never on the wire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Client-side view of the search engine
///
/// Request shapes are logical, not wire-exact: implementations own the
/// protocol. All calls are synchronous request/response; cancellation and
/// timeouts are the transport's concern.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Create a physical index with the given settings
    async fn create_index(&self, index: &str, settings: IndexSettings) -> SearchResult<()>;

    /// Delete a physical index outright
    async fn delete_index(&self, index: &str) -> SearchResult<()>;

    /// Whether an index (or alias) with this name exists
    async fn index_exists(&self, index: &str) -> SearchResult<bool>;

    /// Apply alias actions as a single atomic request
    async fn apply_alias_actions(&self, actions: &[AliasAction]) -> SearchResult<()>;

    /// Resolve an alias to the physical index it is bound to
    ///
    /// Fails with [`SearchError::IndexNotFound`](crate::SearchError::IndexNotFound)
    /// when the alias does not exist.
    async fn resolve_alias(&self, alias: &str) -> SearchResult<String>;

    /// Full alias-to-index map, diagnostic use only
    async fn list_aliases(&self) -> SearchResult<HashMap<String, String>>;

    /// Field mapping currently applied to a category, empty when unmapped
    async fn get_mapping(&self, index: &str, category: &str)
        -> SearchResult<Map<String, Value>>;

    /// Apply a field mapping to a category
    async fn put_mapping(
        &self,
        index: &str,
        category: &str,
        properties: &Map<String, Value>,
        ignore_conflicts: bool,
    ) -> SearchResult<()>;

    /// Whether the category holds any mapping under this index
    async fn category_exists(&self, index: &str, category: &str) -> SearchResult<bool>;

    /// Submit a document body under an id
    async fn index_document(
        &self,
        index: &str,
        category: &str,
        id: &str,
        body: &Map<String, Value>,
    ) -> SearchResult<IndexAck>;

    /// Delete a document by id
    async fn delete_document(&self, index: &str, category: &str, id: &str)
        -> SearchResult<DeleteAck>;

    /// Fetch a document by id, `None` when absent
    async fn get_document(
        &self,
        index: &str,
        category: &str,
        id: &str,
    ) -> SearchResult<Option<StoredDocument>>;

    /// Execute a search request
    async fn search(&self, params: &RequestParams, body: &Value) -> SearchResult<SearchEnvelope>;
}

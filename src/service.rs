//! Caller-facing service
//!
//! One entry point per record type, composing the lifecycle controller,
//! document indexer, search executor, and alias manager over a shared
//! engine handle. Lifecycle operations and document operations are
//! independent flows; they share only the name and parameter derivations.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::alias::AliasManager;
use crate::config::EngineConfig;
use crate::document::{BulkReport, DocumentIndexer};
use crate::engine::{
    DeleteAck, IndexAck, IndexSettings, SearchEngine, SearchEnvelope, StoredDocument,
};
use crate::error::SearchResult;
use crate::executor::SearchExecutor;
use crate::hydrate::{hydrate_all, HydratedRecord};
use crate::lifecycle::IndexLifecycle;
use crate::names::IndexNames;
use crate::params::ParamBuilder;
use crate::record::Searchable;

/// Hydrated search results with envelope metadata
#[derive(Debug)]
pub struct SearchResponse<R> {
    /// Hydrated results in relevance order
    pub hits: Vec<HydratedRecord<R>>,

    /// Total matches before pagination
    pub total_hits: u64,

    pub max_score: Option<f64>,

    /// Engine-reported execution time in milliseconds
    pub took: Option<u64>,

    /// Serialized query echo, present for structured searches
    pub query: Option<String>,
}

impl<R: Searchable> SearchResponse<R> {
    fn from_envelope(envelope: SearchEnvelope) -> SearchResult<Self> {
        Ok(Self {
            hits: hydrate_all(&envelope)?,
            total_hits: envelope.hits.total,
            max_score: envelope.hits.max_score,
            took: envelope.took,
            query: envelope.query,
        })
    }
}

/// Per-record-type search service
pub struct SearchService<E, R> {
    lifecycle: IndexLifecycle<E, R>,
    indexer: DocumentIndexer<E, R>,
    executor: SearchExecutor<E, R>,
    names: IndexNames,
}

impl<E: SearchEngine, R: Searchable> SearchService<E, R> {
    /// Build a service for `R` from an engine handle and configuration
    pub fn new(engine: Arc<E>, config: &EngineConfig) -> Self {
        let names = IndexNames::for_record::<R>(config);
        let params = ParamBuilder::new(names.clone());
        let settings = IndexSettings {
            shards: config.default_shards,
            replicas: config.default_replicas,
        };

        Self {
            lifecycle: IndexLifecycle::new(Arc::clone(&engine), params.clone(), settings),
            indexer: DocumentIndexer::new(Arc::clone(&engine), params.clone()),
            executor: SearchExecutor::new(engine, params),
            names,
        }
    }

    /// Name derivations for this record type's logical index
    pub fn names(&self) -> &IndexNames {
        &self.names
    }

    // --- Index lifecycle ---

    /// Bootstrap a new logical index: create a physical index and bind both
    /// aliases to it. Returns the physical index name.
    pub async fn create_index(&self, settings: IndexSettings) -> SearchResult<String> {
        self.lifecycle.create_index(true, settings).await
    }

    /// Rebuild with zero read downtime; see [`IndexLifecycle::rebuild_index`]
    pub async fn rebuild_index(&self) -> SearchResult<String> {
        self.lifecycle.rebuild_index().await
    }

    /// Delete a physical index outright
    pub async fn delete_index(&self, physical: &str) -> SearchResult<()> {
        self.lifecycle.delete_index(physical).await
    }

    /// Whether an index or alias with this name exists
    pub async fn index_exists(&self, index: &str) -> SearchResult<bool> {
        self.lifecycle.index_exists(index).await
    }

    /// Whether the record's category exists under the read alias
    pub async fn category_exists(&self) -> SearchResult<bool> {
        self.lifecycle.category_exists().await
    }

    /// Promote reads to the write target after a rebuild is populated
    ///
    /// Moves the read alias to whatever physical index the write alias
    /// currently resolves to, and returns the physical index the reads were
    /// previously served from (the orphan to reclaim), when it differs.
    pub async fn promote_reads(&self) -> SearchResult<Option<String>> {
        let aliases = self.lifecycle.aliases();
        let target = aliases
            .resolve_physical_index(&self.names.write_alias())
            .await?
            .ok_or_else(|| {
                crate::SearchError::AliasOperation(format!(
                    "{} is not bound to any index",
                    self.names.write_alias()
                ))
            })?;

        let previous = aliases
            .resolve_physical_index(&self.names.read_alias())
            .await?;
        aliases.update_alias(&self.names.read_alias(), &target).await?;

        Ok(previous.filter(|p| *p != target))
    }

    // --- Mapping ---

    pub async fn put_mapping(&self, ignore_conflicts: bool) -> SearchResult<()> {
        self.lifecycle.mapping().put_mapping(ignore_conflicts).await
    }

    pub async fn get_mapping(&self) -> SearchResult<Map<String, Value>> {
        self.lifecycle.mapping().get_mapping().await
    }

    pub async fn mapping_exists(&self) -> SearchResult<bool> {
        self.lifecycle.mapping().mapping_exists().await
    }

    // --- Aliases ---

    pub async fn create_alias(&self, alias: &str, index: &str) -> SearchResult<()> {
        self.lifecycle.aliases().create_alias(alias, index).await
    }

    pub async fn delete_alias(&self, alias: &str, index: &str) -> SearchResult<()> {
        self.lifecycle.aliases().delete_alias(alias, index).await
    }

    pub async fn update_alias(&self, alias: &str, index: &str) -> SearchResult<()> {
        self.lifecycle.aliases().update_alias(alias, index).await
    }

    /// Physical index currently serving reads, when bound
    pub async fn read_index(&self) -> SearchResult<Option<String>> {
        self.lifecycle
            .aliases()
            .resolve_physical_index(&self.names.read_alias())
            .await
    }

    /// Physical index currently receiving writes, when bound
    pub async fn write_index(&self) -> SearchResult<Option<String>> {
        self.lifecycle
            .aliases()
            .resolve_physical_index(&self.names.write_alias())
            .await
    }

    pub async fn get_aliases(&self) -> SearchResult<HashMap<String, String>> {
        self.lifecycle.aliases().list_aliases().await
    }

    // --- Documents ---

    pub async fn add_to_index(&self, record: &R) -> SearchResult<IndexAck> {
        self.indexer.index_one(record).await
    }

    /// Index every record in the collection, collecting per-record outcomes
    pub async fn add_all_to_index(&self, records: &[R]) -> BulkReport {
        self.indexer.index_many(records).await
    }

    pub async fn remove_from_index(&self, record: &R) -> SearchResult<DeleteAck> {
        self.indexer.remove_one(record).await
    }

    pub async fn get_indexed_document(&self, record: &R) -> SearchResult<Option<StoredDocument>> {
        self.indexer.fetch_document(record).await
    }

    // --- Search ---

    /// Free-text search with hydrated results
    pub async fn search(&self, term: &str) -> SearchResult<SearchResponse<R>> {
        let envelope = self.executor.search(term).await?;
        SearchResponse::from_envelope(envelope)
    }

    /// Structured search returning the raw envelope with query echo
    pub async fn search_by_query(
        &self,
        query: Option<Value>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> SearchResult<SearchEnvelope> {
        self.executor.search_by_query(query, limit, offset).await
    }

    /// Structured search with hydrated results
    pub async fn search_by_query_hydrated(
        &self,
        query: Option<Value>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> SearchResult<SearchResponse<R>> {
        let envelope = self.executor.search_by_query(query, limit, offset).await?;
        SearchResponse::from_envelope(envelope)
    }
}

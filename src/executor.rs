//! Search execution
//!
//! Builds and issues search requests. Every query routes through the read
//! alias, never the write alias, so searches keep working against the old
//! physical index while a rebuild is in progress.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::engine::{SearchEngine, SearchEnvelope};
use crate::error::SearchResult;
use crate::params::{OperationKind, ParamBuilder};
use crate::record::Searchable;

/// Issues free-text and structured queries for one record type
pub struct SearchExecutor<E, R> {
    engine: Arc<E>,
    params: ParamBuilder,
    _record: PhantomData<fn() -> R>,
}

impl<E, R> Clone for SearchExecutor<E, R> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            params: self.params.clone(),
            _record: PhantomData,
        }
    }
}

impl<E: SearchEngine, R: Searchable> SearchExecutor<E, R> {
    pub fn new(engine: Arc<E>, params: ParamBuilder) -> Self {
        Self {
            engine,
            params,
            _record: PhantomData,
        }
    }

    /// Free-text search: a match query against the catch-all field
    pub async fn search(&self, term: &str) -> SearchResult<SearchEnvelope> {
        let params = self.params.read();
        let body = json!({
            "query": {
                "match": {
                    "_all": term
                }
            }
        });

        debug!(index = %params.index, term = %term, "Executing free-text search");
        self.engine.search(&params, &body).await
    }

    /// Structured search with an arbitrary caller-supplied query body
    ///
    /// Defaults to match-all when no query is given. Source and timestamp
    /// retrieval are enabled, and the effective query is echoed (serialized)
    /// on the returned envelope for traceability.
    pub async fn search_by_query(
        &self,
        query: Option<Value>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> SearchResult<SearchEnvelope> {
        let params = self.params.basic(OperationKind::Read, true, true, limit, offset);

        let body = match query {
            Some(query) => query,
            None => json!({
                "query": {
                    "match_all": {}
                }
            }),
        };

        debug!(index = %params.index, "Executing structured search");
        let mut envelope = self.engine.search(&params, &body).await?;
        envelope.query = Some(serde_json::to_string(&body)?);
        Ok(envelope)
    }
}

//! Document indexing pipeline
//!
//! Serializes records into index documents and submits them against the
//! write alias; fetches go through the read alias. Bulk indexing isolates
//! per-record failures instead of aborting the batch.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::{DeleteAck, IndexAck, SearchEngine, StoredDocument};
use crate::error::{SearchError, SearchResult};
use crate::params::ParamBuilder;
use crate::record::{document_body, Searchable};

/// One failed record in a bulk submission
#[derive(Debug)]
pub struct BulkFailure {
    /// Position of the record in the submitted batch
    pub position: usize,

    /// Record key, when the record had one
    pub key: Option<String>,

    pub error: SearchError,
}

/// Collected outcome of a bulk submission
#[derive(Debug, Default)]
pub struct BulkReport {
    pub successes: Vec<IndexAck>,
    pub failures: Vec<BulkFailure>,
}

impl BulkReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Projects records into index documents and submits them
pub struct DocumentIndexer<E, R> {
    engine: Arc<E>,
    params: ParamBuilder,
    _record: PhantomData<fn() -> R>,
}

impl<E, R> Clone for DocumentIndexer<E, R> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            params: self.params.clone(),
            _record: PhantomData,
        }
    }
}

impl<E: SearchEngine, R: Searchable> DocumentIndexer<E, R> {
    pub fn new(engine: Arc<E>, params: ParamBuilder) -> Self {
        Self {
            engine,
            params,
            _record: PhantomData,
        }
    }

    /// Index a single record against the write alias
    ///
    /// The document id always mirrors the record key so the document can be
    /// removed or fetched later. Fails with `NotPersisted`, before any
    /// network write, when the record has no key.
    pub async fn index_one(&self, record: &R) -> SearchResult<IndexAck> {
        let key = record.key().ok_or(SearchError::NotPersisted)?;
        let body = document_body(record);
        let params = self.params.write();

        let ack = self
            .engine
            .index_document(&params.index, &params.category, &key, &body)
            .await?;

        debug!(
            index = %params.index,
            category = %params.category,
            id = %key,
            version = ack.version,
            "Indexed document"
        );
        Ok(ack)
    }

    /// Index a batch of records, collecting per-record outcomes
    ///
    /// One record's failure does not abort the rest of the batch.
    pub async fn index_many(&self, records: &[R]) -> BulkReport {
        let mut report = BulkReport::default();

        for (position, record) in records.iter().enumerate() {
            match self.index_one(record).await {
                Ok(ack) => report.successes.push(ack),
                Err(error) => report.failures.push(BulkFailure {
                    position,
                    key: record.key(),
                    error,
                }),
            }
        }

        info!(
            category = %self.params.names().category(),
            submitted = records.len(),
            indexed = report.successes.len(),
            failed = report.failures.len(),
            "Bulk index complete"
        );
        report
    }

    /// Remove a record's document from the write alias
    pub async fn remove_one(&self, record: &R) -> SearchResult<DeleteAck> {
        let key = record.key().ok_or(SearchError::NotPersisted)?;
        let params = self.params.write();

        self.engine
            .delete_document(&params.index, &params.category, &key)
            .await
    }

    /// Fetch a record's stored document through the read alias
    ///
    /// Returns `None` when the document is absent, which includes the
    /// engine's visibility window after a recent write.
    pub async fn fetch_document(&self, record: &R) -> SearchResult<Option<StoredDocument>> {
        let key = record.key().ok_or(SearchError::NotPersisted)?;
        let params = self.params.read();

        self.engine
            .get_document(&params.index, &params.category, &key)
            .await
    }
}

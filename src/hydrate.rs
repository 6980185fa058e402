//! Hit hydration
//!
//! Reconstructs record instances from raw result hits. Hydrated records are
//! document-sourced: they carry only the attributes the hit contained and
//! must not be assumed fully materialized from the primary backing store.

use serde_json::Map;

use crate::engine::{RawHit, SearchEnvelope};
use crate::error::{SearchError, SearchResult};
use crate::record::Searchable;

/// A record reconstructed from a hit, with relevance metadata attached
#[derive(Debug, Clone)]
pub struct HydratedRecord<R> {
    record: R,
    score: f64,
    version: Option<i64>,
}

impl<R> HydratedRecord<R> {
    /// The reconstructed record
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Relevance score of the hit this record came from
    pub fn document_score(&self) -> f64 {
        self.score
    }

    /// Document version, when the hit carried one
    pub fn document_version(&self) -> Option<i64> {
        self.version
    }

    /// Always true: this instance was built from an index document
    pub fn is_document(&self) -> bool {
        true
    }

    pub fn into_record(self) -> R {
        self.record
    }
}

/// Reconstruct a record from a raw hit
///
/// `_source` is the attribute base; `fields` entries present in the hit are
/// overlaid on top and win for identically named keys. A hit without
/// `_source` or `_score` violates the response contract and fails loudly.
pub fn hydrate<R: Searchable>(hit: RawHit) -> SearchResult<HydratedRecord<R>> {
    let mut attributes: Map<_, _> = hit
        .source
        .ok_or_else(|| SearchError::MalformedHit(format!("hit {} has no _source", hit.id)))?;

    if let Some(fields) = hit.fields {
        for (key, value) in fields {
            attributes.insert(key, value);
        }
    }

    let score = hit
        .score
        .ok_or_else(|| SearchError::MalformedHit(format!("hit {} has no _score", hit.id)))?;

    Ok(HydratedRecord {
        record: R::from_document(attributes)?,
        score,
        version: hit.version,
    })
}

/// Hydrate every hit in a result envelope, failing on the first bad hit
pub fn hydrate_all<R: Searchable>(envelope: &SearchEnvelope) -> SearchResult<Vec<HydratedRecord<R>>> {
    envelope
        .hits
        .hits
        .iter()
        .cloned()
        .map(hydrate)
        .collect()
}

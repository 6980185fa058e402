//! Field-mapping management for a logical index's write target

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::engine::SearchEngine;
use crate::error::SearchResult;
use crate::params::ParamBuilder;
use crate::record::Searchable;

/// Reads and writes the field-mapping definition for one record type
pub struct MappingManager<E, R> {
    engine: Arc<E>,
    params: ParamBuilder,
    _record: PhantomData<fn() -> R>,
}

impl<E, R> Clone for MappingManager<E, R> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            params: self.params.clone(),
            _record: PhantomData,
        }
    }
}

impl<E: SearchEngine, R: Searchable> MappingManager<E, R> {
    pub fn new(engine: Arc<E>, params: ParamBuilder) -> Self {
        Self {
            engine,
            params,
            _record: PhantomData,
        }
    }

    /// Apply the record type's mapping definition to the write alias
    ///
    /// Fails with `MappingConflict` on an incompatible field-type change
    /// unless `ignore_conflicts` is set.
    pub async fn put_mapping(&self, ignore_conflicts: bool) -> SearchResult<()> {
        let params = self.params.write();
        let properties = R::mapping_properties();

        self.engine
            .put_mapping(&params.index, &params.category, &properties, ignore_conflicts)
            .await?;

        info!(
            index = %params.index,
            category = %params.category,
            field_count = properties.len(),
            "Applied mapping"
        );
        Ok(())
    }

    /// Mapping currently applied under the read alias, empty when unmapped
    pub async fn get_mapping(&self) -> SearchResult<Map<String, Value>> {
        let params = self.params.read();
        self.engine.get_mapping(&params.index, &params.category).await
    }

    /// Whether a non-empty mapping definition is applied
    pub async fn mapping_exists(&self) -> SearchResult<bool> {
        Ok(!self.get_mapping().await?.is_empty())
    }
}

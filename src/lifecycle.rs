//! Index lifecycle orchestration
//!
//! Drives physical index creation, initial alias binding, mapping
//! application, and the low-downtime rebuild sequence. During a rebuild the
//! read alias keeps serving the prior physical index while the write alias
//! moves to the new one; promoting reads and reclaiming the old index are
//! separate, explicit operator actions.

use std::sync::Arc;

use tracing::{info, warn};

use crate::alias::AliasManager;
use crate::engine::{IndexSettings, SearchEngine};
use crate::error::SearchResult;
use crate::mapping::MappingManager;
use crate::params::ParamBuilder;
use crate::record::Searchable;

/// Orchestrates create/rebuild/delete for one record type's logical index
pub struct IndexLifecycle<E, R> {
    engine: Arc<E>,
    params: ParamBuilder,
    aliases: AliasManager<E>,
    mapping: MappingManager<E, R>,
    default_settings: IndexSettings,
}

impl<E: SearchEngine, R: Searchable> IndexLifecycle<E, R> {
    pub fn new(engine: Arc<E>, params: ParamBuilder, default_settings: IndexSettings) -> Self {
        Self {
            aliases: AliasManager::new(Arc::clone(&engine)),
            mapping: MappingManager::new(Arc::clone(&engine), params.clone()),
            engine,
            params,
            default_settings,
        }
    }

    /// Create a new physical index and wire its aliases
    ///
    /// With `as_new` (first-time bootstrap) both the read and write aliases
    /// are bound to the new index. On the rebuild path only the write alias
    /// moves; reads continue against the prior physical index.
    ///
    /// If index creation fails the operation aborts before any alias
    /// mutation. A later step's failure does not roll back earlier steps:
    /// on the rebuild path the write alias may already have moved when the
    /// mapping step fails. Returns the new physical index name.
    pub async fn create_index(
        &self,
        as_new: bool,
        settings: IndexSettings,
    ) -> SearchResult<String> {
        let names = self.params.names();
        let physical = names.mint_physical();

        self.engine.create_index(&physical, settings).await?;

        if as_new {
            self.aliases.create_alias(&names.read_alias(), &physical).await?;
            self.aliases.create_alias(&names.write_alias(), &physical).await?;
        } else {
            self.aliases.update_alias(&names.write_alias(), &physical).await?;
        }

        self.mapping.put_mapping(false).await?;

        info!(
            logical = %names.logical(),
            physical = %physical,
            bootstrap = as_new,
            "Created index"
        );
        Ok(physical)
    }

    /// Rebuild the logical index with zero read downtime
    ///
    /// Creates a fresh physical index, moves the write alias to it, and
    /// applies the current mapping. The read alias is left untouched;
    /// promote it with [`AliasManager::update_alias`] once the new index is
    /// populated, then delete the orphaned one explicitly.
    pub async fn rebuild_index(&self) -> SearchResult<String> {
        let physical = self.create_index(false, self.default_settings).await?;
        self.mapping.put_mapping(false).await?;
        Ok(physical)
    }

    /// Delete a physical index outright
    ///
    /// The caller is responsible for ensuring no alias still references it;
    /// no check is performed here.
    pub async fn delete_index(&self, physical: &str) -> SearchResult<()> {
        self.engine.delete_index(physical).await?;
        warn!(physical = %physical, "Deleted physical index");
        Ok(())
    }

    /// Whether an index or alias with this name exists
    pub async fn index_exists(&self, index: &str) -> SearchResult<bool> {
        self.engine.index_exists(index).await
    }

    /// Whether the record's category exists under the read alias
    pub async fn category_exists(&self) -> SearchResult<bool> {
        let params = self.params.read();
        self.engine.category_exists(&params.index, &params.category).await
    }

    /// Alias manager bound to the same engine
    pub fn aliases(&self) -> &AliasManager<E> {
        &self.aliases
    }

    /// Mapping manager bound to the same engine
    pub fn mapping(&self) -> &MappingManager<E, R> {
        &self.mapping
    }

    /// Default settings applied by [`rebuild_index`](Self::rebuild_index)
    pub fn default_settings(&self) -> IndexSettings {
        self.default_settings
    }
}

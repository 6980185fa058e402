//! Alias management
//!
//! Aliases decouple the stable logical name from physical, timestamped index
//! instances. At most one physical index is bound to a given alias name at a
//! time; moving a binding is a single atomic multi-action request, so readers
//! never observe an unbound alias mid-move.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::engine::{AliasAction, SearchEngine};
use crate::error::{SearchError, SearchResult};

/// Creates, deletes, resolves, and atomically repoints named aliases
pub struct AliasManager<E> {
    engine: Arc<E>,
}

impl<E> Clone for AliasManager<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<E: SearchEngine> AliasManager<E> {
    pub fn new(engine: Arc<E>) -> Self {
        Self { engine }
    }

    /// Bind `alias` to `index`
    ///
    /// Fails with `AliasOperation` when the physical index does not exist.
    pub async fn create_alias(&self, alias: &str, index: &str) -> SearchResult<()> {
        self.engine
            .apply_alias_actions(&[AliasAction::Add {
                index: index.to_string(),
                alias: alias.to_string(),
            }])
            .await?;

        info!(alias = %alias, index = %index, "Created alias");
        Ok(())
    }

    /// Remove the binding of `alias` to `index`
    pub async fn delete_alias(&self, alias: &str, index: &str) -> SearchResult<()> {
        self.engine
            .apply_alias_actions(&[AliasAction::Remove {
                index: index.to_string(),
                alias: alias.to_string(),
            }])
            .await?;

        info!(alias = %alias, index = %index, "Deleted alias");
        Ok(())
    }

    /// Physical index currently bound to `alias`, `None` when unresolvable
    pub async fn resolve_physical_index(&self, alias: &str) -> SearchResult<Option<String>> {
        match self.engine.resolve_alias(alias).await {
            Ok(index) => Ok(Some(index)),
            Err(SearchError::IndexNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Repoint `alias` at `new_index`
    ///
    /// The removal of the old binding and the addition of the new one are
    /// submitted as one atomic request; the alias never resolves to nothing
    /// in between. A stale binding to a since-deleted index is tolerated:
    /// the alias still ends up bound to `new_index`.
    pub async fn update_alias(&self, alias: &str, new_index: &str) -> SearchResult<()> {
        let previous = self.resolve_physical_index(alias).await?;

        let mut actions = Vec::with_capacity(2);
        if let Some(old_index) = &previous {
            actions.push(AliasAction::Remove {
                index: old_index.clone(),
                alias: alias.to_string(),
            });
        }
        actions.push(AliasAction::Add {
            index: new_index.to_string(),
            alias: alias.to_string(),
        });

        if let Err(err) = self.engine.apply_alias_actions(&actions).await {
            // The old binding may reference an index deleted out from under
            // the alias; retry with the bare add so the move still lands.
            if previous.is_some() {
                warn!(alias = %alias, error = %err, "Combined alias move rejected, retrying add only");
                self.engine
                    .apply_alias_actions(&[AliasAction::Add {
                        index: new_index.to_string(),
                        alias: alias.to_string(),
                    }])
                    .await?;
            } else {
                return Err(err);
            }
        }

        info!(
            alias = %alias,
            from = previous.as_deref().unwrap_or("<unbound>"),
            to = %new_index,
            "Moved alias"
        );
        Ok(())
    }

    /// Full alias-to-index map, diagnostic use only
    pub async fn list_aliases(&self) -> SearchResult<HashMap<String, String>> {
        self.engine.list_aliases().await
    }
}

//! Index name derivation
//!
//! A logical index is never addressed directly: callers go through the
//! `_read` and `_write` aliases, which point at timestamp-suffixed physical
//! instances. This module is the single place those names are derived.

use crate::config::EngineConfig;
use crate::record::Searchable;

/// Fallback logical index name when the configuration carries no override
pub const DEFAULT_INDEX_NAME: &str = "default";

/// Derives logical, physical, and alias names for one record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexNames {
    logical: String,
    category: String,
}

impl IndexNames {
    /// Derive names for a record type from the engine configuration
    pub fn for_record<R: Searchable>(config: &EngineConfig) -> Self {
        Self {
            logical: config
                .index_name
                .clone()
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            category: R::category_name().to_string(),
        }
    }

    /// Construct from explicit names (diagnostic and test use)
    pub fn new(logical: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            logical: logical.into(),
            category: category.into(),
        }
    }

    /// Logical (base) index name, stable across rebuilds
    pub fn logical(&self) -> &str {
        &self.logical
    }

    /// Category (type) name, the record's storage-table identity
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Read alias name: `base_read`
    pub fn read_alias(&self) -> String {
        format!("{}_read", self.logical)
    }

    /// Write alias name: `base_write`
    pub fn write_alias(&self) -> String {
        format!("{}_write", self.logical)
    }

    /// Physical index name for a given creation timestamp: `base_<unixtime>`
    pub fn physical(&self, timestamp: i64) -> String {
        format!("{}_{}", self.logical, timestamp)
    }

    /// Mint a physical name for a new index, suffixed with the current time
    pub fn mint_physical(&self) -> String {
        self.physical(chrono::Utc::now().timestamp())
    }
}

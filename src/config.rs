//! Engine connection and index configuration

use serde::{Deserialize, Serialize};

/// Connection and naming configuration for the search engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the search engine (e.g. `http://localhost:9200`)
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Override for the logical index name; falls back to `"default"`
    pub index_name: Option<String>,

    /// Shard count applied when a physical index is created
    pub default_shards: u32,

    /// Replica count applied when a physical index is created
    pub default_replicas: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9200".to_string(),
            timeout_secs: 30,
            index_name: None,
            default_shards: 1,
            default_replicas: 0,
        }
    }
}

/// Builder for EngineConfig
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn index_name(mut self, name: impl Into<String>) -> Self {
        self.config.index_name = Some(name.into());
        self
    }

    pub fn default_shards(mut self, shards: u32) -> Self {
        self.config.default_shards = shards;
        self
    }

    pub fn default_replicas(mut self, replicas: u32) -> Self {
        self.config.default_replicas = replicas;
        self
    }

    pub fn build(self) -> EngineConfig {
        self.config
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

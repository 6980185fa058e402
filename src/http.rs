//! HTTP transport implementation of [`SearchEngine`]
//!
//! Speaks the engine's REST API with reqwest. Status handling follows one
//! rule: 404 becomes `IndexNotFound`, mapping-merge rejections become
//! `MappingConflict`, and everything else non-2xx is a `Transport` failure
//! carrying the status and body.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::{
    AliasAction, DeleteAck, IndexAck, IndexSettings, SearchEngine, SearchEnvelope, StoredDocument,
};
use crate::error::{SearchError, SearchResult};
use crate::params::RequestParams;

/// reqwest-backed search engine client
#[derive(Clone)]
pub struct HttpEngine {
    client: Client,
    endpoint: String,
}

impl HttpEngine {
    /// Build a client from the engine configuration
    pub fn new(config: &EngineConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    /// Map a non-success response to the error taxonomy
    async fn fail(response: Response, context: &str) -> SearchError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::NOT_FOUND {
            SearchError::IndexNotFound(context.to_string())
        } else if status == StatusCode::BAD_REQUEST && body.to_lowercase().contains("conflict") {
            SearchError::MappingConflict(body)
        } else {
            SearchError::Transport(format!("{} returned status {}: {}", context, status, body))
        }
    }
}

#[async_trait]
impl SearchEngine for HttpEngine {
    async fn create_index(&self, index: &str, settings: IndexSettings) -> SearchResult<()> {
        let body = json!({
            "settings": {
                "number_of_shards": settings.shards,
                "number_of_replicas": settings.replicas,
            }
        });

        let response = self.client.put(self.url(index)).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(Self::fail(response, index).await);
        }

        debug!(index = %index, shards = settings.shards, replicas = settings.replicas, "Created index");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> SearchResult<()> {
        let response = self.client.delete(self.url(index)).send().await?;

        if !response.status().is_success() {
            return Err(Self::fail(response, index).await);
        }

        debug!(index = %index, "Deleted index");
        Ok(())
    }

    async fn index_exists(&self, index: &str) -> SearchResult<bool> {
        let response = self.client.head(self.url(index)).send().await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(SearchError::Transport(format!(
                "Existence check for {} returned status {}",
                index, status
            ))),
        }
    }

    async fn apply_alias_actions(&self, actions: &[AliasAction]) -> SearchResult<()> {
        let body = json!({ "actions": actions });

        let response = self
            .client
            .post(self.url("_aliases"))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(SearchError::AliasOperation(format!(
                "Alias update returned status {}: {}",
                status, detail
            )));
        }

        Ok(())
    }

    async fn resolve_alias(&self, alias: &str) -> SearchResult<String> {
        let response = self.client.get(self.url(alias)).send().await?;

        if !response.status().is_success() {
            return Err(Self::fail(response, alias).await);
        }

        // The response is keyed by the physical index names behind the alias.
        let body: Map<String, Value> = response.json().await?;
        body.keys()
            .next()
            .cloned()
            .ok_or_else(|| SearchError::IndexNotFound(alias.to_string()))
    }

    async fn list_aliases(&self) -> SearchResult<HashMap<String, String>> {
        let response = self.client.get(self.url("_aliases")).send().await?;

        if !response.status().is_success() {
            return Err(Self::fail(response, "_aliases").await);
        }

        let body: Map<String, Value> = response.json().await?;
        let mut aliases = HashMap::new();

        for (index, entry) in &body {
            if let Some(names) = entry.get("aliases").and_then(Value::as_object) {
                for alias in names.keys() {
                    aliases.insert(alias.clone(), index.clone());
                }
            }
        }

        Ok(aliases)
    }

    async fn get_mapping(
        &self,
        index: &str,
        category: &str,
    ) -> SearchResult<Map<String, Value>> {
        let response = self
            .client
            .get(self.url(&format!("{}/_mapping/{}", index, category)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Map::new());
        }
        if !response.status().is_success() {
            return Err(Self::fail(response, index).await);
        }

        // Response nests under the physical index name resolved from the alias.
        let body: Map<String, Value> = response.json().await?;
        let properties = body
            .values()
            .next()
            .and_then(|entry| entry.get(category))
            .and_then(|mapping| mapping.get("properties"))
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(properties)
    }

    async fn put_mapping(
        &self,
        index: &str,
        category: &str,
        properties: &Map<String, Value>,
        ignore_conflicts: bool,
    ) -> SearchResult<()> {
        let mut url = self.url(&format!("{}/_mapping/{}", index, category));
        if ignore_conflicts {
            url.push_str("?ignore_conflicts=true");
        }

        let body = json!({ "properties": properties });
        let response = self.client.put(url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(Self::fail(response, index).await);
        }

        debug!(index = %index, category = %category, "Applied mapping");
        Ok(())
    }

    async fn category_exists(&self, index: &str, category: &str) -> SearchResult<bool> {
        let response = self
            .client
            .head(self.url(&format!("{}/{}", index, category)))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(SearchError::Transport(format!(
                "Category check for {}/{} returned status {}",
                index, category, status
            ))),
        }
    }

    async fn index_document(
        &self,
        index: &str,
        category: &str,
        id: &str,
        body: &Map<String, Value>,
    ) -> SearchResult<IndexAck> {
        let response = self
            .client
            .put(self.url(&format!("{}/{}/{}", index, category, id)))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::fail(response, index).await);
        }

        Ok(response.json().await?)
    }

    async fn delete_document(
        &self,
        index: &str,
        category: &str,
        id: &str,
    ) -> SearchResult<DeleteAck> {
        let response = self
            .client
            .delete(self.url(&format!("{}/{}/{}", index, category, id)))
            .send()
            .await?;

        // A missing document still acknowledges with found = false.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(response.json().await.unwrap_or(DeleteAck {
                id: id.to_string(),
                found: false,
            }));
        }
        if !response.status().is_success() {
            return Err(Self::fail(response, index).await);
        }

        Ok(response.json().await?)
    }

    async fn get_document(
        &self,
        index: &str,
        category: &str,
        id: &str,
    ) -> SearchResult<Option<StoredDocument>> {
        let response = self
            .client
            .get(self.url(&format!("{}/{}/{}", index, category, id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::fail(response, index).await);
        }

        Ok(Some(response.json().await?))
    }

    async fn search(&self, params: &RequestParams, body: &Value) -> SearchResult<SearchEnvelope> {
        let mut request = self
            .client
            .post(self.url(&format!("{}/{}/_search", params.index, params.category)));

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(fields) = &params.fields {
            query.push(("fields", fields.clone()));
        }
        if let Some(size) = params.size {
            query.push(("size", size.to_string()));
        }
        if let Some(from) = params.from {
            query.push(("from", from.to_string()));
        }
        if !query.is_empty() {
            request = request.query(&query);
        }

        let response = request.json(body).send().await?;

        if !response.status().is_success() {
            return Err(Self::fail(response, &params.index).await);
        }

        Ok(response.json().await?)
    }
}

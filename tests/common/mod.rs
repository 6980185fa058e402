//! Shared test fixtures: an in-memory engine and a sample record type

// Each integration test binary uses a different slice of these fixtures.
#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use searchlift::{
    AliasAction, DeleteAck, HitsBlock, IndexAck, IndexSettings, RawHit, RequestParams,
    SearchEngine, SearchEnvelope, SearchError, SearchResult, Searchable, StoredDocument,
};

#[derive(Default)]
struct IndexState {
    mappings: HashMap<String, Map<String, Value>>,
    // (category, id) -> (version, body)
    docs: HashMap<(String, String), (i64, Map<String, Value>)>,
}

#[derive(Default)]
struct State {
    indices: HashMap<String, IndexState>,
    aliases: HashMap<String, String>,
}

impl State {
    /// Resolve an index-or-alias name to a physical index name
    fn resolve(&self, name: &str) -> Option<String> {
        if self.indices.contains_key(name) {
            Some(name.to_string())
        } else {
            self.aliases.get(name).cloned()
        }
    }
}

/// In-memory stand-in for a remote search engine
///
/// Deleting an index deliberately leaves alias entries behind, so tests can
/// exercise stale-binding tolerance in alias moves.
#[derive(Default)]
pub struct InMemoryEngine {
    state: RwLock<State>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents stored across all physical indices
    pub async fn total_documents(&self) -> usize {
        let state = self.state.read().await;
        state.indices.values().map(|index| index.docs.len()).sum()
    }

    /// Number of documents in one physical index
    pub async fn documents_in(&self, physical: &str) -> usize {
        let state = self.state.read().await;
        state
            .indices
            .get(physical)
            .map(|index| index.docs.len())
            .unwrap_or(0)
    }
}

fn matches_query(body: &Value, category_docs: &Map<String, Value>) -> bool {
    let query = match body.get("query") {
        Some(query) => query,
        None => return true,
    };

    if query.get("match_all").is_some() {
        return true;
    }

    if let Some(term) = query
        .get("match")
        .and_then(|m| m.get("_all"))
        .and_then(Value::as_str)
    {
        let needle = term.to_lowercase();
        return category_docs.values().any(|value| {
            value
                .as_str()
                .map(|s| s.to_lowercase().contains(&needle))
                .unwrap_or(false)
        });
    }

    if let Some(criteria) = query.get("term").and_then(Value::as_object) {
        return criteria
            .iter()
            .all(|(field, expected)| category_docs.get(field) == Some(expected));
    }

    false
}

#[async_trait]
impl SearchEngine for InMemoryEngine {
    async fn create_index(&self, index: &str, _settings: IndexSettings) -> SearchResult<()> {
        let mut state = self.state.write().await;
        if state.indices.contains_key(index) {
            return Err(SearchError::Transport(format!(
                "index {} already exists",
                index
            )));
        }
        state.indices.insert(index.to_string(), IndexState::default());
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> SearchResult<()> {
        let mut state = self.state.write().await;
        state
            .indices
            .remove(index)
            .map(|_| ())
            .ok_or_else(|| SearchError::IndexNotFound(index.to_string()))
    }

    async fn index_exists(&self, index: &str) -> SearchResult<bool> {
        let state = self.state.read().await;
        Ok(state.resolve(index).is_some())
    }

    async fn apply_alias_actions(&self, actions: &[AliasAction]) -> SearchResult<()> {
        let mut state = self.state.write().await;

        // Validate before mutating so the whole request applies atomically.
        for action in actions {
            match action {
                AliasAction::Add { index, .. } | AliasAction::Remove { index, .. } => {
                    if !state.indices.contains_key(index) {
                        return Err(SearchError::AliasOperation(format!(
                            "index {} does not exist",
                            index
                        )));
                    }
                }
            }
        }

        for action in actions {
            match action {
                AliasAction::Add { index, alias } => {
                    state.aliases.insert(alias.clone(), index.clone());
                }
                AliasAction::Remove { index, alias } => {
                    if state.aliases.get(alias) == Some(index) {
                        state.aliases.remove(alias);
                    }
                }
            }
        }
        Ok(())
    }

    async fn resolve_alias(&self, alias: &str) -> SearchResult<String> {
        let state = self.state.read().await;
        state
            .aliases
            .get(alias)
            .cloned()
            .ok_or_else(|| SearchError::IndexNotFound(alias.to_string()))
    }

    async fn list_aliases(&self) -> SearchResult<HashMap<String, String>> {
        let state = self.state.read().await;
        Ok(state.aliases.clone())
    }

    async fn get_mapping(
        &self,
        index: &str,
        category: &str,
    ) -> SearchResult<Map<String, Value>> {
        let state = self.state.read().await;
        let physical = match state.resolve(index) {
            Some(physical) => physical,
            None => return Ok(Map::new()),
        };

        Ok(state
            .indices
            .get(&physical)
            .and_then(|entry| entry.mappings.get(category))
            .cloned()
            .unwrap_or_default())
    }

    async fn put_mapping(
        &self,
        index: &str,
        category: &str,
        properties: &Map<String, Value>,
        ignore_conflicts: bool,
    ) -> SearchResult<()> {
        let mut state = self.state.write().await;
        let physical = state
            .resolve(index)
            .ok_or_else(|| SearchError::IndexNotFound(index.to_string()))?;

        let entry = state
            .indices
            .get_mut(&physical)
            .ok_or_else(|| SearchError::IndexNotFound(physical.clone()))?;
        let mapping = entry.mappings.entry(category.to_string()).or_default();

        for (field, definition) in properties {
            if let Some(existing) = mapping.get(field) {
                let existing_type = existing.get("type");
                let new_type = definition.get("type");
                if existing_type != new_type && !ignore_conflicts {
                    return Err(SearchError::MappingConflict(format!(
                        "field {} changed type",
                        field
                    )));
                }
            }
            mapping.insert(field.clone(), definition.clone());
        }
        Ok(())
    }

    async fn category_exists(&self, index: &str, category: &str) -> SearchResult<bool> {
        let state = self.state.read().await;
        let physical = match state.resolve(index) {
            Some(physical) => physical,
            None => return Ok(false),
        };

        Ok(state
            .indices
            .get(&physical)
            .map(|entry| {
                entry.mappings.contains_key(category)
                    || entry.docs.keys().any(|(cat, _)| cat == category)
            })
            .unwrap_or(false))
    }

    async fn index_document(
        &self,
        index: &str,
        category: &str,
        id: &str,
        body: &Map<String, Value>,
    ) -> SearchResult<IndexAck> {
        let mut state = self.state.write().await;
        let physical = state
            .resolve(index)
            .ok_or_else(|| SearchError::IndexNotFound(index.to_string()))?;

        let entry = state
            .indices
            .get_mut(&physical)
            .ok_or_else(|| SearchError::IndexNotFound(physical.clone()))?;
        let slot = entry
            .docs
            .entry((category.to_string(), id.to_string()))
            .or_insert((0, Map::new()));

        let created = slot.0 == 0;
        slot.0 += 1;
        slot.1 = body.clone();

        Ok(IndexAck {
            id: id.to_string(),
            version: slot.0,
            created,
        })
    }

    async fn delete_document(
        &self,
        index: &str,
        category: &str,
        id: &str,
    ) -> SearchResult<DeleteAck> {
        let mut state = self.state.write().await;
        let physical = state
            .resolve(index)
            .ok_or_else(|| SearchError::IndexNotFound(index.to_string()))?;

        let entry = state
            .indices
            .get_mut(&physical)
            .ok_or_else(|| SearchError::IndexNotFound(physical.clone()))?;
        let found = entry
            .docs
            .remove(&(category.to_string(), id.to_string()))
            .is_some();

        Ok(DeleteAck {
            id: id.to_string(),
            found,
        })
    }

    async fn get_document(
        &self,
        index: &str,
        category: &str,
        id: &str,
    ) -> SearchResult<Option<StoredDocument>> {
        let state = self.state.read().await;
        let physical = state
            .resolve(index)
            .ok_or_else(|| SearchError::IndexNotFound(index.to_string()))?;

        Ok(state
            .indices
            .get(&physical)
            .and_then(|entry| entry.docs.get(&(category.to_string(), id.to_string())))
            .map(|(version, body)| StoredDocument {
                id: id.to_string(),
                version: Some(*version),
                source: body.clone(),
            }))
    }

    async fn search(&self, params: &RequestParams, body: &Value) -> SearchResult<SearchEnvelope> {
        let state = self.state.read().await;
        let physical = state
            .resolve(&params.index)
            .ok_or_else(|| SearchError::IndexNotFound(params.index.clone()))?;

        let entry = state
            .indices
            .get(&physical)
            .ok_or_else(|| SearchError::IndexNotFound(physical.clone()))?;

        let mut matched: Vec<RawHit> = entry
            .docs
            .iter()
            .filter(|((category, _), _)| *category == params.category)
            .filter(|(_, (_, doc))| matches_query(body, doc))
            .map(|((_, id), (version, doc))| RawHit {
                id: id.clone(),
                score: Some(1.0),
                version: Some(*version),
                source: Some(doc.clone()),
                fields: None,
            })
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));

        let total = matched.len() as u64;
        let from = params.from.unwrap_or(0);
        let size = params.size.unwrap_or(matched.len());
        let hits: Vec<RawHit> = matched.into_iter().skip(from).take(size).collect();

        Ok(SearchEnvelope {
            took: Some(1),
            hits: HitsBlock {
                total,
                max_score: if total > 0 { Some(1.0) } else { None },
                hits,
            },
            query: None,
        })
    }
}

/// Sample record type used across the integration tests
#[derive(Debug, Clone)]
pub struct Article {
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    pub draft_notes: String,
}

impl Article {
    pub fn new(id: &str, title: &str, body: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            title: title.to_string(),
            body: body.to_string(),
            draft_notes: "internal".to_string(),
        }
    }

    pub fn unpersisted(title: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            body: String::new(),
            draft_notes: String::new(),
        }
    }
}

impl Searchable for Article {
    fn category_name() -> &'static str {
        "articles"
    }

    fn key(&self) -> Option<String> {
        self.id.clone()
    }

    fn document_data(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("title".to_string(), json!(self.title));
        map.insert("body".to_string(), json!(self.body));
        map.insert("draft_notes".to_string(), json!(self.draft_notes));
        map
    }

    fn excluded_fields() -> &'static [&'static str] {
        &["draft_notes"]
    }

    fn mapping_properties() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("title".to_string(), json!({"type": "string"}));
        map.insert("body".to_string(), json!({"type": "string"}));
        map
    }

    fn from_document(attributes: Map<String, Value>) -> SearchResult<Self> {
        let text = |field: &str| {
            attributes
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(Article {
            id: None,
            title: text("title"),
            body: text("body"),
            draft_notes: String::new(),
        })
    }
}

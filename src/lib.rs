//! Zero-downtime search index lifecycle and document projection
//!
//! `searchlift` projects application records into a remote search engine's
//! inverted index and queries them back out, while letting the physical
//! index be rebuilt and re-mapped without interrupting reads or writes:
//!
//! - **Alias-swap lifecycle**: a logical index name is decoupled from
//!   physical, timestamped instances through `_read` and `_write` aliases;
//!   a rebuild creates a fresh physical index and atomically moves the
//!   write alias while reads keep serving the old one
//! - **Document pipeline**: records are serialized to index documents
//!   (full projection minus an exclusion list, keyed by the record key) and
//!   submitted against whichever index the write alias resolves to
//! - **Search & hydration**: free-text and structured queries route through
//!   the read alias; hits are reconstructed into record instances carrying
//!   relevance score and document version
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │              SearchService<E, R>                  │
//! ├───────────────────────────────────────────────────┤
//! │  create/rebuild/delete index    search()          │
//! │  alias management               search_by_query() │
//! │  add/remove/fetch documents     hydration         │
//! └───────────────────────────────────────────────────┘
//!            │                │               │
//!            ▼                ▼               ▼
//!   IndexLifecycle     DocumentIndexer   SearchExecutor
//!   AliasManager                              │
//!   MappingManager                        HitHydrator
//!            │                │               │
//!            └────────────────┼───────────────┘
//!                             ▼
//!               SearchEngine trait (HttpEngine)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use searchlift::{EngineConfigBuilder, HttpEngine, IndexSettings, SearchService, Searchable};
//! use serde_json::{json, Map, Value};
//!
//! struct Post {
//!     id: Option<String>,
//!     title: String,
//! }
//!
//! impl Searchable for Post {
//!     fn category_name() -> &'static str { "posts" }
//!     fn key(&self) -> Option<String> { self.id.clone() }
//!     fn document_data(&self) -> Map<String, Value> {
//!         let mut map = Map::new();
//!         map.insert("title".into(), json!(self.title));
//!         map
//!     }
//!     fn from_document(attrs: Map<String, Value>) -> searchlift::SearchResult<Self> {
//!         Ok(Post {
//!             id: None,
//!             title: attrs.get("title").and_then(Value::as_str).unwrap_or_default().into(),
//!         })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfigBuilder::new()
//!         .endpoint("http://localhost:9200")
//!         .index_name("blog")
//!         .build();
//!     let engine = Arc::new(HttpEngine::new(&config)?);
//!     let posts: SearchService<_, Post> = SearchService::new(engine, &config);
//!
//!     posts.create_index(IndexSettings::default()).await?;
//!     posts.add_to_index(&Post { id: Some("1".into()), title: "Hello".into() }).await?;
//!
//!     let results = posts.search("hello").await?;
//!     println!("{} hits", results.total_hits);
//!     Ok(())
//! }
//! ```

mod alias;
mod config;
mod document;
mod engine;
mod error;
mod executor;
mod http;
mod hydrate;
mod lifecycle;
mod mapping;
mod names;
mod params;
mod record;
mod service;

pub use alias::AliasManager;
pub use config::{EngineConfig, EngineConfigBuilder};
pub use document::{BulkFailure, BulkReport, DocumentIndexer};
pub use engine::{
    AliasAction, DeleteAck, HitsBlock, IndexAck, IndexSettings, RawHit, SearchEngine,
    SearchEnvelope, StoredDocument,
};
pub use error::{SearchError, SearchResult};
pub use executor::SearchExecutor;
pub use http::HttpEngine;
pub use hydrate::{hydrate, hydrate_all, HydratedRecord};
pub use lifecycle::IndexLifecycle;
pub use mapping::MappingManager;
pub use names::{IndexNames, DEFAULT_INDEX_NAME};
pub use params::{OperationKind, ParamBuilder, RequestParams};
pub use record::{document_body, Searchable};
pub use service::{SearchResponse, SearchService};

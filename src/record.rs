//! Record capability interface
//!
//! Indexing logic does not live on the record type itself. Records expose a
//! narrow capability surface — identity, attribute projection, mapping
//! definition — and the indexer, hydrator, and lifecycle components consume
//! it from the outside.

use serde_json::{Map, Value};

use crate::error::SearchResult;

/// Capabilities a record type must expose to be projected into the index
pub trait Searchable: Sized {
    /// The record's storage-table identity, used as the index category
    fn category_name() -> &'static str;

    /// Primary key of this record, or `None` when it has not been persisted
    fn key(&self) -> Option<String>;

    /// Full attribute projection indexed for this record
    fn document_data(&self) -> Map<String, Value>;

    /// Field names removed from the projection before submission
    fn excluded_fields() -> &'static [&'static str] {
        &[]
    }

    /// Field-type mapping applied to the write alias, empty when unmapped
    fn mapping_properties() -> Map<String, Value> {
        Map::new()
    }

    /// Reconstruct a record instance from stored document attributes
    ///
    /// Instances built this way are not materialized from the primary
    /// backing store and carry only the attributes the document contained.
    fn from_document(attributes: Map<String, Value>) -> SearchResult<Self>;
}

/// Build the document body for a record: full projection minus exclusions
pub fn document_body<R: Searchable>(record: &R) -> Map<String, Value> {
    let mut body = record.document_data();
    for field in R::excluded_fields() {
        body.remove(*field);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct User {
        id: Option<String>,
        name: String,
        password_hash: String,
    }

    impl Searchable for User {
        fn category_name() -> &'static str {
            "users"
        }

        fn key(&self) -> Option<String> {
            self.id.clone()
        }

        fn document_data(&self) -> Map<String, Value> {
            let mut map = Map::new();
            map.insert("name".to_string(), json!(self.name));
            map.insert("password_hash".to_string(), json!(self.password_hash));
            map
        }

        fn excluded_fields() -> &'static [&'static str] {
            &["password_hash"]
        }

        fn from_document(attributes: Map<String, Value>) -> SearchResult<Self> {
            Ok(User {
                id: None,
                name: attributes
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                password_hash: String::new(),
            })
        }
    }

    #[test]
    fn test_document_body_applies_exclusions() {
        let user = User {
            id: Some("7".to_string()),
            name: "ada".to_string(),
            password_hash: "secret".to_string(),
        };

        let body = document_body(&user);
        assert_eq!(body.get("name"), Some(&json!("ada")));
        assert!(!body.contains_key("password_hash"));
    }

    #[test]
    fn test_exclusion_of_absent_field_is_noop() {
        struct Bare;

        impl Searchable for Bare {
            fn category_name() -> &'static str {
                "bare"
            }

            fn key(&self) -> Option<String> {
                None
            }

            fn document_data(&self) -> Map<String, Value> {
                Map::new()
            }

            fn excluded_fields() -> &'static [&'static str] {
                &["missing"]
            }

            fn from_document(_attributes: Map<String, Value>) -> SearchResult<Self> {
                Ok(Bare)
            }
        }

        assert!(document_body(&Bare).is_empty());
    }
}

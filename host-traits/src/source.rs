//! Document Source Abstraction
//!
//! The surface the content-aggregation host consumes: a connector that
//! enumerates a remote hierarchical tree and returns a flat, unordered list
//! of document records.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A single document discovered by a connector.
///
/// `fields` is an open key-value mapping carrying everything the remote
/// service returned for the document (id, name, mimeType, timestamps, any
/// extra requested fields) plus whatever the connector's projection stage
/// overlaid onto it. Hosts should treat unknown keys as data, not errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRecord {
    /// Slug-style path derived from the document's folder ancestry.
    pub path: String,

    /// Ordered ancestor folder names, root first.
    pub breadcrumb: Vec<String>,

    /// Open record body keyed by the remote service's field names.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl SourceRecord {
    /// Convenience accessor for the record's `name` field, when present.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Convenience accessor for the record's `id` field, when present.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }
}

/// A connector the host can ask for documents.
///
/// Output order is unspecified; hosts must not depend on it. A connector
/// either returns the complete result set or the first error it hit -
/// there are no partial results.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Enumerate every document reachable from the connector's configured
    /// roots.
    async fn fetch_documents(&self) -> Result<Vec<SourceRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accessors() {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::String("doc1".to_string()));
        fields.insert("name".to_string(), Value::String("Intro".to_string()));

        let record = SourceRecord {
            path: "/docs/intro".to_string(),
            breadcrumb: vec!["Docs".to_string()],
            fields,
        };

        assert_eq!(record.id(), Some("doc1"));
        assert_eq!(record.name(), Some("Intro"));
    }

    #[test]
    fn test_record_round_trips_unknown_fields() {
        let json = r#"{
            "path": "/docs/intro",
            "breadcrumb": ["Docs"],
            "fields": {"name": "Intro", "starred": true, "customKey": [1, 2]}
        }"#;

        let record: SourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fields.get("starred"), Some(&Value::Bool(true)));
        assert!(record.fields.contains_key("customKey"));
    }
}

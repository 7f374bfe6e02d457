//! Record projection
//!
//! Pure post-processing applied to every discovered document, in fixed
//! order: index collapsing, default overlay, field renames, then the
//! structured-metadata merge from the description. Each step operates on
//! the record's open key-value map so configured transforms can target any
//! field the remote service returned.

use serde_json::{Map, Value};

use host_traits::source::SourceRecord;

use crate::config::CrawlConfig;
use crate::types::DocumentRecord;

/// Document name marking it as a stand-in for its containing folder
const INDEX_NAME: &str = "index";

/// Project a raw document into its host-facing record.
pub fn project(record: DocumentRecord, config: &CrawlConfig) -> SourceRecord {
    let DocumentRecord {
        mut path,
        mut breadcrumb,
        mut fields,
    } = record;

    collapse_index(&mut path, &mut breadcrumb, &mut fields);

    for (key, value) in &config.fields_default {
        fields.insert(key.clone(), value.clone());
    }

    for (old_key, new_key) in &config.fields_mapper {
        if let Some(value) = fields.remove(old_key) {
            fields.insert(new_key.clone(), value);
        }
    }

    if let Some(description) = fields
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string)
    {
        merge_description_metadata(&mut fields, &description);
    }

    SourceRecord {
        path,
        breadcrumb,
        fields,
    }
}

/// A document named `index` stands in for its containing folder: drop the
/// folder's own breadcrumb segment and take the one above it as the new
/// name, verbatim (not re-slugified).
///
/// Collapsing needs at least two breadcrumb segments; a single-segment or
/// root-level index document is left untouched.
fn collapse_index(path: &mut String, breadcrumb: &mut Vec<String>, fields: &mut Map<String, Value>) {
    let is_index = fields.get("name").and_then(Value::as_str) == Some(INDEX_NAME);
    if !is_index || breadcrumb.len() < 2 {
        return;
    }

    breadcrumb.pop();
    if let Some(folder_name) = breadcrumb.pop() {
        *path = if breadcrumb.is_empty() {
            format!("/{}", folder_name)
        } else {
            format!("/{}/{}", breadcrumb.join("/"), folder_name)
        };
        fields.insert("name".to_string(), Value::String(folder_name));
    }
}

/// Merge structured metadata out of a document description.
///
/// Only a successful YAML parse that yields a mapping is merged over the
/// record; a bare scalar or a parse failure leaves the record untouched.
/// The failure branch is discarded on purpose - a description is free text
/// first, metadata second.
fn merge_description_metadata(fields: &mut Map<String, Value>, description: &str) {
    let Ok(parsed) = serde_yaml::from_str::<serde_yaml::Value>(description) else {
        return;
    };
    if !parsed.is_mapping() {
        return;
    }
    if let Ok(Value::Object(metadata)) = serde_json::to_value(parsed) {
        for (key, value) in metadata {
            fields.insert(key, value);
        }
    }
}

//! Drive API response types and crawl domain types
//!
//! Wire structures for deserializing Drive API v3 listing responses, plus
//! the folder-reference and document-record types the crawler threads
//! through each recursion depth.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// MIME type identifying folder nodes
pub const MIME_FOLDER: &str = "application/vnd.google-apps.folder";

/// MIME type identifying document nodes
pub const MIME_DOCUMENT: &str = "application/vnd.google-apps.document";

/// Fields always requested for node resources
pub const BASE_FIELDS: &[&str] = &[
    "id",
    "name",
    "mimeType",
    "description",
    "createdTime",
    "modifiedTime",
    "starred",
    "parents",
];

/// Drive API node resource (folder or document)
///
/// Extra requested fields land in `extra` untouched, so the record pipeline
/// can overlay and rename them without this type knowing their names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveNode {
    /// Node ID
    pub id: String,

    /// Node name
    pub name: String,

    /// MIME type
    pub mime_type: String,

    /// Free-text description (may carry structured metadata)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation time (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    /// Modification time (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,

    /// Whether the user starred the node
    #[serde(default)]
    pub starred: bool,

    /// Parent folder IDs
    #[serde(default)]
    pub parents: Vec<String>,

    /// Any extra requested fields, kept under their wire keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DriveNode {
    /// Whether this node is a folder
    pub fn is_folder(&self) -> bool {
        self.mime_type == MIME_FOLDER
    }
}

/// Drive API files.list response page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePage {
    /// Nodes on this page
    #[serde(default)]
    pub files: Vec<DriveNode>,

    /// Continuation token; absent on the last page
    pub next_page_token: Option<String>,
}

/// Reference to a folder awaiting traversal.
///
/// `id == None` denotes a virtual root: listing it applies no
/// parent-containment predicate at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRef {
    pub id: Option<String>,
    pub breadcrumb: Vec<String>,
    pub path: String,
}

impl FolderRef {
    /// A crawl root: empty breadcrumb, empty path.
    pub fn root(id: Option<String>) -> Self {
        Self {
            id,
            breadcrumb: Vec::new(),
            path: String::new(),
        }
    }

    /// A folder discovered inside `parent`, one level deeper.
    pub fn child(parent_path: &str, parent_breadcrumb: &[String], node: &DriveNode) -> Self {
        let mut breadcrumb = parent_breadcrumb.to_vec();
        breadcrumb.push(node.name.clone());
        Self {
            id: Some(node.id.clone()),
            breadcrumb,
            path: format!("{}/{}", parent_path, slugify(&node.name)),
        }
    }
}

/// A discovered document before projection: the raw node flattened into an
/// open key-value map, plus the derived path and folder ancestry.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub path: String,
    pub breadcrumb: Vec<String>,
    pub fields: Map<String, Value>,
}

impl DocumentRecord {
    pub fn new(node: DriveNode, parent_path: &str, parent_breadcrumb: &[String]) -> Self {
        let path = format!("{}/{}", parent_path, slugify(&node.name));
        let fields = match serde_json::to_value(node) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        Self {
            path,
            breadcrumb: parent_breadcrumb.to_vec(),
            fields,
        }
    }

    /// The record's `name` field, when still a string.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

/// URL/path-safe, lowercase, hyphenated transformation of a name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress leading hyphens
    for c in name.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

//! Crawl configuration
//!
//! Options recognized by the connector: which roots to crawl, extra fields
//! to request, folders to prune, and the record transforms applied to every
//! projected document.

use host_traits::source::SourceRecord;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Folder name always pruned from traversal, regardless of configuration
const DRAFTS_FOLDER: &str = "drafts";

/// Caller-supplied final pass over each projected record.
pub type RecordMutator = Arc<dyn Fn(SourceRecord) -> SourceRecord + Send + Sync>;

/// Connector configuration.
///
/// ```ignore
/// use provider_drive_docs::config::CrawlConfig;
///
/// let config = CrawlConfig::default()
///     .with_folders(vec![Some("folder-id".to_string())])
///     .with_fields(vec!["webViewLink".to_string()])
///     .with_debug(true);
/// ```
#[derive(Clone, Default)]
pub struct CrawlConfig {
    /// Root folders to crawl. `None` entries are virtual roots (no parent
    /// predicate). Empty means a single virtual root.
    pub folders: Vec<Option<String>>,

    /// Extra field names requested on top of the base set.
    pub fields: Vec<String>,

    /// Folder names (case-insensitive) or ids pruned before recursion.
    pub ignored_folders: HashSet<String>,

    /// Keys force-set on every record, overwriting existing values.
    pub fields_default: Map<String, Value>,

    /// Ordered `(old_key, new_key)` renames applied to every record.
    pub fields_mapper: Vec<(String, String)>,

    /// Optional mutator applied to each record after projection.
    pub update_metadata: Option<RecordMutator>,

    /// Emit per-listing progress events (parent count, depth, wait time).
    pub debug: bool,
}

impl CrawlConfig {
    pub fn with_folders(mut self, folders: Vec<Option<String>>) -> Self {
        self.folders = folders;
        self
    }

    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_ignored_folders(mut self, ignored: impl IntoIterator<Item = String>) -> Self {
        self.ignored_folders = ignored.into_iter().collect();
        self
    }

    pub fn with_fields_default(mut self, defaults: Map<String, Value>) -> Self {
        self.fields_default = defaults;
        self
    }

    pub fn with_fields_mapper(mut self, mapper: Vec<(String, String)>) -> Self {
        self.fields_mapper = mapper;
        self
    }

    pub fn with_update_metadata(mut self, mutator: RecordMutator) -> Self {
        self.update_metadata = Some(mutator);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Roots the crawl starts from; defaults to a single virtual root.
    pub fn root_folders(&self) -> Vec<Option<String>> {
        if self.folders.is_empty() {
            vec![None]
        } else {
            self.folders.clone()
        }
    }

    /// Whether a discovered folder must be pruned before recursion.
    ///
    /// Matches the built-in drafts rule, configured names
    /// (case-insensitive) and configured ids (exact).
    pub fn is_pruned(&self, name: &str, id: &str) -> bool {
        if name.eq_ignore_ascii_case(DRAFTS_FOLDER) {
            return true;
        }
        self.ignored_folders
            .iter()
            .any(|entry| entry == id || entry.eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for CrawlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrawlConfig")
            .field("folders", &self.folders)
            .field("fields", &self.fields)
            .field("ignored_folders", &self.ignored_folders)
            .field("fields_default", &self.fields_default)
            .field("fields_mapper", &self.fields_mapper)
            .field("update_metadata", &self.update_metadata.is_some())
            .field("debug", &self.debug)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drafts_always_pruned() {
        let config = CrawlConfig::default();

        assert!(config.is_pruned("drafts", "id1"));
        assert!(config.is_pruned("Drafts", "id1"));
        assert!(config.is_pruned("DRAFTS", "id1"));
        assert!(!config.is_pruned("Published", "id1"));
    }

    #[test]
    fn test_ignored_folder_by_name_is_case_insensitive() {
        let config =
            CrawlConfig::default().with_ignored_folders(vec!["Internal".to_string()]);

        assert!(config.is_pruned("internal", "id1"));
        assert!(config.is_pruned("INTERNAL", "id2"));
    }

    #[test]
    fn test_ignored_folder_by_id() {
        let config =
            CrawlConfig::default().with_ignored_folders(vec!["folder123".to_string()]);

        assert!(config.is_pruned("Anything", "folder123"));
        assert!(!config.is_pruned("Anything", "folder456"));
    }

    #[test]
    fn test_root_folders_default_to_virtual_root() {
        assert_eq!(CrawlConfig::default().root_folders(), vec![None]);

        let config = CrawlConfig::default().with_folders(vec![Some("a".to_string())]);
        assert_eq!(config.root_folders(), vec![Some("a".to_string())]);
    }
}

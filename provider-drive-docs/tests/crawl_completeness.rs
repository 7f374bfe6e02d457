//! End-to-end crawl over a synthetic folder tree.
//!
//! The tree is shaped to force every traversal path at once: 120 crawl
//! roots (splitting the oversized parent set into parallel batches), 250
//! sibling folders under one root (interleaving pagination with batch
//! descent), a third folder level, and a pruned drafts subtree. Every leaf
//! document must come back exactly once.

use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use provider_drive_docs::service::DirectoryService;
use provider_drive_docs::types::{DriveNode, NodePage, MIME_DOCUMENT, MIME_FOLDER};
use provider_drive_docs::{CrawlConfig, DriveDocsConnector, Result};

/// Page size small enough that one listing paginates several times
const PAGE: usize = 60;

fn folder(id: &str, name: &str, parent: &str) -> DriveNode {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "mimeType": MIME_FOLDER,
        "parents": [parent],
    }))
    .unwrap()
}

fn document(id: &str, name: &str, parent: &str) -> DriveNode {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "mimeType": MIME_DOCUMENT,
        "parents": [parent],
    }))
    .unwrap()
}

struct FakeDirectory {
    children: HashMap<String, Vec<DriveNode>>,
    calls: AtomicUsize,
}

impl FakeDirectory {
    fn build() -> (Self, Vec<Option<String>>, usize) {
        let mut children: HashMap<String, Vec<DriveNode>> = HashMap::new();
        let mut roots = Vec::new();
        let mut leaves = 0;

        for i in 0..120 {
            let root_id = format!("r{}", i);
            roots.push(Some(root_id.clone()));
            children
                .entry(root_id.clone())
                .or_default()
                .push(document(
                    &format!("d-root-{}", i),
                    &format!("Root Doc {}", i),
                    &root_id,
                ));
            leaves += 1;
        }

        // One root fans out into 250 sibling sections.
        for j in 0..250 {
            children
                .entry("r0".to_string())
                .or_default()
                .push(folder(&format!("f-sec-{}", j), &format!("Sec {}", j), "r0"));
            children
                .entry(format!("f-sec-{}", j))
                .or_default()
                .push(document(
                    &format!("d-sec-{}", j),
                    &format!("Doc {}", j),
                    &format!("f-sec-{}", j),
                ));
            leaves += 1;
        }

        // A third level under a handful of sections.
        for j in 0..5 {
            children
                .entry(format!("f-sec-{}", j))
                .or_default()
                .push(folder(
                    &format!("f-topic-{}", j),
                    &format!("Topic {}", j),
                    &format!("f-sec-{}", j),
                ));
            children
                .entry(format!("f-topic-{}", j))
                .or_default()
                .push(document(
                    &format!("d-deep-{}", j),
                    &format!("Deep {}", j),
                    &format!("f-topic-{}", j),
                ));
            leaves += 1;
        }

        // Drafts subtree: must never be visited.
        children
            .entry("r1".to_string())
            .or_default()
            .push(folder("f-drafts", "Drafts", "r1"));
        children
            .entry("f-drafts".to_string())
            .or_default()
            .push(document("d-never", "Never", "f-drafts"));

        (
            Self {
                children,
                calls: AtomicUsize::new(0),
            },
            roots,
            leaves,
        )
    }
}

#[async_trait]
impl DirectoryService for FakeDirectory {
    async fn list(
        &self,
        parent_ids: &[String],
        _extra_fields: &[String],
        page_token: Option<String>,
    ) -> Result<NodePage> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        assert!(
            parent_ids.len() <= 100,
            "listing query exceeded the batch limit: {}",
            parent_ids.len()
        );
        assert!(
            !parent_ids.iter().any(|id| id == "f-drafts"),
            "descended into pruned folder"
        );

        let combined: Vec<DriveNode> = parent_ids
            .iter()
            .flat_map(|id| self.children.get(id).cloned().unwrap_or_default())
            .collect();

        let offset: usize = page_token
            .as_deref()
            .map(|token| token.parse().expect("page token is an offset"))
            .unwrap_or(0);
        let end = (offset + PAGE).min(combined.len());

        Ok(NodePage {
            files: combined[offset..end].to_vec(),
            next_page_token: (end < combined.len()).then(|| end.to_string()),
        })
    }
}

#[tokio::test(start_paused = true)]
async fn every_leaf_document_appears_exactly_once() {
    let (directory, roots, expected_leaves) = FakeDirectory::build();
    let directory = Arc::new(directory);

    let connector = DriveDocsConnector::new(
        Arc::clone(&directory) as Arc<dyn DirectoryService>,
        CrawlConfig::default().with_folders(roots),
    );

    let records = connector.fetch_documents().await.unwrap();

    assert_eq!(records.len(), expected_leaves);

    let ids: HashSet<&str> = records.iter().filter_map(|r| r.id()).collect();
    assert_eq!(ids.len(), expected_leaves, "duplicate documents in output");

    assert!(!ids.contains("d-never"), "pruned subtree leaked a document");

    // Pagination must actually have happened.
    assert!(directory.calls.load(Ordering::SeqCst) > 10);
}

#[tokio::test(start_paused = true)]
async fn paths_and_breadcrumbs_reflect_ancestry() {
    let (directory, roots, _) = FakeDirectory::build();

    let connector = DriveDocsConnector::new(
        Arc::new(directory) as Arc<dyn DirectoryService>,
        CrawlConfig::default().with_folders(roots),
    );

    let records = connector.fetch_documents().await.unwrap();

    let deep = records
        .iter()
        .find(|r| r.id() == Some("d-deep-3"))
        .expect("deep document missing");
    assert_eq!(deep.path, "/sec-3/topic-3/deep-3");
    assert_eq!(deep.breadcrumb, vec!["Sec 3", "Topic 3"]);

    let root_doc = records
        .iter()
        .find(|r| r.id() == Some("d-root-5"))
        .expect("root document missing");
    assert_eq!(root_doc.path, "/root-doc-5");
    assert!(root_doc.breadcrumb.is_empty());
}

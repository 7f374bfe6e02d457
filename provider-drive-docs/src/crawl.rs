//! Recursive folder-tree traversal
//!
//! The crawler walks a folder tree whose size is unknown up front, one
//! rate-limited listing query per batch of up to [`BATCH_SIZE`] parent
//! folders. Three things overlap inside a single call:
//!
//! - pagination: each continuation token fetches another page of results
//! - descent: whenever enough folders have accumulated to fill a batch,
//!   recursion into that batch starts without waiting for pagination
//! - batch splitting: oversized parent sets fan out into parallel calls
//!
//! Every spawned branch is joined before the call returns, so no work
//! outlives its parent and the first error tears down the whole crawl:
//! branches live in a [`JoinSet`], which aborts whatever is still running
//! when an error propagates out of the call. The shared rate limiter is
//! the only state crossing branch boundaries; each call owns its own
//! accumulators.

use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, trace};

use crate::batch::evenly_chunk;
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::rate_limit::RateLimiter;
use crate::service::DirectoryService;
use crate::types::{DocumentRecord, DriveNode, FolderRef};

/// Maximum parent folders per listing query
pub const BATCH_SIZE: usize = 100;

/// Recursive, batch-parallel crawler over the remote folder tree.
pub struct Crawler {
    service: Arc<dyn DirectoryService>,
    limiter: Arc<RateLimiter>,
    config: Arc<CrawlConfig>,
}

impl Crawler {
    pub fn new(
        service: Arc<dyn DirectoryService>,
        limiter: Arc<RateLimiter>,
        config: Arc<CrawlConfig>,
    ) -> Arc<Self> {
        Arc::new(Self {
            service,
            limiter,
            config,
        })
    }

    /// Crawl every document reachable from `parents`.
    ///
    /// Output order is unspecified. Any listing failure propagates
    /// immediately, aborting every branch spawned by this call; there is
    /// no retry and no partial result.
    ///
    /// A virtual root (`id == None`) is only honored when it is the sole
    /// member of its batch; batches mixing it with concrete ids issue the
    /// id predicate alone.
    pub fn crawl(
        self: Arc<Self>,
        parents: Vec<FolderRef>,
        depth: u32,
    ) -> BoxFuture<'static, Result<Vec<DocumentRecord>>> {
        Box::pin(async move { self.crawl_batch(parents, depth).await })
    }

    async fn crawl_batch(
        self: Arc<Self>,
        parents: Vec<FolderRef>,
        depth: u32,
    ) -> Result<Vec<DocumentRecord>> {
        if parents.len() > BATCH_SIZE {
            return self.crawl_split(parents, depth).await;
        }

        let parent_ids: Vec<String> = parents.iter().filter_map(|p| p.id.clone()).collect();

        let mut documents = Vec::new();
        let mut pending: Vec<FolderRef> = Vec::new();
        let mut branches: JoinSet<Result<Vec<DocumentRecord>>> = JoinSet::new();
        let mut page_token: Option<String> = None;

        loop {
            let waited = self.limiter.acquire().await;
            if self.config.debug {
                debug!(
                    parent_count = parents.len(),
                    depth,
                    waited_ms = waited.as_millis() as u64,
                    "Listing folder batch"
                );
            }

            let page = self
                .service
                .list(&parent_ids, &self.config.fields, page_token.take())
                .await?;

            self.classify(page.files, &parents, &mut documents, &mut pending);

            // Peel off full batches and descend while pagination continues.
            while pending.len() >= BATCH_SIZE {
                let batch: Vec<FolderRef> = pending.drain(..BATCH_SIZE).collect();
                branches.spawn(Arc::clone(&self).crawl(batch, depth + 1));
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        if !pending.is_empty() {
            branches.spawn(Arc::clone(&self).crawl(pending, depth + 1));
        }

        while let Some(branch) = branches.join_next().await {
            documents.extend(branch??);
        }

        Ok(documents)
    }

    /// Oversized parent set: partition and crawl the chunks in parallel.
    async fn crawl_split(
        self: Arc<Self>,
        parents: Vec<FolderRef>,
        depth: u32,
    ) -> Result<Vec<DocumentRecord>> {
        let mut branches: JoinSet<Result<Vec<DocumentRecord>>> = JoinSet::new();
        for chunk in evenly_chunk(parents, BATCH_SIZE) {
            branches.spawn(Arc::clone(&self).crawl(chunk, depth));
        }

        let mut documents = Vec::new();
        while let Some(branch) = branches.join_next().await {
            documents.extend(branch??);
        }
        Ok(documents)
    }

    /// Partition one page of nodes into documents and next-depth folders.
    fn classify(
        &self,
        nodes: Vec<DriveNode>,
        parents: &[FolderRef],
        documents: &mut Vec<DocumentRecord>,
        pending: &mut Vec<FolderRef>,
    ) {
        for node in nodes {
            let parent = parents.iter().find(|p| {
                p.id.as_ref()
                    .is_some_and(|id| node.parents.iter().any(|candidate| candidate == id))
            });
            let (parent_path, parent_breadcrumb): (&str, &[String]) = match parent {
                Some(p) => (p.path.as_str(), p.breadcrumb.as_slice()),
                None => ("", &[]),
            };

            if node.is_folder() {
                if self.config.is_pruned(&node.name, &node.id) {
                    trace!(folder = %node.name, id = %node.id, "Pruned folder");
                    continue;
                }
                pending.push(FolderRef::child(parent_path, parent_breadcrumb, &node));
            } else {
                documents.push(DocumentRecord::new(node, parent_path, parent_breadcrumb));
            }
        }
    }
}

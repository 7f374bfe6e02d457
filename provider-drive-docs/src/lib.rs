//! # Drive Documents Provider
//!
//! Connector that enumerates documents stored in a Drive-style hierarchical
//! directory service and returns a flat list of records, each annotated
//! with a slug-style path and a breadcrumb of its folder ancestry.
//!
//! ## Overview
//!
//! This crate provides:
//! - A recursive, paginated, batch-parallel crawl of a folder tree of
//!   a-priori-unknown size
//! - A global token-bucket rate limit shared by every crawl branch
//! - Folder pruning (built-in drafts rule plus configured names/ids)
//! - A pure projection stage: index collapsing, field defaults and
//!   renames, structured-metadata overlay from document descriptions
//!
//! Credential acquisition and host lifecycle live behind the seams in
//! `host-traits`; failures from the remote service are fatal and abort the
//! whole crawl (no retry, no partial results).
//!
//! ## Example
//!
//! ```ignore
//! use provider_drive_docs::{CrawlConfig, DriveDocsConnector};
//! use std::sync::Arc;
//!
//! let connector = DriveDocsConnector::from_http(
//!     http_client,
//!     token_provider,
//!     CrawlConfig::default().with_folders(vec![Some("root-folder-id".into())]),
//! );
//! let records = connector.fetch_documents().await?;
//! ```

pub mod batch;
pub mod config;
pub mod crawl;
pub mod error;
pub mod project;
pub mod rate_limit;
pub mod service;
pub mod types;

pub use config::{CrawlConfig, RecordMutator};
pub use error::{ProviderError, Result};
pub use rate_limit::RateLimiter;
pub use service::{DirectoryService, DriveDirectoryService};

use async_trait::async_trait;
use host_traits::auth::AccessTokenProvider;
use host_traits::http::HttpClient;
use host_traits::source::{DocumentSource, SourceRecord};
use std::sync::Arc;
use tracing::info;

use crate::crawl::Crawler;
use crate::project::project;
use crate::types::FolderRef;

/// The connector the content-aggregation host consumes.
pub struct DriveDocsConnector {
    service: Arc<dyn DirectoryService>,
    limiter: Arc<RateLimiter>,
    config: Arc<CrawlConfig>,
}

impl DriveDocsConnector {
    /// Build a connector over an already-constructed directory service.
    pub fn new(service: Arc<dyn DirectoryService>, config: CrawlConfig) -> Self {
        Self {
            service,
            limiter: Arc::new(RateLimiter::default()),
            config: Arc::new(config),
        }
    }

    /// Build a connector talking to the Drive API over the host's HTTP
    /// client and token provider.
    pub fn from_http(
        http_client: Arc<dyn HttpClient>,
        token_provider: Arc<dyn AccessTokenProvider>,
        config: CrawlConfig,
    ) -> Self {
        Self::new(
            Arc::new(DriveDirectoryService::new(http_client, token_provider)),
            config,
        )
    }

    /// Substitute the shared rate limiter, e.g. with looser bounds or a
    /// deterministic instance in tests.
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Crawl the configured roots and project every discovered document.
    pub async fn fetch_documents(&self) -> Result<Vec<SourceRecord>> {
        let roots: Vec<FolderRef> = self
            .config
            .root_folders()
            .into_iter()
            .map(FolderRef::root)
            .collect();

        info!(roots = roots.len(), "Starting document crawl");

        let crawler = Crawler::new(
            Arc::clone(&self.service),
            Arc::clone(&self.limiter),
            Arc::clone(&self.config),
        );
        let documents = crawler.crawl(roots, 0).await?;

        info!(documents = documents.len(), "Crawl finished");

        let mut records: Vec<SourceRecord> = documents
            .into_iter()
            .map(|document| project(document, &self.config))
            .collect();

        if let Some(mutator) = &self.config.update_metadata {
            records = records.into_iter().map(|record| mutator(record)).collect();
        }

        Ok(records)
    }
}

#[async_trait]
impl DocumentSource for DriveDocsConnector {
    async fn fetch_documents(&self) -> host_traits::error::Result<Vec<SourceRecord>> {
        DriveDocsConnector::fetch_documents(self)
            .await
            .map_err(Into::into)
    }
}

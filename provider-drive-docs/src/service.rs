//! Remote directory service access
//!
//! Defines the [`DirectoryService`] seam the crawler talks to, and its
//! Drive API v3 implementation over the host's `HttpClient`. Keeping the
//! listing call behind a trait lets tests drive the crawler with a
//! deterministic fake instead of a live API.

use async_trait::async_trait;
use host_traits::auth::AccessTokenProvider;
use host_traits::http::{HttpClient, HttpMethod, HttpRequest};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{ProviderError, Result};
use crate::types::{NodePage, BASE_FIELDS, MIME_DOCUMENT, MIME_FOLDER};

/// Drive API base URL
const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Maximum results per page (Drive API limit)
const MAX_PAGE_SIZE: u32 = 1000;

/// One paginated listing query against the remote directory service.
///
/// `parent_ids` empty means a virtual-root listing: no parent-containment
/// predicate is applied. Errors are fatal to the crawl; implementations
/// must not retry.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn list(
        &self,
        parent_ids: &[String],
        extra_fields: &[String],
        page_token: Option<String>,
    ) -> Result<NodePage>;
}

/// Drive API v3 directory service
///
/// Builds `files.list` queries restricted to folder/document MIME types,
/// excluding trashed nodes, with the parent predicate OR-combined over the
/// batch of folder ids.
pub struct DriveDirectoryService {
    http_client: Arc<dyn HttpClient>,
    token_provider: Arc<dyn AccessTokenProvider>,
}

impl DriveDirectoryService {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        token_provider: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            http_client,
            token_provider,
        }
    }

    /// Build the `q` search expression for one listing call
    fn build_query(parent_ids: &[String]) -> String {
        let mut query = format!(
            "(mimeType = '{}' or mimeType = '{}') and trashed = false",
            MIME_FOLDER, MIME_DOCUMENT
        );

        if !parent_ids.is_empty() {
            let parents = parent_ids
                .iter()
                .map(|id| format!("'{}' in parents", id))
                .collect::<Vec<_>>()
                .join(" or ");
            query.push_str(&format!(" and ({})", parents));
        }

        query
    }

    /// Build the field projection: base node fields plus configured extras
    fn build_fields(extra_fields: &[String]) -> String {
        let mut fields: Vec<&str> = BASE_FIELDS.to_vec();
        for field in extra_fields {
            if !fields.contains(&field.as_str()) {
                fields.push(field);
            }
        }
        format!("nextPageToken,files({})", fields.join(","))
    }
}

#[async_trait]
impl DirectoryService for DriveDirectoryService {
    #[instrument(skip(self, extra_fields), fields(parents = parent_ids.len()))]
    async fn list(
        &self,
        parent_ids: &[String],
        extra_fields: &[String],
        page_token: Option<String>,
    ) -> Result<NodePage> {
        let query = Self::build_query(parent_ids);

        let mut url = format!(
            "{}/files?q={}&pageSize={}&fields={}",
            DRIVE_API_BASE,
            urlencoding::encode(&query),
            MAX_PAGE_SIZE,
            urlencoding::encode(&Self::build_fields(extra_fields)),
        );

        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(&token)));
        }

        let token = self.token_provider.access_token().await?;
        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(token)
            .header("Accept", "application/json");

        let response = self.http_client.execute(request).await?;

        if !response.is_success() {
            return Err(ProviderError::ApiError {
                status_code: response.status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        let page: NodePage = serde_json::from_slice(&response.body).map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse files list response: {}", e))
        })?;

        debug!(
            items = page.files.len(),
            has_next = page.next_page_token.is_some(),
            "Listed directory page"
        );

        Ok(page)
    }
}

//! Authentication Provider Seam
//!
//! The connector never acquires or refreshes credentials itself. The host
//! hands it an [`AccessTokenProvider`] that yields an already-authorized
//! bearer token for the remote directory service; how that token came to be
//! (OAuth flows, service accounts, keychains) is entirely the host's
//! business.

use async_trait::async_trait;

use crate::error::Result;

/// Supplies an authorized bearer token for remote directory service calls.
///
/// Called before every outbound request, so hosts that rotate tokens can
/// return a fresh one at any time.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Return a token valid for the next request.
    ///
    /// # Errors
    ///
    /// Returns error if no valid token can be produced; the connector
    /// propagates this and aborts the crawl.
    async fn access_token(&self) -> Result<String>;
}

/// Token provider backed by a fixed string.
///
/// Useful for tests and for hosts that manage token lifetime themselves and
/// rebuild the connector when the token changes.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_provider() {
        let provider = StaticTokenProvider::new("secret");
        assert_eq!(provider.access_token().await.unwrap(), "secret");
    }
}

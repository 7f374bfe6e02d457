//! Error types for the Drive documents provider

use thiserror::Error;

/// Drive documents provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// API request returned an error status
    #[error("Drive API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Failed to parse an API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// A spawned crawl branch panicked or was cancelled
    #[error("Crawl task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    /// Host error (transport, auth)
    #[error(transparent)]
    HostError(#[from] host_traits::error::HostError),
}

/// Result type for Drive documents operations
pub type Result<T> = std::result::Result<T, ProviderError>;

impl From<ProviderError> for host_traits::error::HostError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::ApiError {
                status_code,
                message,
            } => host_traits::error::HostError::OperationFailed(format!(
                "API error (status {}): {}",
                status_code, message
            )),
            ProviderError::ParseError(msg) => {
                host_traits::error::HostError::OperationFailed(format!("Parse error: {}", msg))
            }
            ProviderError::TaskFailed(e) => {
                host_traits::error::HostError::OperationFailed(format!("Crawl task failed: {}", e))
            }
            ProviderError::HostError(e) => e,
        }
    }
}

//! # Host Traits
//!
//! Contract between the document connector and its content-aggregation host.
//!
//! ## Overview
//!
//! This crate defines the seams the connector depends on but does not own:
//!
//! - [`HttpClient`](http::HttpClient) - async HTTP operations against the
//!   remote directory service
//! - [`AccessTokenProvider`](auth::AccessTokenProvider) - supplies an
//!   already-authorized bearer token (credential acquisition and refresh
//!   live in the host, not here)
//! - [`DocumentSource`](source::DocumentSource) - the surface the host
//!   consumes: enumerate a remote tree and return flat document records
//!
//! ## Error Handling
//!
//! All traits use [`HostError`](error::HostError) so the host sees one
//! error type regardless of which connector produced it. Connector crates
//! convert their internal errors at this seam.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` bounds so implementations can be shared
//! across async tasks behind `Arc`.

pub mod auth;
pub mod error;
pub mod http;
pub mod source;

pub use error::HostError;

// Re-export commonly used types
pub use auth::{AccessTokenProvider, StaticTokenProvider};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use source::{DocumentSource, SourceRecord};

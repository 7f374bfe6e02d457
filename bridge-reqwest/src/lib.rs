//! # Reqwest Host Bridge
//!
//! Concrete [`HttpClient`](host_traits::http::HttpClient) implementation
//! backed by `reqwest`, for hosts that do not bring their own HTTP stack.
//!
//! There is deliberately no retry or backoff here: the connector's failure
//! model is fail-fast, so a transport error surfaces unchanged.

pub mod http;

pub use http::ReqwestHttpClient;

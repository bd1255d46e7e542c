//! Authenticated API client
//!
//! This module provides the client every typed service goes through. It
//! handles bearer injection, the busy indicator, error classification and
//! alerting, and the one-shot refresh-and-replay on a rejected credential.
//!
//! # Architecture
//!
//! - Uses the shared [`HttpClient`](crate::http::HttpClient) (no direct reqwest)
//! - Collaborators injected through [`SessionContext`](authconsole_core::SessionContext)
//! - Credential renewal behind the [`SessionRefresher`] seam
//! - Timeout on every call

pub mod auth;
pub mod client;
pub mod errors;

pub use auth::{NoRefresh, SessionRefresher};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};

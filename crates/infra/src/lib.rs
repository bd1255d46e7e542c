//! # AuthConsole Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The HTTP transport and session cookie jar (`reqwest`)
//! - The authenticated API client with refresh-and-replay
//! - Credential stores (in-memory, system keychain), busy flag, alert queue
//! - The session service (login, refresh, logout)
//! - Typed service modules, one per REST resource
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `authconsole-core`
//! - Depends on `authconsole-domain` and `authconsole-core`
//! - Contains all "impure" code (network, keychain, environment)

pub mod api;
pub mod config;
pub mod context;
pub mod errors;
pub mod http;
pub mod observability;
pub mod services;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder, ApiClientConfig, ApiError, ApiErrorCategory};
pub use context::ConsoleContext;
pub use errors::InfraError;
pub use http::{HttpClient, SessionCookieJar};
pub use observability::init_tracing;
pub use session::{
    AlertQueue, BusyFlag, InMemoryCredentialStore, KeychainCredentialStore, LogoutReason,
    SessionEvent, SessionService,
};

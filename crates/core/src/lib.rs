//! # AuthConsole Core
//!
//! Pure request logic layer - no HTTP, keychain or runtime dependencies.
//!
//! This crate contains:
//! - The immutable request descriptor and its behavior flags
//! - Error classification (structured message, status table, transport)
//! - The refresh-and-replay decision rule
//! - Port interfaces (traits) for the client's collaborators
//! - Assignment set diffing for the relationship screens
//!
//! ## Architecture Principles
//! - Only depends on `authconsole-domain`
//! - No network, storage, or platform code
//! - All collaborators via traits
//! - Pure, testable logic

pub mod assignments;
pub mod classification;
pub mod ports;
pub mod request;
pub mod retry;

pub use assignments::{diff, AssignmentDiff};
pub use classification::{classify, ErrorClass, FailureOrigin};
pub use ports::{
    AlertSink, BusyGuard, BusyIndicator, CookieReader, CredentialStore, SessionContext,
};
pub use request::{
    resolve_url, substitute_platform_id, HttpMethod, RequestDescriptor, RequestOptions,
};
pub use retry::{is_session_endpoint, should_refresh};

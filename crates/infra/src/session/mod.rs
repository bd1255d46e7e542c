//! Session state: credential stores, busy flag, alert queue and the
//! session service that ties them to the login/refresh/logout endpoints

pub mod alerts;
pub mod busy;
pub mod keychain;
pub mod memory;
pub mod service;

pub use alerts::AlertQueue;
pub use busy::BusyFlag;
pub use keychain::KeychainCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use service::{SessionEndpoints, SessionService};

use authconsole_domain::ProfileId;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user logged out
    UserRequested,
    /// The refresh endpoint answered with a client error
    RefreshRejected,
}

/// Broadcast on every session transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn { profile_id: Option<ProfileId> },
    Refreshed,
    LoggedOut { reason: LogoutReason },
}

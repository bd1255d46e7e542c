//! Error classification
//!
//! Maps a failed call to the message shown to the user. The chain is fixed:
//! a structured server message wins, then the status table, then the
//! transport outcome. The mapping is a pure function of its input.

use thiserror::Error;

/// How a call failed, reduced to what classification needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin<'a> {
    /// The server answered with a non-success status
    Response { status: u16, err_msg: Option<&'a str> },
    /// The request left but nothing came back (connect failure, timeout)
    NoResponse,
    /// The call failed before or after the exchange (encoding, decoding)
    Local,
}

/// Classified failure; `Display` is the user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ErrorClass {
    #[error("{0}")]
    ServerMessage(String),
    #[error("Unauthorized - Please login again")]
    Unauthorized,
    #[error("Forbidden - you do not have permission")]
    Forbidden,
    #[error("Resource not found")]
    NotFound,
    #[error("Internal server error")]
    InternalServerError,
    #[error("Bad gateway")]
    BadGateway,
    #[error("Service unavailable")]
    ServiceUnavailable,
    #[error("Gateway timeout")]
    GatewayTimeout,
    #[error("Server error")]
    ServerError,
    #[error("Client error - please check your request")]
    ClientError,
    #[error("Network error - Please check your connection")]
    Network,
    #[error("An unexpected error occurred")]
    Unexpected,
}

impl ErrorClass {
    /// Status-table class, ignoring any server message
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500 => Self::InternalServerError,
            502 => Self::BadGateway,
            503 => Self::ServiceUnavailable,
            504 => Self::GatewayTimeout,
            501 | 505..=599 => Self::ServerError,
            400..=499 => Self::ClientError,
            _ => Self::Unexpected,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Failure came from the transport rather than the server
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network)
    }
}

/// Classify a failure
pub fn classify(origin: FailureOrigin<'_>) -> ErrorClass {
    match origin {
        FailureOrigin::Response { status, err_msg } => {
            match err_msg.map(str::trim).filter(|msg| !msg.is_empty()) {
                Some(msg) => ErrorClass::ServerMessage(msg.to_string()),
                None => ErrorClass::from_status(status),
            }
        }
        FailureOrigin::NoResponse => ErrorClass::Network,
        FailureOrigin::Local => ErrorClass::Unexpected,
    }
}

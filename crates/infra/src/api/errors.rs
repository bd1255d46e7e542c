//! API-specific error types
//!
//! Every failure a caller sees carries its [`ErrorClass`]; `Display` is the
//! user-facing message from that class, while [`ApiError::detail`] keeps the
//! underlying cause for logs.

use std::time::Duration;

use authconsole_core::{classify, ErrorClass, FailureOrigin};
use authconsole_domain::{ConsoleError, ErrorEnvelope};
use reqwest::StatusCode;
use thiserror::Error;

/// Coarse grouping of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// 401 - credential missing, expired or rejected
    Authentication,
    /// 403 - authenticated but not allowed
    Authorization,
    /// 5xx
    Server,
    /// Other 4xx
    Client,
    /// No response: connect failure or timeout
    Network,
    /// Failed locally: encoding, decoding, storage, configuration
    Local,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("{class}")]
    Status { status: StatusCode, class: ErrorClass },

    #[error("Network error - Please check your connection")]
    Network(String),

    #[error("Network error - Please check your connection")]
    Timeout(Duration),

    #[error("An unexpected error occurred")]
    Encode(String),

    #[error("An unexpected error occurred")]
    Decode(String),

    #[error("An unexpected error occurred")]
    Config(String),

    /// Credential store or cookie jar failure
    #[error("An unexpected error occurred")]
    Session(String),
}

impl ApiError {
    /// Build the error for a non-success response, preferring the server's
    /// structured message over the status table
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let envelope = ErrorEnvelope::from_slice(body);
        let err_msg = envelope.as_ref().and_then(ErrorEnvelope::err_msg);
        let class = classify(FailureOrigin::Response { status: status.as_u16(), err_msg });
        Self::Status { status, class }
    }

    /// Classification of this failure
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Status { class, .. } => class.clone(),
            Self::Network(_) | Self::Timeout(_) => classify(FailureOrigin::NoResponse),
            Self::Encode(_) | Self::Decode(_) | Self::Config(_) | Self::Session(_) => {
                classify(FailureOrigin::Local)
            }
        }
    }

    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                ApiErrorCategory::Authentication
            }
            Self::Status { status, .. } if *status == StatusCode::FORBIDDEN => {
                ApiErrorCategory::Authorization
            }
            Self::Status { status, .. } if status.is_server_error() => ApiErrorCategory::Server,
            Self::Status { .. } => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Encode(_) | Self::Decode(_) | Self::Config(_) | Self::Session(_) => {
                ApiErrorCategory::Local
            }
        }
    }

    /// HTTP status, when the server answered
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Underlying cause, for logs
    pub fn detail(&self) -> String {
        match self {
            Self::Status { status, class } => format!("{status}: {class}"),
            Self::Timeout(after) => format!("no response after {after:?}"),
            Self::Network(detail)
            | Self::Encode(detail)
            | Self::Decode(detail)
            | Self::Config(detail)
            | Self::Session(detail) => detail.clone(),
        }
    }
}

/// Convert from ConsoleError to ApiError
impl From<ConsoleError> for ApiError {
    fn from(err: ConsoleError) -> Self {
        match err {
            ConsoleError::Network(message) => Self::Network(message),
            ConsoleError::Config(message) => Self::Config(message),
            ConsoleError::Storage(message) | ConsoleError::Auth(message) => Self::Session(message),
            ConsoleError::InvalidInput(message) => Self::Encode(message),
            ConsoleError::NotFound(message) | ConsoleError::Internal(message) => {
                Self::Session(message)
            }
        }
    }
}

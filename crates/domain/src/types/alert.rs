//! User-facing alert messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Success,
    Info,
    Warning,
    Error,
}

crate::impl_wire_enum_conversions!(AlertSeverity {
    Success => "success",
    Info => "info",
    Warning => "warning",
    Error => "error",
});

/// One message for the global alert channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

impl Alert {
    pub fn new(severity: AlertSeverity, message: impl Into<String>) -> Self {
        Self { severity, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(AlertSeverity::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertSeverity::Success, message)
    }
}

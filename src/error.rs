//! # Error Types
//!
//! Unified error handling for the admin library, the scheduled trigger and the CLI.

use thiserror::Error;

/// Admin operation result type
pub type AdminResult<T> = std::result::Result<T, AdminError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdminError {
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("HTTP request failed: {message}")]
    Http { message: String, transient: bool },
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Timeout waiting for operation: {0}")]
    Timeout(String),
    #[error("Operation cancelled: {0}")]
    Cancelled(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    pub fn invalid_date(input: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an API error from an HTTP response
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Check if error is recoverable (worth retrying)
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            AdminError::Http { transient, .. } => *transient,
            AdminError::Timeout(_) => true,
            AdminError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Short human-readable reason used in per-date status lines
    pub fn reason(&self) -> String {
        match self {
            AdminError::Api { message, .. } => message.clone(),
            AdminError::Timeout(_) => "timed out".to_string(),
            AdminError::Cancelled(_) => "cancelled".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return AdminError::Serialization(err.to_string());
        }
        AdminError::Http {
            transient: err.is_timeout() || err.is_connect(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AdminError {
    fn from(err: chrono::ParseError) -> Self {
        AdminError::InvalidDate {
            input: String::new(),
            reason: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for AdminError {
    fn from(err: config::ConfigError) -> Self {
        AdminError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(AdminError::api_error(503, "unavailable").is_recoverable());
        assert!(!AdminError::api_error(400, "bad payload").is_recoverable());
        assert!(AdminError::Timeout("check".into()).is_recoverable());
        assert!(!AdminError::Validation("task_name".into()).is_recoverable());
        assert!(AdminError::Http {
            message: "connection refused".into(),
            transient: true
        }
        .is_recoverable());
    }

    #[test]
    fn test_reason_prefers_backend_message() {
        let err = AdminError::api_error(422, "Task already exists");
        assert_eq!(err.reason(), "Task already exists");
        assert_eq!(AdminError::Timeout("create".into()).reason(), "timed out");
        assert_eq!(AdminError::Cancelled("shutdown".into()).reason(), "cancelled");
    }
}

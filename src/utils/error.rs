// src/utils/error.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type RelayResult<T> = Result<T, RelayError>;

/// Custom error details for additional context
pub type ErrorDetails = HashMap<String, serde_json::Value>;

/// Main error type for the submission relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayError {
    pub message: String,
    pub details: Option<Box<ErrorDetails>>,
    pub status: Option<u16>,
    pub error_code: Option<String>,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    #[default]
    UnknownError,
    NetworkError,
    ValidationError,
    MethodNotAllowed,
    ConfigurationError,
    DeserializationError,
    ExternalServiceError,
    Internal,
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RelayError {}

impl RelayError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            status: None,
            error_code: None,
            kind,
        }
    }

    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(Box::new(details));
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, error_code: impl Into<String>) -> Self {
        self.error_code = Some(error_code.into());
        self
    }

    /// HTTP status to answer with, 500 when none was attached.
    pub fn status_code(&self) -> u16 {
        self.status.unwrap_or(500)
    }

    // Convenience constructors for common error types
    pub fn network_error<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorKind::NetworkError, message)
            .with_status(503)
            .with_code("NETWORK_ERROR")
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
            .with_status(400)
            .with_code("VALIDATION_ERROR")
    }

    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        let method = method.into();
        let mut details = ErrorDetails::new();
        details.insert("method".to_string(), serde_json::Value::String(method));

        Self::new(ErrorKind::MethodNotAllowed, "Method not allowed")
            .with_details(details)
            .with_status(405)
            .with_code("METHOD_NOT_ALLOWED")
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeserializationError, message)
            .with_status(400)
            .with_code("PARSE_ERROR")
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigurationError, message)
            .with_status(500)
            .with_code("CONFIG_ERROR")
    }

    pub fn telegram_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalServiceError, message)
            .with_status(502)
            .with_code("TELEGRAM_ERROR")
    }

    pub fn internal_error<T: Into<String>>(message: T) -> Self {
        Self::new(ErrorKind::Internal, message)
            .with_status(500)
            .with_code("INTERNAL_ERROR")
    }

    pub fn is_configuration_error(&self) -> bool {
        self.kind == ErrorKind::ConfigurationError
    }
}

/// Problems with the process configuration the transport depends on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is not set")]
    Missing { key: &'static str },
    #[error("{key} is malformed: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn key(&self) -> &'static str {
        match self {
            ConfigError::Missing { key } | ConfigError::Invalid { key, .. } => *key,
        }
    }
}

impl From<ConfigError> for RelayError {
    fn from(err: ConfigError) -> Self {
        let code = match err {
            ConfigError::Missing { .. } => "CONFIG_MISSING",
            ConfigError::Invalid { .. } => "CONFIG_INVALID",
        };
        let mut details = ErrorDetails::new();
        details.insert(
            "variable".to_string(),
            serde_json::Value::String(err.key().to_string()),
        );

        RelayError::config_error(err.to_string())
            .with_details(details)
            .with_code(code)
    }
}

// Implement From conversions for common error types
impl From<url::ParseError> for RelayError {
    fn from(err: url::ParseError) -> Self {
        RelayError::config_error(format!("URL parse error: {}", err))
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::network_error(format!("HTTP request failed: {}", err.without_url()))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<worker::Error> for RelayError {
    fn from(err: worker::Error) -> Self {
        RelayError::internal_error(format!("Worker error: {:?}", err))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<RelayError> for worker::Error {
    fn from(err: RelayError) -> Self {
        let message = if let Some(status_code) = err.status {
            format!(
                "[Status: {}] RelayError (Kind: {:?}): {}",
                status_code, err.kind, err.message
            )
        } else {
            format!("RelayError (Kind: {:?}): {}", err.kind, err.message)
        };

        worker::Error::RustError(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_statuses() {
        assert_eq!(RelayError::validation_error("x").status_code(), 400);
        assert_eq!(RelayError::method_not_allowed("GET").status_code(), 405);
        assert_eq!(RelayError::config_error("x").status_code(), 500);
        assert_eq!(RelayError::telegram_error("x").status_code(), 502);
        assert_eq!(RelayError::new(ErrorKind::UnknownError, "x").status_code(), 500);
    }

    #[test]
    fn test_config_error_codes_distinguish_missing_from_invalid() {
        let missing: RelayError = ConfigError::Missing {
            key: "TELEGRAM_BOT_TOKEN",
        }
        .into();
        let invalid: RelayError = ConfigError::Invalid {
            key: "TELEGRAM_CHAT_ID",
            reason: "must be numeric".to_string(),
        }
        .into();

        assert_eq!(missing.error_code.as_deref(), Some("CONFIG_MISSING"));
        assert_eq!(missing.message, "TELEGRAM_BOT_TOKEN is not set");
        assert!(missing.is_configuration_error());

        assert_eq!(invalid.error_code.as_deref(), Some("CONFIG_INVALID"));
        assert_eq!(
            invalid.message,
            "TELEGRAM_CHAT_ID is malformed: must be numeric"
        );
        let details = invalid.details.expect("details attached");
        assert_eq!(details["variable"], "TELEGRAM_CHAT_ID");
    }

    #[test]
    fn test_reqwest_errors_map_to_network_error() {
        let err = reqwest::Client::new()
            .get("https://api.telegram.org/bot123456:SECRET/sendMessage")
            .header("bad\nheader", "x")
            .build()
            .unwrap_err();
        let relay: RelayError = err.into();

        assert_eq!(relay.kind, ErrorKind::NetworkError);
        assert_eq!(relay.status_code(), 503);
        assert!(relay.message.starts_with("HTTP request failed"));
        assert!(!relay.message.contains("SECRET"));
    }
}

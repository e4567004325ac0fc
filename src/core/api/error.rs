//! Error taxonomy for upstream API calls.

use thiserror::Error;

/// Result type for upstream API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to an upstream API.
///
/// Every variant carries a human-readable message; tool handlers surface
/// them to the client as a tool-level failure. Calls are never retried and
/// a failed call never affects subsequent ones.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required input was missing or empty; rejected before any network call.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The upstream API answered 404 for this lookup.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The upstream API answered with a non-success status other than 404.
    #[error("Upstream error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    /// The request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The upstream body was not valid JSON for the expected shape.
    #[error("Invalid response from upstream: {0}")]
    Parse(String),
}

impl ApiError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new not-found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Classify a transport-level reqwest failure.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Whether this error means the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_status() {
        let err = ApiError::Status {
            status: 503,
            message: "maintenance".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("503"));
        assert!(text.contains("maintenance"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(ApiError::not_found("x").is_not_found());
        assert!(!ApiError::validation("x").is_not_found());
    }
}

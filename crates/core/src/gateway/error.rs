//! Error types for gateway calls.

use thiserror::Error;

/// Errors returned by order source, alert and update gateways.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The endpoint could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request failed for another reason.
    #[error("Request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the call never got an answer from the endpoint.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connection(_))
    }

    /// Whether the endpoint answered with a non-success status.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_connect() {
            ApiError::Connection(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(ApiError::Timeout.is_transport());
        assert!(ApiError::Connection("refused".to_string()).is_transport());
        assert!(!ApiError::Decode("eof".to_string()).is_transport());

        let status = ApiError::Status {
            status: 503,
            body: "busy".to_string(),
        };
        assert!(status.is_status());
        assert!(!status.is_transport());
        assert_eq!(status.to_string(), "HTTP 503: busy");
    }
}

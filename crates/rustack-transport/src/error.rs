//! Transport error types

use std::fmt;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while performing a single HTTP round-trip
#[derive(Debug, Clone)]
pub enum TransportError {
    /// HTTP request/response error (malformed request, body read failure)
    Http(String),

    /// Connection error (DNS, TCP, TLS)
    Connection(String),

    /// The per-request timeout elapsed
    Timeout,

    /// Response body could not be parsed
    Serialization(String),

    /// Generic transport error
    Other(String),
}

impl TransportError {
    /// True when the failure happened before any response was received.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
            Self::Connection(msg) => write!(f, "Connection error: {}", msg),
            Self::Timeout => write!(f, "Timeout"),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            TransportError::Connection("refused".into()).to_string(),
            "Connection error: refused"
        );
        assert_eq!(TransportError::Timeout.to_string(), "Timeout");
        assert_eq!(TransportError::Other("boom".into()).to_string(), "boom");
    }

    #[test]
    fn test_is_connect() {
        assert!(TransportError::Timeout.is_connect());
        assert!(TransportError::Connection("dns".into()).is_connect());
        assert!(!TransportError::Http("bad".into()).is_connect());
    }
}

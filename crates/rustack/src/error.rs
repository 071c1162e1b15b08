//! Error types for the Rustack client
//!
//! Every failure surfaces as a variant of [`Error`]. HTTP-level failures
//! carry the raw response so callers can inspect what the control plane
//! said, including its machine-readable `error_alias` tokens.

use rustack_core::poll::PollError;
use rustack_transport::TransportError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a Rustack error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Rustack client.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure (connect, DNS, TLS, timeout). Never retried.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The control plane answered with a non-2xx status other than 409.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 409 whose alias marks the conflict as permanent
    /// (`limit_exceeded`, `object_protected`).
    #[error("{message}")]
    PermanentLock {
        /// Request URL
        url: String,
        /// `"{first non_field_error}: {details}"`
        message: String,
        /// Alias tokens from the 409 body
        aliases: Vec<String>,
    },

    /// A resource stayed locked for longer than the lock timeout.
    #[error("Lock timeout on {url} after {waited:?}")]
    LockTimeout {
        /// Request URL
        url: String,
        /// Time spent retrying
        waited: Duration,
    },

    /// A task did not reach a terminal state within the task timeout.
    #[error("Task {task_id} timed out after {waited:?}")]
    TaskTimeout {
        /// Task id
        task_id: String,
        /// Time spent polling
        waited: Duration,
    },

    /// A task reported the `error` status.
    #[error("Task {task_id} in error status, step: {step}")]
    TaskFailed {
        /// Task id
        task_id: String,
        /// The task's `name`, i.e. the step that failed
        step: String,
    },

    /// The optional lock-wait ceiling was crossed.
    #[error("Resource {path} still locked after {waited:?}")]
    LockWaitTimeout {
        /// Resource path
        path: String,
        /// Time spent waiting
        waited: Duration,
    },

    /// A success response could not be decoded into the requested type.
    #[error("JSON decode failed on {url}: {source}\n{body}")]
    Decode {
        /// Request URL
        url: String,
        /// Raw response body
        body: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A paginated response was not a well-formed item array.
    #[error("Malformed items payload on {url}: {reason}")]
    MalformedItems {
        /// Request URL
        url: String,
        /// What was wrong with it
        reason: String,
    },

    /// A request payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The operation was cancelled through the client's cancellation token.
    #[error("Operation cancelled")]
    Cancelled,

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// No token configured.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A client-side lookup found nothing.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),
}

impl Error {
    /// HTTP status code, for [`Error::Api`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status()),
            _ => None,
        }
    }

    /// True for a 404 from the API or a failed client-side lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_)) || self.status() == Some(404)
    }

    /// True for either kind of lock failure.
    pub fn is_lock_error(&self) -> bool {
        matches!(
            self,
            Error::PermanentLock { .. } | Error::LockTimeout { .. } | Error::LockWaitTimeout { .. }
        )
    }

    /// True for any wait that ran out of time, including a transport timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::LockTimeout { .. }
                | Error::TaskTimeout { .. }
                | Error::LockWaitTimeout { .. }
                | Error::Transport(TransportError::Timeout)
        )
    }

    /// Map a poll failure using `on_exhausted` to build the timeout variant.
    pub(crate) fn from_poll(err: PollError, on_exhausted: impl FnOnce(Duration) -> Error) -> Self {
        match err {
            PollError::Cancelled => Error::Cancelled,
            PollError::Exhausted { elapsed, .. } => on_exhausted(elapsed),
        }
    }
}

/// A non-2xx, non-409 response from the control plane.
///
/// `error_aliases` holds the `error_alias` tokens when the body is a JSON
/// object carrying them; otherwise it is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    url: String,
    status: u16,
    body: String,
    error_aliases: Vec<String>,
}

impl ApiError {
    /// Classify a failed response.
    pub fn from_response(url: impl Into<String>, status: u16, body: &[u8]) -> Self {
        #[derive(serde::Deserialize)]
        struct AliasBody {
            #[serde(default)]
            error_alias: Vec<String>,
        }

        let error_aliases = serde_json::from_slice::<AliasBody>(body)
            .map(|parsed| parsed.error_alias)
            .unwrap_or_default();

        Self {
            url: url.into(),
            status,
            body: String::from_utf8_lossy(body).into_owned(),
            error_aliases,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// `error_alias` tokens from the body.
    pub fn error_aliases(&self) -> &[String] {
        &self.error_aliases
    }

    /// True if the body carried `alias`.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.error_aliases.iter().any(|a| a == alias)
    }

    /// Human-readable message, same as `Display`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HTTP request failure on {}: {}: {}",
            self.url, self.status, self.body
        )
    }
}

impl std::error::Error for ApiError {}

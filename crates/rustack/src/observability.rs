//! Centralized observability utilities for structured logging
//!
//! Every HTTP attempt, lock conflict, and wait transition is logged through
//! this layer so field names stay consistent across the engine.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Absolute request URL
    pub url: String,
    /// Request body size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log one attempt being sent (1-based)
    pub fn log_attempt(&self, attempt: u32) {
        debug!(
            method = %self.method,
            url = %self.url,
            body_size = self.body_size,
            attempt,
            "Sending HTTP request"
        );
    }

    /// Log a 409 that will be retried
    pub fn log_lock_conflict(&self, retry_in: Duration) {
        debug!(
            method = %self.method,
            url = %self.url,
            retry_in_ms = retry_in.as_millis() as u64,
            "Object locked, retrying"
        );
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes (optional)
    pub body_size: Option<usize>,
    /// Time elapsed since the first attempt
    pub elapsed: Duration,
    /// Number of lock retries taken
    pub retries: u32,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
            retries: 0,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Set the number of retries
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Log successful response
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis() as u64,
            body_size = self.body_size,
            retries = self.retries,
            "HTTP request succeeded"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &RequestMetadata, error: &str) {
        warn!(
            method = %request.method,
            url = %request.url,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis() as u64,
            error = %error,
            retries = self.retries,
            "HTTP request failed"
        );
    }
}

/// Timer for measuring how long an operation has been running.
///
/// Reads the tokio clock, so paused-time tests see virtual durations.
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Log task ids returned by a mutating request
pub fn log_tasks_found(url: &str, tasks: &str) {
    debug!(url = %url, tasks = %tasks, "Tasks returned");
}

/// Log the start of a wait loop
pub fn log_wait_started(kind: &'static str, target: &str) {
    debug!(kind, target = %target, "Waiting");
}

/// Log the end of a wait loop
pub fn log_wait_finished(kind: &'static str, target: &str, elapsed: Duration) {
    debug!(
        kind,
        target = %target,
        elapsed_ms = elapsed.as_millis() as u64,
        "Wait finished"
    );
}

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Convenience for binaries and examples; libraries should not call it.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

//! HTTP layer: request description and the lock-retrying engine
//!
//! [`Request`] describes a call; the engine methods on
//! [`Client`](crate::Client) send it, wait out lock conflicts, classify the
//! response, and decode the body.

pub use engine::Executed;
pub use request::Request;

mod engine;
mod lock;
mod request;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

//! Transport abstraction layer for the Rustack client
//!
//! The client never talks to `reqwest` directly. It builds an [`HttpRequest`],
//! hands it to a [`Transport`], and interprets the [`HttpResponse`]. Lock
//! retries, task polling, and status classification all live above this
//! layer, so a transport performs exactly one round-trip per call.
//!
//! # Architecture
//!
//! - **Transport trait**: one async `send_http` method
//! - **HTTP transport**: pooled `reqwest` client
//! - **Mock transport** (`mock` feature): scripted responses and request
//!   recording for tests

#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Usage
//!
//! ```ignore
//! use rustack_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new("GET", "https://cp.sbcloud.ru/v1/account/me")
//!     .with_header("Authorization", "Bearer <token>");
//! let response = transport.send_http(request).await?;
//! ```

pub mod error;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
#[cfg(feature = "mock")]
pub use mock::MockTransport;
pub use traits::{HttpRequest, HttpResponse, Transport};

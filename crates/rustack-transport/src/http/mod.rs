//! HTTP transport implementation
//!
//! Provides a pooled HTTP client that implements the Transport trait.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};

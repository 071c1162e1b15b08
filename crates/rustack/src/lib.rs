//! # Rustack SDK
//!
//! Async Rust client for the Rustack cloud control plane:
//! - Projects, VDCs, VMs, disks, networks, routers and firewalls
//! - Kubernetes, load balancers, S3 storages and DNS
//! - Transparent retry of requests rejected because an object is locked
//! - Mutations that wait for the background tasks they start
//! - Automatic walking of paginated listings
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rustack::{Arguments, Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-token")?;
//!
//!     for vm in client.vms().list(Arguments::defaults()).await? {
//!         println!("{} {}", vm.id, vm.name);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use args::Arguments;
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder, ConnectionPoolConfig, TaskFailurePolicy, Timing};
pub use error::{ApiError, Error, Result};
pub use http::{Executed, Request};
pub use tasks::{TaskReferences, TaskStatus};
pub use types::*;

pub mod args;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod tasks;
pub mod types;

mod lock_wait;
mod pagination;

pub use tokio_util::sync::CancellationToken;

/// Prelude module for common imports
///
/// ```rust
/// use rustack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Arguments, CancellationToken, Client, ClientConfig, Error, Result, TaskFailurePolicy,
        Timing, resources::Resource,
    };
}

/// SDK version, taken from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default control-plane base URL
pub const DEFAULT_BASE_URL: &str = "https://cp.sbcloud.ru";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(DEFAULT_BASE_URL, "https://cp.sbcloud.ru");
    }
}

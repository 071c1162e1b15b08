//! API resource endpoints
//!
//! One handle per resource kind. Handles own a [`Client`] clone and are
//! obtained from it (`client.vms()`, `client.subnets(network_id)`). Each
//! operation builds a path and payload and hands it to the engine; mutating
//! calls wait for the tasks they start.

pub mod account;
pub mod billing;
pub mod compute;
pub mod dns;
pub mod firewall;
pub mod kubernetes;
pub mod load_balancer;
pub mod network;
pub mod paas;
pub mod project;
pub mod router;
pub mod storage;

pub use account::Accounts;
pub use billing::Clients;
pub use compute::{Disks, StorageProfiles, Templates, Vms};
pub use dns::{DnsRecords, DnsZones};
pub use firewall::{FirewallRules, FirewallTemplates, Floatings};
pub use kubernetes::KubernetesClusters;
pub use load_balancer::LoadBalancers;
pub use network::{Networks, Ports, Subnets};
pub use paas::Paas;
pub use project::{Projects, Vdcs};
pub use router::{RouterFirewallRules, Routers, Routes};
pub use storage::{S3Buckets, S3Storages};

use crate::args::Arguments;
use crate::client::Client;
use crate::error::{Error, Result};

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;
}

/// Filter by a parent id, then apply the caller's arguments over it.
pub(crate) fn scoped(key: &str, id: &str, extra: Arguments) -> Arguments {
    Arguments::new().with(key, id).merged([extra])
}

/// The decoded body of a create or update that must answer with the object.
pub(crate) fn required<T>(value: Option<T>, path: &str) -> Result<T> {
    value.ok_or_else(|| Error::Decode {
        url: path.to_string(),
        body: String::new(),
        source: serde::de::Error::custom("empty response body"),
    })
}

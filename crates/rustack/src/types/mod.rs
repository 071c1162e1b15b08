//! Resource types
//!
//! Plain serde data. Nothing here holds a client; sub-resources carry the id
//! of their parent (`Subnet::network_id`, `DnsRecord::dns_id`, ...), which the
//! owning handle fills in after decoding.
//!
//! Payload types (`*Spec`) describe what to send on create. Server objects
//! decode leniently: missing fields fall back to their defaults.

pub use account::*;
pub use compute::*;
pub use dns::*;
pub use kubernetes::*;
pub use load_balancer::*;
pub use network::*;
pub use paas::*;
pub use project::*;
pub use storage::*;

pub mod account;
pub mod compute;
pub mod dns;
pub mod kubernetes;
pub mod load_balancer;
pub mod network;
pub mod paas;
pub mod project;
pub mod storage;

use serde::{Deserialize, Serialize};

/// A nested object the API embeds by id and name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Reference {
    /// Object id
    pub id: String,

    /// Display name, when the API includes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    /// A reference carrying only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// A free-form label attached to storages and clusters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Tag {
    /// Tag id
    pub id: String,
    /// Tag text
    pub name: String,
}

/// Tag names as sent in update payloads.
pub(crate) fn tag_names(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|tag| tag.name.as_str()).collect()
}

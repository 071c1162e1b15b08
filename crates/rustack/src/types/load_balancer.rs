//! Load balancers and their pools

use super::Reference;
use super::network::Port;
use serde::{Deserialize, Serialize};

/// Load balancer service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoadBalancer {
    /// Load balancer id
    pub id: String,
    /// Load balancer name
    pub name: String,
    /// Busy with a server-side operation
    pub locked: bool,
    /// Owning VDC
    pub vdc: Option<Reference>,
    /// Last job id
    pub job_id: Option<String>,
    /// Kubernetes cluster served, if any
    pub kubernetes: Option<Reference>,
    /// Internal port
    pub port: Option<Port>,
    /// Floating IP port
    pub floating: Option<Port>,
    /// Address picked automatically
    #[serde(rename = "autoIp")]
    pub auto_ip: bool,
}

/// A load balancer to create.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoadBalancerSpec {
    /// Load balancer name
    pub name: String,
    /// Internal port
    pub port: LoadBalancerPortSpec,
    /// Floating IP id to bind, if any
    pub floating: Option<String>,
    /// Pick the internal address automatically
    #[serde(rename = "autoIp")]
    pub auto_ip: bool,
}

/// Internal port of a new load balancer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoadBalancerPortSpec {
    /// Network id
    pub network: String,
    /// Fixed address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// A listener and its backend VMs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoadBalancerPool {
    /// Pool id
    pub id: String,
    /// Busy with a server-side operation
    pub locked: bool,
    /// Listening port
    pub port: u16,
    /// Connection limit
    pub connlimit: u32,
    /// Backends
    pub members: Vec<PoolMember>,
    /// Balancing method, e.g. `ROUND_ROBIN`
    pub method: String,
    /// `TCP`, `HTTP` or `HTTPS`
    pub protocol: String,
    /// Session persistence mode
    pub session_persistence: Option<String>,
    /// Load balancer the pool belongs to
    #[serde(skip)]
    pub load_balancer_id: String,
}

/// One backend of a pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PoolMember {
    /// Member id
    pub id: String,
    /// Backend port
    pub port: u16,
    /// Balancing weight
    pub weight: u32,
    /// Backend VM
    pub vm: Option<Reference>,
}

/// A pool to create.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PoolSpec {
    /// Listening port
    pub port: u16,
    /// Connection limit
    pub connlimit: u32,
    /// Backends
    pub members: Vec<PoolMemberSpec>,
    /// Balancing method
    pub method: String,
    /// Protocol
    pub protocol: String,
    /// Session persistence mode
    pub session_persistence: Option<String>,
}

/// A backend to add to a new pool.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PoolMemberSpec {
    /// Backend port
    pub port: u16,
    /// Balancing weight
    pub weight: u32,
    /// VM id
    pub vm: String,
}

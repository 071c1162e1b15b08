//! Kubernetes clusters, templates and node platforms

use super::network::Port;
use super::project::Hypervisor;
use super::{Reference, Tag};
use serde::{Deserialize, Serialize};

/// Managed Kubernetes cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KubernetesCluster {
    /// Cluster id
    pub id: String,
    /// Cluster name
    pub name: String,
    /// Busy with a server-side operation
    pub locked: bool,
    /// Owning VDC
    pub vdc: Option<Reference>,
    /// Owning project
    pub project: Option<Reference>,
    /// Node VMs
    pub vms: Vec<Reference>,
    /// Floating IP port of the API endpoint
    pub floating: Option<Port>,
    /// Last job id
    pub job_id: Option<String>,
    /// vCPUs per node
    pub node_cpu: u32,
    /// RAM per node, GB
    pub node_ram: u32,
    /// Disk per node, GB
    pub node_disk_size: u32,
    /// Number of worker nodes
    pub nodes_count: u32,
    /// Node hardware platform
    pub node_platform: Option<Reference>,
    /// Node storage tier
    pub node_storage_profile: Option<Reference>,
    /// Cluster template
    pub template: Option<Reference>,
    /// SSH key installed on the nodes
    pub user_public_key: String,
    /// Labels
    pub tags: Vec<Tag>,
}

/// A cluster to create.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KubernetesSpec {
    /// Cluster name
    pub name: String,
    /// Kubernetes template id
    pub template: String,
    /// vCPUs per node
    pub node_cpu: u32,
    /// RAM per node, GB
    pub node_ram: u32,
    /// Disk per node, GB
    pub node_disk_size: u32,
    /// Number of worker nodes
    pub nodes_count: u32,
    /// Storage profile id for node disks
    pub node_storage_profile: String,
    /// Node platform id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_platform: Option<String>,
    /// SSH key installed on the nodes
    pub user_public_key: String,
    /// Floating IP address, `RANDOM_FIP`, or none
    pub floating: Option<String>,
}

/// A version of Kubernetes clusters can be created from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KubernetesTemplate {
    /// Template id
    pub id: String,
    /// Template name
    pub name: String,
    /// Minimum vCPUs per node
    pub min_node_cpu: u32,
    /// Minimum RAM per node, GB
    pub min_node_ram: u32,
    /// Minimum disk per node, GB
    pub min_node_hdd: u32,
}

/// Hardware platform for cluster nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Platform {
    /// Platform id
    pub id: String,
    /// Platform name
    pub name: String,
    /// Hypervisor the platform belongs to
    pub hypervisor: Option<Hypervisor>,
}

/// Body of the dashboard endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DashboardUrl {
    #[serde(default)]
    pub(crate) url: Option<String>,
}

//! Projects, VDCs and hypervisors

use super::Reference;
use serde::{Deserialize, Serialize};

/// A project groups VDCs, S3 storages and DNS zones under one billing client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Project {
    /// Project id
    pub id: String,
    /// Project name
    pub name: String,
    /// Owning billing client
    pub client: Reference,
}

/// A hypervisor a VDC runs on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Hypervisor {
    /// Hypervisor id
    pub id: String,
    /// Hypervisor name
    pub name: String,
    /// Hypervisor kind, e.g. `kvm` or `vmware`
    #[serde(rename = "type")]
    pub kind: String,
}

/// Virtual data center.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Vdc {
    /// VDC id
    pub id: String,
    /// VDC name
    pub name: String,
    /// Hypervisor the VDC runs on
    pub hypervisor: Hypervisor,
    /// Owning project
    pub project: Reference,
}

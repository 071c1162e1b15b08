//! VMs, disks, templates and storage profiles

use super::Reference;
use super::network::{Port, PortSpec};
use serde::{Deserialize, Serialize};

/// An OS image VMs are created from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Template {
    /// Template id
    pub id: String,
    /// Template name
    pub name: String,
    /// Minimum vCPUs
    pub min_cpu: u32,
    /// Minimum RAM, GB
    pub min_ram: u32,
    /// Minimum system disk, GB
    pub min_hdd: u32,
}

/// A metadata field a template accepts at VM creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TemplateField {
    /// Field id
    pub id: String,
    /// Field name
    pub name: String,
    /// Default value
    pub default: Option<String>,
    /// Value type
    #[serde(rename = "type")]
    pub kind: String,
    /// Must be supplied
    pub required: bool,
    /// Can be changed after creation
    pub editable: bool,
    /// Display order
    pub position: i32,
    /// Well-known alias, e.g. `hostname` or `password`
    pub system_alias: Option<String>,
}

/// A storage tier disks are placed on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageProfile {
    /// Profile id
    pub id: String,
    /// Profile name
    pub name: String,
}

/// A metadata value set on a VM.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VmMetadata {
    /// Entry id
    pub id: String,
    /// Template field the value is for
    pub field: TemplateField,
    /// Value
    pub value: String,
}

/// Virtual machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Vm {
    /// VM id
    pub id: String,
    /// VM name
    pub name: String,
    /// vCPUs
    pub cpu: u32,
    /// RAM, GB
    pub ram: u32,
    /// Powered on
    pub power: bool,
    /// Owning VDC
    pub vdc: Option<Reference>,
    /// Source template
    pub template: Option<Reference>,
    /// Metadata values
    pub metadata: Vec<VmMetadata>,
    /// cloud-init user data
    pub user_data: Option<String>,
    /// Network ports
    pub ports: Vec<Port>,
    /// Attached disks
    pub disks: Vec<Disk>,
    /// Floating IP port
    pub floating: Option<Port>,
    /// Busy with a server-side operation
    pub locked: bool,
}

/// Block storage volume.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Disk {
    /// Disk id
    pub id: String,
    /// Disk name
    pub name: String,
    /// SCSI address on the VM
    pub scsi: Option<String>,
    /// Size, GB
    pub size: u32,
    /// VM the disk is attached to
    pub vm: Option<Reference>,
    /// Storage tier
    pub storage_profile: Option<Reference>,
    /// Busy with a server-side operation
    pub locked: bool,
}

impl Disk {
    /// Id of the disk's storage profile, empty when unknown.
    pub fn storage_profile_id(&self) -> &str {
        self.storage_profile
            .as_ref()
            .map(|p| p.id.as_str())
            .unwrap_or_default()
    }
}

/// A disk to create, standalone or as part of a VM.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DiskSpec {
    /// Disk name
    pub name: String,
    /// Size, GB
    pub size: u32,
    /// Storage profile id
    pub storage_profile: String,
}

impl DiskSpec {
    /// Describe a disk.
    pub fn new(name: impl Into<String>, size: u32, storage_profile: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            storage_profile: storage_profile.into(),
        }
    }
}

/// Where a new disk goes: free-standing in a VDC, or attached to a VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskPlacement {
    /// Unattached, in this VDC
    Vdc(String),
    /// Attached to this VM
    Vm(String),
}

/// A metadata value to set at VM creation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MetadataSpec {
    /// Template field id
    pub field: String,
    /// Value
    pub value: String,
}

impl MetadataSpec {
    /// Pair a template field id with a value.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A VM to create.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VmSpec {
    /// VM name
    pub name: String,
    /// vCPUs
    pub cpu: u32,
    /// RAM, GB
    pub ram: u32,
    /// Template id
    pub template: String,
    /// Ports to create
    pub ports: Vec<PortSpec>,
    /// Template metadata values
    pub metadata: Vec<MetadataSpec>,
    /// cloud-init user data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    /// Disks to create
    pub disks: Vec<DiskSpec>,
    /// Floating IP address to bind, or `RANDOM_FIP`
    pub floating: Option<String>,
}

impl VmSpec {
    /// A VM with no ports, metadata, disks or floating IP yet.
    pub fn new(name: impl Into<String>, cpu: u32, ram: u32, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cpu,
            ram,
            template: template.into(),
            ports: Vec::new(),
            metadata: Vec::new(),
            user_data: None,
            disks: Vec::new(),
            floating: None,
        }
    }

    /// Add a port.
    pub fn port(mut self, port: PortSpec) -> Self {
        self.ports.push(port);
        self
    }

    /// Add a disk.
    pub fn disk(mut self, disk: DiskSpec) -> Self {
        self.disks.push(disk);
        self
    }

    /// Set a template metadata value.
    pub fn metadata(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push(MetadataSpec::new(field, value));
        self
    }

    /// Set cloud-init user data.
    pub fn user_data(mut self, user_data: impl Into<String>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }

    /// Bind a floating IP.
    pub fn floating(mut self, address: impl Into<String>) -> Self {
        self.floating = Some(address.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_vm_spec_payload() {
        let spec = VmSpec::new("web", 2, 4, "tpl-1")
            .port(PortSpec::new("net-1").ip_address("10.0.0.5"))
            .disk(DiskSpec::new("root", 20, "sp-1"))
            .metadata("f-host", "web");

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "name": "web",
                "cpu": 2,
                "ram": 4,
                "template": "tpl-1",
                "ports": [{"network": "net-1", "ip_address": "10.0.0.5", "fw_templates": []}],
                "metadata": [{"field": "f-host", "value": "web"}],
                "disks": [{"name": "root", "size": 20, "storage_profile": "sp-1"}],
                "floating": null
            })
        );
    }

    #[test]
    fn test_vm_decodes_nested_objects() {
        let vm: Vm = serde_json::from_value(json!({
            "id": "vm-1",
            "name": "web",
            "cpu": 1,
            "ram": 2,
            "power": true,
            "vdc": {"id": "vdc-1", "name": "main"},
            "disks": [{"id": "d1", "size": 10, "storage_profile": {"id": "sp-1"}}],
            "floating": null
        }))
        .unwrap();

        assert_eq!(vm.vdc.unwrap().id, "vdc-1");
        assert_eq!(vm.disks[0].storage_profile_id(), "sp-1");
        assert!(vm.floating.is_none());
        assert!(vm.ports.is_empty());
    }
}

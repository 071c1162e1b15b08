//! Templates, storage profiles, VMs and disks

use super::{Resource, required, scoped};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{Disk, DiskPlacement, DiskSpec, StorageProfile, Template, TemplateField, Vm, VmSpec},
};
use serde::Serialize;
use serde_json::json;

/// VM templates.
#[derive(Clone)]
pub struct Templates {
    client: Client,
}

impl Templates {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Templates available in a VDC. This endpoint is not paginated.
    pub async fn list(&self, vdc_id: &str) -> Result<Vec<Template>> {
        self.client
            .get("v1/template", Arguments::from([("vdc", vdc_id)]))
            .await
    }

    /// One template.
    pub async fn get(&self, id: &str) -> Result<Template> {
        self.client
            .get(&format!("v1/template/{}", id), Arguments::defaults())
            .await
    }

    /// Metadata fields a template accepts.
    pub async fn fields(&self, template_id: &str) -> Result<Vec<TemplateField>> {
        self.client
            .get(&format!("v1/template/{}/field", template_id), Arguments::defaults())
            .await
    }
}

impl Resource for Templates {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Storage profiles.
#[derive(Clone)]
pub struct StorageProfiles {
    client: Client,
}

impl StorageProfiles {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Profiles available in a VDC.
    pub async fn list(&self, vdc_id: &str) -> Result<Vec<StorageProfile>> {
        self.client
            .get_all_pages("v1/storage_profile", Arguments::from([("vdc", vdc_id)]))
            .await
    }

    /// One profile, as seen from a VDC.
    pub async fn get(&self, vdc_id: &str, id: &str) -> Result<StorageProfile> {
        self.client
            .get(
                &format!("v1/storage_profile/{}", id),
                Arguments::from([("vdc", vdc_id)]),
            )
            .await
    }
}

impl Resource for StorageProfiles {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Virtual machines.
#[derive(Clone)]
pub struct Vms {
    client: Client,
}

#[derive(Serialize)]
struct CreateVm<'a> {
    vdc: &'a str,
    #[serde(flatten)]
    spec: &'a VmSpec,
}

impl Vms {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every VM.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<Vm>> {
        self.client.get_all_pages("v1/vm", extra).await
    }

    /// VMs of one VDC.
    pub async fn list_for_vdc(&self, vdc_id: &str, extra: Arguments) -> Result<Vec<Vm>> {
        self.list(scoped("vdc", vdc_id, extra)).await
    }

    /// One VM.
    pub async fn get(&self, id: &str) -> Result<Vm> {
        self.client
            .get(&format!("v1/vm/{}", id), Arguments::defaults())
            .await
    }

    /// Create a VM with its ports and disks, and wait until it is built.
    pub async fn create(&self, vdc_id: &str, spec: &VmSpec) -> Result<Vm> {
        let request = Request::post("v1/vm").json(&CreateVm { vdc: vdc_id, spec })?;
        required(self.client.execute_and_wait(request).await?, "v1/vm")
    }

    /// Power a VM on.
    pub async fn power_on(&self, id: &str) -> Result<()> {
        self.set_state(id, "power_on").await
    }

    /// Power a VM off.
    pub async fn power_off(&self, id: &str) -> Result<()> {
        self.set_state(id, "power_off").await
    }

    async fn set_state(&self, id: &str, state: &str) -> Result<()> {
        let request = Request::post(format!("v1/vm/{}/state", id)).json(&json!({ "state": state }))?;
        self.client.execute_unit_and_wait(request).await
    }

    /// Delete a VM.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/vm/{}", id)))
            .await
    }
}

impl Resource for Vms {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Disks.
#[derive(Clone)]
pub struct Disks {
    client: Client,
}

#[derive(Serialize)]
struct CreateDisk<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    vdc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vm: Option<&'a str>,
    size: u32,
    storage_profile: &'a str,
}

#[derive(Serialize)]
struct UpdateDisk<'a> {
    name: &'a str,
    size: u32,
    storage_profile: &'a str,
}

impl Disks {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every disk.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<Disk>> {
        self.client.get_all_pages("v1/disk", extra).await
    }

    /// Disks of one VDC.
    pub async fn list_for_vdc(&self, vdc_id: &str, extra: Arguments) -> Result<Vec<Disk>> {
        self.list(scoped("vdc", vdc_id, extra)).await
    }

    /// One disk.
    pub async fn get(&self, id: &str) -> Result<Disk> {
        self.client
            .get(&format!("v1/disk/{}", id), Arguments::defaults())
            .await
    }

    /// Create a disk, either free-standing in a VDC or attached to a VM.
    pub async fn create(&self, placement: &DiskPlacement, spec: &DiskSpec) -> Result<Disk> {
        let (vdc, vm) = match placement {
            DiskPlacement::Vdc(id) => (Some(id.as_str()), None),
            DiskPlacement::Vm(id) => (None, Some(id.as_str())),
        };
        let request = Request::post("v1/disk").json(&CreateDisk {
            name: &spec.name,
            vdc,
            vm,
            size: spec.size,
            storage_profile: &spec.storage_profile,
        })?;
        required(self.client.execute_and_wait(request).await?, "v1/disk")
    }

    /// Attach a disk to a VM.
    pub async fn attach(&self, disk_id: &str, vm_id: &str) -> Result<()> {
        let request =
            Request::post(format!("v1/disk/{}/attach", disk_id)).json(&json!({ "vm": vm_id }))?;
        self.client.execute_unit_and_wait(request).await
    }

    /// Detach a disk from its VM.
    pub async fn detach(&self, disk_id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::post(format!("v1/disk/{}/detach", disk_id)))
            .await
    }

    /// Rename a disk, keeping its size and profile.
    pub async fn rename(&self, disk: &Disk, name: &str) -> Result<Disk> {
        self.update(disk, name, disk.size, disk.storage_profile_id()).await
    }

    /// Grow a disk, keeping its name and profile.
    pub async fn resize(&self, disk: &Disk, size: u32) -> Result<Disk> {
        self.update(disk, &disk.name, size, disk.storage_profile_id()).await
    }

    /// Move a disk to another storage profile.
    pub async fn update_storage_profile(&self, disk: &Disk, storage_profile_id: &str) -> Result<Disk> {
        self.update(disk, &disk.name, disk.size, storage_profile_id).await
    }

    async fn update(&self, disk: &Disk, name: &str, size: u32, storage_profile: &str) -> Result<Disk> {
        let path = format!("v1/disk/{}", disk.id);
        let request = Request::put(&path).json(&UpdateDisk {
            name,
            size,
            storage_profile,
        })?;
        required(self.client.execute_and_wait(request).await?, &path)
    }

    /// Delete a disk.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/disk/{}", id)))
            .await
    }
}

impl Resource for Disks {
    fn client(&self) -> &Client {
        &self.client
    }
}

//! Projects and VDCs

use super::{Resource, required, scoped};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{Hypervisor, Project, Vdc},
};
use serde::Deserialize;
use serde_json::json;

/// Projects.
#[derive(Clone)]
pub struct Projects {
    client: Client,
}

impl Projects {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every project.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<Project>> {
        self.client.get_all_pages("v1/project", extra).await
    }

    /// One project.
    pub async fn get(&self, id: &str) -> Result<Project> {
        self.client
            .get(&format!("v1/project/{}", id), Arguments::defaults())
            .await
    }

    /// Create a project under a billing client.
    pub async fn create(&self, client_id: &str, name: &str) -> Result<Project> {
        let request = Request::post("v1/project").json(&json!({
            "name": name,
            "client": client_id,
        }))?;
        required(self.client.execute_and_wait(request).await?, "v1/project")
    }

    /// Rename a project. The owning client is sent along unchanged.
    pub async fn rename(&self, project: &Project, name: &str) -> Result<Project> {
        let path = format!("v1/project/{}", project.id);
        let request = Request::put(&path).json(&json!({
            "name": name,
            "client": project.client.id,
        }))?;
        required(self.client.execute_and_wait(request).await?, &path)
    }

    /// Delete a project.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/project/{}", id)))
            .await
    }

    /// Hypervisors the project's billing client may use.
    pub async fn available_hypervisors(&self, project_id: &str) -> Result<Vec<Hypervisor>> {
        #[derive(Deserialize)]
        struct ProjectClient {
            #[serde(default)]
            client: AllowedHypervisors,
        }

        #[derive(Default, Deserialize)]
        struct AllowedHypervisors {
            #[serde(default)]
            allowed_hypervisors: Vec<Hypervisor>,
        }

        let project: ProjectClient = self
            .client
            .get(&format!("v1/project/{}", project_id), Arguments::defaults())
            .await?;
        Ok(project.client.allowed_hypervisors)
    }
}

impl Resource for Projects {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Virtual data centers.
#[derive(Clone)]
pub struct Vdcs {
    client: Client,
}

impl Vdcs {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every VDC.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<Vdc>> {
        self.client.get_all_pages("v1/vdc", extra).await
    }

    /// VDCs of one project.
    pub async fn list_for_project(&self, project_id: &str, extra: Arguments) -> Result<Vec<Vdc>> {
        self.list(scoped("project", project_id, extra)).await
    }

    /// One VDC.
    pub async fn get(&self, id: &str) -> Result<Vdc> {
        self.client
            .get(&format!("v1/vdc/{}", id), Arguments::defaults())
            .await
    }

    /// Create a VDC in a project on the given hypervisor.
    pub async fn create(&self, project_id: &str, name: &str, hypervisor_id: &str) -> Result<Vdc> {
        let request = Request::post("v1/vdc").json(&json!({
            "name": name,
            "hypervisor": hypervisor_id,
            "project": project_id,
        }))?;
        required(self.client.execute_and_wait(request).await?, "v1/vdc")
    }

    /// Rename a VDC.
    pub async fn rename(&self, id: &str, name: &str) -> Result<Vdc> {
        let path = format!("v1/vdc/{}", id);
        let request = Request::put(&path).json(&json!({ "name": name }))?;
        required(self.client.execute_and_wait(request).await?, &path)
    }

    /// Delete a VDC.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/vdc/{}", id)))
            .await
    }
}

impl Resource for Vdcs {
    fn client(&self) -> &Client {
        &self.client
    }
}

//! Platform service templates and deployed services

use super::{Resource, required};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{PaasInput, PaasService, PaasServiceSpec, PaasTemplate},
};
use serde::Deserialize;

const TEMPLATES: &str = "v1/paas_template";
const SERVICES: &str = "v1/paas_service";

/// Platform services.
#[derive(Clone)]
pub struct Paas {
    client: Client,
}

#[derive(Deserialize)]
struct TemplateInputs {
    #[serde(default)]
    inputs: Vec<PaasInput>,
}

fn in_project(project_id: &str) -> Arguments {
    Arguments::new().with("project_id", project_id)
}

impl Paas {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Templates available to a project.
    pub async fn templates(&self, project_id: &str) -> Result<Vec<PaasTemplate>> {
        self.client.get_all_pages(TEMPLATES, in_project(project_id)).await
    }

    /// One template.
    pub async fn template(&self, id: i64, project_id: &str) -> Result<PaasTemplate> {
        self.client
            .get(&format!("{}/{}", TEMPLATES, id), in_project(project_id))
            .await
    }

    /// Inputs a template accepts on create.
    pub async fn template_inputs(&self, id: i64, project_id: &str) -> Result<Vec<PaasInput>> {
        let response: TemplateInputs = self
            .client
            .get(&format!("{}/{}/inputs", TEMPLATES, id), in_project(project_id))
            .await?;
        Ok(response.inputs)
    }

    /// Every deployed service.
    pub async fn services(&self, extra: Arguments) -> Result<Vec<PaasService>> {
        self.client.get_all_pages(SERVICES, extra).await
    }

    /// One service.
    pub async fn service(&self, id: &str) -> Result<PaasService> {
        self.client
            .get(&format!("{}/{}", SERVICES, id), Arguments::defaults())
            .await
    }

    /// Deploy a service from a template.
    pub async fn create_service(&self, spec: &PaasServiceSpec) -> Result<PaasService> {
        let request = Request::post(SERVICES).json(spec)?;
        required(self.client.execute_and_wait(request).await?, SERVICES)
    }

    /// Delete a service.
    pub async fn delete_service(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("{}/{}", SERVICES, id)))
            .await
    }
}

impl Resource for Paas {
    fn client(&self) -> &Client {
        &self.client
    }
}

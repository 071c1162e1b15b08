//! Platform services deployed from templates

use super::Reference;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A deployable service template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaasTemplate {
    /// Template id
    pub id: i64,
    /// Template name
    pub name: String,
    /// Human readable summary
    pub description: String,
}

/// One input a template accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaasInput {
    /// Input id
    pub id: i64,
    /// Key to use in [`PaasService::inputs`]
    pub name: String,
    /// Human readable summary
    pub description: String,
    /// Current value
    pub value: String,
    /// Must be set on create
    pub required: bool,
    /// Default value, of any JSON type
    pub default: Value,
    /// Free-form hints for presenting the input
    pub metadata: Map<String, Value>,
}

/// A deployed platform service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaasService {
    /// Service id
    pub id: String,
    /// Service name
    pub name: String,
    /// Owning project
    pub project: Option<Reference>,
    /// Deployment id, once deployed
    pub paas_deploy_id: Option<i64>,
    /// Template the service was created from
    pub paas_service_id: i64,
    /// Template name
    pub paas_service_name: String,
    /// Deployment status
    pub status: String,
    /// Id inside the platform
    pub paas_internal_id: String,
    /// Input values keyed by input name
    #[serde(rename = "paas_service_inputs")]
    pub inputs: Map<String, Value>,
    /// Busy with a server-side operation
    pub locked: bool,
}

/// A platform service to create.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaasServiceSpec {
    /// Service name
    pub name: String,
    /// Project id
    pub project: String,
    /// Template id
    pub paas_service_id: i64,
    /// Input values keyed by input name
    pub paas_service_inputs: Map<String, Value>,
}

impl PaasServiceSpec {
    /// A service from `template_id` with no inputs set yet.
    pub fn new(name: impl Into<String>, project: impl Into<String>, template_id: i64) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            paas_service_id: template_id,
            paas_service_inputs: Map::new(),
        }
    }

    /// Set one input.
    pub fn input(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.paas_service_inputs.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_decodes_inputs_and_missing_deploy() {
        let service: PaasService = serde_json::from_value(json!({
            "id": "svc-1",
            "name": "pg",
            "project": {"id": "prj-1", "name": "main"},
            "paas_service_id": 4,
            "paas_service_inputs": {"version": "16", "replicas": 2}
        }))
        .unwrap();

        assert_eq!(service.paas_deploy_id, None);
        assert_eq!(service.inputs["replicas"], json!(2));
        assert_eq!(service.project.unwrap().id, "prj-1");
    }

    #[test]
    fn test_input_default_keeps_json_type() {
        let input: PaasInput = serde_json::from_value(json!({
            "id": 1,
            "name": "replicas",
            "required": true,
            "default": 3,
            "metadata": {"min": 1}
        }))
        .unwrap();

        assert_eq!(input.default, json!(3));
        assert_eq!(input.metadata["min"], json!(1));
        assert!(input.value.is_empty());
    }
}

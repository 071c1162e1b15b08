//! Kubernetes clusters, templates and platforms

use super::{Resource, required, scoped};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{KubernetesCluster, KubernetesSpec, KubernetesTemplate, Platform, kubernetes::DashboardUrl, tag_names},
};
use serde::Serialize;

/// Managed Kubernetes.
#[derive(Clone)]
pub struct KubernetesClusters {
    client: Client,
}

#[derive(Serialize)]
struct CreateCluster<'a> {
    vdc: &'a str,
    #[serde(flatten)]
    spec: &'a KubernetesSpec,
}

#[derive(Serialize)]
struct UpdateCluster<'a> {
    name: &'a str,
    floating: Option<&'a str>,
    nodes_count: u32,
    node_ram: u32,
    node_cpu: u32,
    node_disk_size: u32,
    node_storage_profile: Option<&'a str>,
    user_public_key: &'a str,
    tags: Vec<&'a str>,
}

impl<'a> From<&'a KubernetesCluster> for UpdateCluster<'a> {
    fn from(cluster: &'a KubernetesCluster) -> Self {
        // An existing floating port is referenced by id; a new one by address
        let floating = cluster.floating.as_ref().and_then(|port| {
            if port.id.is_empty() {
                port.ip_address.as_deref()
            } else {
                Some(port.id.as_str())
            }
        });

        Self {
            name: &cluster.name,
            floating,
            nodes_count: cluster.nodes_count,
            node_ram: cluster.node_ram,
            node_cpu: cluster.node_cpu,
            node_disk_size: cluster.node_disk_size,
            node_storage_profile: cluster.node_storage_profile.as_ref().map(|p| p.id.as_str()),
            user_public_key: &cluster.user_public_key,
            tags: tag_names(&cluster.tags),
        }
    }
}

impl KubernetesClusters {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every cluster.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<KubernetesCluster>> {
        self.client.get_all_pages("v1/kubernetes", extra).await
    }

    /// Clusters of one VDC.
    pub async fn list_for_vdc(&self, vdc_id: &str, extra: Arguments) -> Result<Vec<KubernetesCluster>> {
        self.list(scoped("vdc", vdc_id, extra)).await
    }

    /// One cluster.
    pub async fn get(&self, id: &str) -> Result<KubernetesCluster> {
        self.client
            .get(&format!("v1/kubernetes/{}", id), Arguments::defaults())
            .await
    }

    /// Create a cluster and wait until its nodes are up.
    pub async fn create(&self, vdc_id: &str, spec: &KubernetesSpec) -> Result<KubernetesCluster> {
        let request = Request::post("v1/kubernetes").json(&CreateCluster { vdc: vdc_id, spec })?;
        required(self.client.execute_and_wait(request).await?, "v1/kubernetes")
    }

    /// Save a cluster's name, node sizing, key, tags and floating IP.
    pub async fn update(&self, cluster: &KubernetesCluster) -> Result<KubernetesCluster> {
        let path = format!("v1/kubernetes/{}", cluster.id);
        let request = Request::put(&path).json(&UpdateCluster::from(cluster))?;
        required(self.client.execute_and_wait(request).await?, &path)
    }

    /// Delete a cluster.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/kubernetes/{}", id)))
            .await
    }

    /// Dashboard URL, once the cluster has one.
    pub async fn dashboard_url(&self, id: &str) -> Result<Option<String>> {
        let dashboard: DashboardUrl = self
            .client
            .get(&format!("v1/kubernetes/{}/dashboard", id), Arguments::defaults())
            .await?;
        Ok(dashboard.url)
    }

    /// Kubeconfig of the cluster.
    pub async fn config(&self, id: &str) -> Result<String> {
        self.client
            .get(&format!("v1/kubernetes/{}/config", id), Arguments::defaults())
            .await
    }

    /// Wait until the cluster is no longer locked.
    pub async fn wait_unlocked(&self, id: &str) -> Result<()> {
        self.client.await_unlocked(&format!("v1/kubernetes/{}", id)).await
    }

    /// Cluster templates available in a VDC.
    pub async fn templates(&self, vdc_id: &str) -> Result<Vec<KubernetesTemplate>> {
        self.client
            .get_all_pages("v1/kubernetes_template", Arguments::from([("vdc", vdc_id)]))
            .await
    }

    /// One cluster template.
    pub async fn template(&self, id: &str) -> Result<KubernetesTemplate> {
        self.client
            .get(&format!("v1/kubernetes_template/{}", id), Arguments::defaults())
            .await
    }

    /// Node platforms available in a VDC. This endpoint is not paginated.
    pub async fn platforms(&self, vdc_id: &str) -> Result<Vec<Platform>> {
        self.client
            .get("v1/platform", Arguments::from([("vdc", vdc_id)]))
            .await
    }

    /// One node platform.
    pub async fn platform(&self, id: &str) -> Result<Platform> {
        self.client
            .get(&format!("v1/platform/{}", id), Arguments::defaults())
            .await
    }
}

impl Resource for KubernetesClusters {
    fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Port, Reference, Tag};
    use serde_json::json;

    #[test]
    fn test_update_payload_floating_by_id_or_address() {
        let mut cluster = KubernetesCluster {
            name: "k8s".into(),
            nodes_count: 3,
            node_storage_profile: Some(Reference::new("sp-1")),
            tags: vec![Tag {
                id: "t1".into(),
                name: "prod".into(),
            }],
            floating: Some(Port {
                id: "fip-1".into(),
                ip_address: Some("1.2.3.4".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(UpdateCluster::from(&cluster)).unwrap();
        assert_eq!(json["floating"], "fip-1");
        assert_eq!(json["node_storage_profile"], "sp-1");
        assert_eq!(json["tags"], json!(["prod"]));
        assert_eq!(json["nodes_count"], 3);

        cluster.floating = Some(Port {
            ip_address: Some("RANDOM_FIP".into()),
            ..Default::default()
        });
        let json = serde_json::to_value(UpdateCluster::from(&cluster)).unwrap();
        assert_eq!(json["floating"], "RANDOM_FIP");

        cluster.floating = None;
        let json = serde_json::to_value(UpdateCluster::from(&cluster)).unwrap();
        assert_eq!(json["floating"], json!(null));
    }
}

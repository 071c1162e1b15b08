//! Networks, subnets and ports

use super::{Resource, required, scoped};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{Network, Port, PortSpec, Subnet},
};
use serde::Serialize;
use serde_json::json;

/// Private networks.
#[derive(Clone)]
pub struct Networks {
    client: Client,
}

impl Networks {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every network.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<Network>> {
        let mut networks: Vec<Network> = self.client.get_all_pages("v1/network", extra).await?;
        networks.iter_mut().for_each(adopt_subnets);
        Ok(networks)
    }

    /// Networks of one VDC.
    pub async fn list_for_vdc(&self, vdc_id: &str, extra: Arguments) -> Result<Vec<Network>> {
        self.list(scoped("vdc", vdc_id, extra)).await
    }

    /// One network, with its subnets.
    pub async fn get(&self, id: &str) -> Result<Network> {
        let mut network: Network = self
            .client
            .get(&format!("v1/network/{}", id), Arguments::defaults())
            .await?;
        adopt_subnets(&mut network);
        Ok(network)
    }

    /// Create a network in a VDC.
    pub async fn create(&self, vdc_id: &str, name: &str) -> Result<Network> {
        let request = Request::post("v1/network").json(&json!({
            "name": name,
            "vdc": vdc_id,
        }))?;
        let mut network: Network = required(self.client.execute_and_wait(request).await?, "v1/network")?;
        adopt_subnets(&mut network);
        Ok(network)
    }

    /// Rename a network.
    pub async fn rename(&self, id: &str, name: &str) -> Result<Network> {
        let path = format!("v1/network/{}", id);
        let request = Request::put(&path).json(&json!({ "name": name }))?;
        let mut network: Network = required(self.client.execute_and_wait(request).await?, &path)?;
        adopt_subnets(&mut network);
        Ok(network)
    }

    /// Delete a network.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/network/{}", id)))
            .await
    }

    /// Wait until the network is no longer locked.
    pub async fn wait_unlocked(&self, id: &str) -> Result<()> {
        self.client.await_unlocked(&format!("v1/network/{}", id)).await
    }
}

impl Resource for Networks {
    fn client(&self) -> &Client {
        &self.client
    }
}

fn adopt_subnets(network: &mut Network) {
    for subnet in &mut network.subnets {
        subnet.network_id = network.id.clone();
    }
}

/// Subnets of one network.
#[derive(Clone)]
pub struct Subnets {
    client: Client,
    network_id: String,
}

impl Subnets {
    pub(crate) fn new(client: Client, network_id: String) -> Self {
        Self { client, network_id }
    }

    /// The network these subnets belong to.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    fn collection(&self) -> String {
        format!("v1/network/{}/subnet", self.network_id)
    }

    fn item(&self, id: &str) -> String {
        format!("v1/network/{}/subnet/{}", self.network_id, id)
    }

    fn adopt(&self, mut subnet: Subnet) -> Subnet {
        subnet.network_id = self.network_id.clone();
        subnet
    }

    /// Every subnet of the network.
    pub async fn list(&self) -> Result<Vec<Subnet>> {
        let subnets: Vec<Subnet> = self
            .client
            .get_all_pages(&self.collection(), Arguments::defaults())
            .await?;
        Ok(subnets.into_iter().map(|s| self.adopt(s)).collect())
    }

    /// Create a subnet.
    pub async fn create(&self, subnet: &Subnet) -> Result<Subnet> {
        let path = self.collection();
        let request = Request::post(&path).json(subnet)?;
        let created = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(created))
    }

    /// Replace a subnet's settings: DHCP, DNS servers and routes.
    pub async fn update(&self, subnet: &Subnet) -> Result<Subnet> {
        let path = self.item(&subnet.id);
        let request = Request::put(&path).json(subnet)?;
        let updated = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(updated))
    }

    /// Delete a subnet.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(self.item(id)))
            .await
    }

    /// Wait until the subnet is no longer locked.
    pub async fn wait_unlocked(&self, id: &str) -> Result<()> {
        self.client.await_unlocked(&self.item(id)).await
    }
}

impl Resource for Subnets {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Network ports.
#[derive(Clone)]
pub struct Ports {
    client: Client,
}

/// A port attached to a VM or a router.
#[derive(Serialize)]
struct AttachPort<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    vm: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    router: Option<&'a str>,
    #[serde(flatten)]
    spec: &'a PortSpec,
}

impl Ports {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Ports in a VDC.
    pub async fn list_for_vdc(&self, vdc_id: &str, extra: Arguments) -> Result<Vec<Port>> {
        self.client
            .get_all_pages("v1/port", scoped("vdc", vdc_id, extra))
            .await
    }

    /// Add a port to a VM.
    pub async fn create_for_vm(&self, vm_id: &str, spec: &PortSpec) -> Result<Port> {
        let request = Request::post("v1/port").json(&AttachPort {
            vm: Some(vm_id),
            router: None,
            spec,
        })?;
        required(self.client.execute_and_wait(request).await?, "v1/port")
    }

    /// Connect a router to a network. With `existing_port_id` the port is
    /// re-pointed at the router instead of created.
    pub async fn connect_router(
        &self,
        router_id: &str,
        spec: &PortSpec,
        existing_port_id: Option<&str>,
    ) -> Result<Port> {
        let payload = AttachPort {
            vm: None,
            router: Some(router_id),
            spec,
        };
        let (request, path) = match existing_port_id {
            Some(id) => {
                let path = format!("v1/port/{}", id);
                (Request::put(&path).json(&payload)?, path)
            }
            None => (Request::post("v1/port").json(&payload)?, "v1/port".to_string()),
        };
        required(self.client.execute_and_wait(request).await?, &path)
    }

    /// Replace the firewall templates applied to a port.
    pub async fn update_firewall(&self, port_id: &str, template_ids: &[&str]) -> Result<()> {
        let request = Request::put(format!("v1/port/{}", port_id))
            .json(&json!({ "fw_templates": template_ids }))?;
        self.client.execute_unit_and_wait(request).await
    }

    /// Disconnect a port from its router or VM without deleting it.
    pub async fn disconnect(&self, port_id: &str) -> Result<()> {
        let request = Request::patch(format!("v1/port/{}/disconnect", port_id)).json(&json!({}))?;
        self.client.execute_unit_and_wait(request).await
    }

    /// Delete a port.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/port/{}", id)))
            .await
    }
}

impl Resource for Ports {
    fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attach_port_payload() {
        let spec = PortSpec::new("net-1").firewall_template("fw-1");
        let payload = AttachPort {
            vm: None,
            router: Some("r1"),
            spec: &spec,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"router": "r1", "network": "net-1", "fw_templates": ["fw-1"]})
        );
    }

    #[test]
    fn test_adopt_subnets() {
        let mut network = Network {
            id: "n1".into(),
            subnets: vec![Subnet::default(), Subnet::default()],
            ..Default::default()
        };
        adopt_subnets(&mut network);
        assert!(network.subnets.iter().all(|s| s.network_id == "n1"));
    }
}

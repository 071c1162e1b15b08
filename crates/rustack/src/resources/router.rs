//! Routers and static routes

use super::{Resource, required, scoped};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{Port, Reference, Route, Router, RouterFirewallRule, RouterPortSpec, RouterSpec},
};
use serde::Serialize;
use serde_json::json;

/// The API assigns a random public address to every new router.
const RANDOM_FLOATING: &str = "RANDOM_FIP";

/// Virtual routers.
#[derive(Clone)]
pub struct Routers {
    client: Client,
}

#[derive(Serialize)]
struct CreateRouter<'a> {
    name: &'a str,
    vdc: &'a str,
    ports: &'a [RouterPortSpec],
    floating: &'a str,
}

#[derive(Serialize)]
struct UpdateRouter<'a> {
    id: &'a str,
    name: &'a str,
    is_default: bool,
    vdc: Option<&'a Reference>,
    ports: &'a [Port],
    floating: Option<&'a str>,
}

impl Routers {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every router.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<Router>> {
        self.client.get_all_pages("v1/router", extra).await
    }

    /// Routers of one VDC.
    pub async fn list_for_vdc(&self, vdc_id: &str, extra: Arguments) -> Result<Vec<Router>> {
        self.list(scoped("vdc", vdc_id, extra)).await
    }

    /// One router.
    pub async fn get(&self, id: &str) -> Result<Router> {
        self.client
            .get(&format!("v1/router/{}", id), Arguments::defaults())
            .await
    }

    /// Create a router connected to the given networks.
    pub async fn create(&self, vdc_id: &str, spec: &RouterSpec) -> Result<Router> {
        let request = Request::post("v1/router").json(&CreateRouter {
            name: &spec.name,
            vdc: vdc_id,
            ports: &spec.ports,
            floating: RANDOM_FLOATING,
        })?;
        required(self.client.execute_and_wait(request).await?, "v1/router")
    }

    /// Save a router's name, ports and floating IP. Waits for any running
    /// operation on the router to finish first.
    pub async fn update(&self, router: &Router) -> Result<Router> {
        let path = format!("v1/router/{}", router.id);
        self.client.await_unlocked(&path).await?;

        let request = Request::put(&path).json(&UpdateRouter {
            id: &router.id,
            name: &router.name,
            is_default: router.is_default,
            vdc: router.vdc.as_ref(),
            ports: &router.ports,
            floating: router.floating.as_ref().map(|f| f.id.as_str()),
        })?;
        required(self.client.execute_and_wait(request).await?, &path)
    }

    /// Delete a router.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/router/{}", id)))
            .await
    }

    /// Wait until the router is no longer locked.
    pub async fn wait_unlocked(&self, id: &str) -> Result<()> {
        self.client.await_unlocked(&format!("v1/router/{}", id)).await
    }
}

impl Resource for Routers {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Static routes of one router.
#[derive(Clone)]
pub struct Routes {
    client: Client,
    router_id: String,
}

impl Routes {
    pub(crate) fn new(client: Client, router_id: String) -> Self {
        Self { client, router_id }
    }

    /// The router these routes belong to.
    pub fn router_id(&self) -> &str {
        &self.router_id
    }

    fn collection(&self) -> String {
        format!("v1/router/{}/route", self.router_id)
    }

    fn item(&self, id: &str) -> String {
        format!("v1/router/{}/route/{}", self.router_id, id)
    }

    fn adopt(&self, mut route: Route) -> Route {
        route.router_id = self.router_id.clone();
        route
    }

    /// One route.
    pub async fn get(&self, id: &str) -> Result<Route> {
        let route = self.client.get(&self.item(id), Arguments::defaults()).await?;
        Ok(self.adopt(route))
    }

    /// Add a route.
    pub async fn create(&self, destination: &str, nexthop: &str) -> Result<Route> {
        let path = self.collection();
        let request = Request::post(&path).json(&json!({
            "destination": destination,
            "nexthop": nexthop,
        }))?;
        let route = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(route))
    }

    /// Save a route's destination and next hop.
    pub async fn update(&self, route: &Route) -> Result<Route> {
        let path = self.item(&route.id);
        let request = Request::put(&path).json(route)?;
        let route = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(route))
    }

    /// Delete a route.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(self.item(id)))
            .await
    }

    /// Wait until the route is no longer locked.
    pub async fn wait_unlocked(&self, id: &str) -> Result<()> {
        self.client.await_unlocked(&self.item(id)).await
    }
}

impl Resource for Routes {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Firewall rules of one router.
#[derive(Clone)]
pub struct RouterFirewallRules {
    client: Client,
    router_id: String,
}

/// Create payload. Port ranges are only sent for `tcp` and `udp`.
#[derive(Serialize)]
struct CreateRouterRule<'a> {
    name: &'a str,
    protocol: &'a str,
    direction: &'a str,
    destination_ip: &'a str,
    dst_port_range_max: Option<u16>,
    dst_port_range_min: Option<u16>,
    source_ip: &'a str,
    src_port_range_max: Option<u16>,
    src_port_range_min: Option<u16>,
}

impl<'a> From<&'a RouterFirewallRule> for CreateRouterRule<'a> {
    fn from(rule: &'a RouterFirewallRule) -> Self {
        let ports = rule.has_ports();
        Self {
            name: &rule.name,
            protocol: &rule.protocol,
            direction: &rule.direction,
            destination_ip: &rule.destination_ip,
            dst_port_range_max: rule.dst_port_range_max.filter(|_| ports),
            dst_port_range_min: rule.dst_port_range_min.filter(|_| ports),
            source_ip: &rule.source_ip,
            src_port_range_max: rule.src_port_range_max.filter(|_| ports),
            src_port_range_min: rule.src_port_range_min.filter(|_| ports),
        }
    }
}

impl RouterFirewallRules {
    pub(crate) fn new(client: Client, router_id: String) -> Self {
        Self { client, router_id }
    }

    /// The router these rules belong to.
    pub fn router_id(&self) -> &str {
        &self.router_id
    }

    fn collection(&self) -> String {
        format!("v1/router/{}/firewall_rule", self.router_id)
    }

    fn item(&self, id: &str) -> String {
        format!("v1/router/{}/firewall_rule/{}", self.router_id, id)
    }

    fn adopt(&self, mut rule: RouterFirewallRule) -> RouterFirewallRule {
        rule.router_id = self.router_id.clone();
        rule
    }

    /// Every rule of the router. This endpoint is not paginated.
    pub async fn list(&self) -> Result<Vec<RouterFirewallRule>> {
        let rules: Vec<RouterFirewallRule> = self
            .client
            .get(&self.collection(), Arguments::defaults())
            .await?;
        Ok(rules.into_iter().map(|r| self.adopt(r)).collect())
    }

    /// One rule.
    pub async fn get(&self, id: &str) -> Result<RouterFirewallRule> {
        let rule = self.client.get(&self.item(id), Arguments::defaults()).await?;
        Ok(self.adopt(rule))
    }

    /// Add a rule.
    pub async fn create(&self, rule: &RouterFirewallRule) -> Result<RouterFirewallRule> {
        let path = self.collection();
        let request = Request::post(&path).json(&CreateRouterRule::from(rule))?;
        let created = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(created))
    }

    /// Save a rule as is.
    pub async fn update(&self, rule: &RouterFirewallRule) -> Result<RouterFirewallRule> {
        let path = self.item(&rule.id);
        let request = Request::put(&path).json(rule)?;
        let updated = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(updated))
    }

    /// Delete a rule.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(self.item(id)))
            .await
    }

    /// Wait until the rule is no longer locked.
    pub async fn wait_unlocked(&self, id: &str) -> Result<()> {
        self.client.await_unlocked(&self.item(id)).await
    }
}

impl Resource for RouterFirewallRules {
    fn client(&self) -> &Client {
        &self.client
    }
}

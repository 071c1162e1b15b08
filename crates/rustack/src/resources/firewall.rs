//! Firewall templates, their rules, and floating IPs

use super::{Resource, required};
use crate::{
    args::Arguments,
    client::Client,
    error::{Error, Result},
    http::Request,
    types::{FirewallRule, FirewallTemplate, Floating},
};
use serde::Serialize;

/// Firewall templates.
#[derive(Clone)]
pub struct FirewallTemplates {
    client: Client,
}

impl FirewallTemplates {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Templates available in a VDC.
    pub async fn list(&self, vdc_id: &str) -> Result<Vec<FirewallTemplate>> {
        self.client
            .get_all_pages("v1/firewall", Arguments::from([("vdc", vdc_id)]))
            .await
    }

    /// One template.
    pub async fn get(&self, id: &str) -> Result<FirewallTemplate> {
        self.client
            .get(&format!("v1/firewall/{}", id), Arguments::defaults())
            .await
    }
}

impl Resource for FirewallTemplates {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Rules of one firewall template.
#[derive(Clone)]
pub struct FirewallRules {
    client: Client,
    template_id: String,
}

/// Create payload. Port ranges are only sent for `tcp` and `udp`.
#[derive(Serialize)]
struct CreateRule<'a> {
    name: &'a str,
    destination_ip: &'a str,
    direction: &'a str,
    dst_port_range_max: Option<u16>,
    dst_port_range_min: Option<u16>,
    protocol: &'a str,
}

impl<'a> From<&'a FirewallRule> for CreateRule<'a> {
    fn from(rule: &'a FirewallRule) -> Self {
        let ports = rule.has_ports();
        Self {
            name: &rule.name,
            destination_ip: &rule.destination_ip,
            direction: &rule.direction,
            dst_port_range_max: rule.dst_port_range_max.filter(|_| ports),
            dst_port_range_min: rule.dst_port_range_min.filter(|_| ports),
            protocol: &rule.protocol,
        }
    }
}

impl FirewallRules {
    pub(crate) fn new(client: Client, template_id: String) -> Self {
        Self {
            client,
            template_id,
        }
    }

    /// The template these rules belong to.
    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    fn collection(&self) -> String {
        format!("v1/firewall/{}/rule", self.template_id)
    }

    fn item(&self, id: &str) -> String {
        format!("v1/firewall/{}/rule/{}", self.template_id, id)
    }

    fn adopt(&self, mut rule: FirewallRule) -> FirewallRule {
        rule.template_id = self.template_id.clone();
        rule
    }

    /// Every rule of the template. This endpoint is not paginated.
    pub async fn list(&self) -> Result<Vec<FirewallRule>> {
        let rules: Vec<FirewallRule> = self
            .client
            .get(&self.collection(), Arguments::defaults())
            .await?;
        Ok(rules.into_iter().map(|r| self.adopt(r)).collect())
    }

    /// One rule.
    pub async fn get(&self, id: &str) -> Result<FirewallRule> {
        let rule = self.client.get(&self.item(id), Arguments::defaults()).await?;
        Ok(self.adopt(rule))
    }

    /// Add a rule.
    pub async fn create(&self, rule: &FirewallRule) -> Result<FirewallRule> {
        let path = self.collection();
        let request = Request::post(&path).json(&CreateRule::from(rule))?;
        let created = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(created))
    }

    /// Save a rule as is.
    pub async fn update(&self, rule: &FirewallRule) -> Result<FirewallRule> {
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

impl Resource for FirewallRules {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Floating (public) IPs.
#[derive(Clone)]
pub struct Floatings {
    client: Client,
}

impl Floatings {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// One floating IP.
    pub async fn get(&self, id: &str) -> Result<Floating> {
        self.client
            .get(&format!("v1/floating/{}", id), Arguments::defaults())
            .await
    }

    /// The floating IP of a VDC with the given address.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when no external port of the VDC has that address.
    pub async fn find_by_address(&self, vdc_id: &str, address: &str) -> Result<Floating> {
        let args = Arguments::from([("vdc", vdc_id), ("filter_type", "external")]);
        let floatings: Vec<Floating> = self.client.get_all_pages("v1/port", args).await?;

        floatings
            .into_iter()
            .find(|f| f.ip_address.as_deref() == Some(address))
            .ok_or_else(|| Error::NotFound(format!("floating IP {} in VDC {}", address, vdc_id)))
    }
}

impl Resource for Floatings {
    fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_rule_drops_ports_for_icmp() {
        let mut rule = FirewallRule::new("ping", "0.0.0.0/0", "ingress", "icmp", None);
        rule.dst_port_range_max = Some(80);

        let json = serde_json::to_value(CreateRule::from(&rule)).unwrap();
        assert_eq!(json["dst_port_range_max"], json!(null));
        assert_eq!(json["protocol"], "icmp");
    }

    #[test]
    fn test_create_rule_keeps_ports_for_tcp() {
        let rule = FirewallRule::new("web", "0.0.0.0/0", "ingress", "tcp", Some((80, 443)));
        let json = serde_json::to_value(CreateRule::from(&rule)).unwrap();
        assert_eq!(json["dst_port_range_min"], 80);
        assert_eq!(json["dst_port_range_max"], 443);
    }
}

//! Networks, subnets, ports, routers, firewalls and floating IPs

use super::Reference;
use serde::{Deserialize, Serialize};

/// Private network inside a VDC.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Network {
    /// Network id
    pub id: String,
    /// Network name
    pub name: String,
    /// Created with the VDC
    pub is_default: bool,
    /// Owning VDC
    pub vdc: Option<Reference>,
    /// Busy with a server-side operation
    pub locked: bool,
    /// Subnets, as embedded in the network object
    pub subnets: Vec<Subnet>,
}

/// A DNS server handed out by a subnet's DHCP.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubnetDnsServer {
    /// Server address
    pub dns_server: String,
}

/// A static route handed out by a subnet's DHCP.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SubnetRoute {
    /// Destination CIDR
    pub cidr: String,
    /// Next hop
    pub gateway: String,
    /// Route metric
    pub metric: u32,
}

/// An address range of a network.
///
/// The same shape is sent on create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Subnet {
    /// Subnet id; empty before creation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Address range, e.g. `10.0.0.0/24`
    pub cidr: String,
    /// Gateway address
    pub gateway: String,
    /// First DHCP address
    pub start_ip: String,
    /// Last DHCP address
    pub end_ip: String,
    /// DHCP enabled
    pub enable_dhcp: bool,
    /// DNS servers for DHCP clients
    pub dns_servers: Vec<SubnetDnsServer>,
    /// Static routes for DHCP clients
    pub subnet_routes: Vec<SubnetRoute>,
    /// Busy with a server-side operation
    #[serde(skip_serializing)]
    pub locked: bool,
    /// Network the subnet belongs to
    #[serde(skip)]
    pub network_id: String,
}

impl Subnet {
    /// A subnet to create, with no DNS servers or routes yet.
    pub fn new(
        cidr: impl Into<String>,
        gateway: impl Into<String>,
        start_ip: impl Into<String>,
        end_ip: impl Into<String>,
        enable_dhcp: bool,
    ) -> Self {
        Self {
            cidr: cidr.into(),
            gateway: gateway.into(),
            start_ip: start_ip.into(),
            end_ip: end_ip.into(),
            enable_dhcp,
            ..Default::default()
        }
    }
}

/// A network attachment of a VM, router or load balancer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Port {
    /// Port id
    pub id: String,
    /// Assigned address
    pub ip_address: Option<String>,
    /// Network the port is on
    pub network: Option<Reference>,
    /// Firewall templates applied to the port
    #[serde(rename = "fw_templates")]
    pub firewall_templates: Vec<Reference>,
}

/// A port to create.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PortSpec {
    /// Network id
    pub network: String,
    /// Fixed address; the API picks one when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Firewall template ids
    pub fw_templates: Vec<String>,
}

impl PortSpec {
    /// A port on `network` with an automatic address and no firewall.
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            ip_address: None,
            fw_templates: Vec::new(),
        }
    }

    /// Request a fixed address.
    pub fn ip_address(mut self, address: impl Into<String>) -> Self {
        self.ip_address = Some(address.into());
        self
    }

    /// Apply a firewall template.
    pub fn firewall_template(mut self, template_id: impl Into<String>) -> Self {
        self.fw_templates.push(template_id.into());
        self
    }
}

/// Virtual router.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Router {
    /// Router id
    pub id: String,
    /// Router name
    pub name: String,
    /// Created with the VDC
    pub is_default: bool,
    /// Owning VDC
    pub vdc: Option<Reference>,
    /// Connected ports
    pub ports: Vec<Port>,
    /// Floating IP port
    pub floating: Option<Port>,
    /// Busy with a server-side operation
    pub locked: bool,
}

/// A router to create. The API assigns a random floating IP.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouterSpec {
    /// Router name
    pub name: String,
    /// Networks to connect
    pub ports: Vec<RouterPortSpec>,
}

impl RouterSpec {
    /// A router with no ports yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: Vec::new(),
        }
    }

    /// Connect a network, optionally at a fixed address.
    pub fn port(mut self, network: impl Into<String>, ip_address: Option<String>) -> Self {
        self.ports.push(RouterPortSpec {
            network: network.into(),
            ip_address,
        });
        self
    }
}

/// A router port to create.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouterPortSpec {
    /// Network id
    pub network: String,
    /// Fixed address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

/// A static route on a router.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Route {
    /// Route id
    #[serde(skip_serializing)]
    pub id: String,
    /// Destination CIDR
    pub destination: String,
    /// Next hop address
    pub nexthop: String,
    /// Router the route belongs to
    #[serde(skip)]
    pub router_id: String,
}

/// A named set of firewall rules applied to ports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FirewallTemplate {
    /// Template id
    pub id: String,
    /// Template name
    pub name: String,
}

/// One rule of a firewall template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FirewallRule {
    /// Rule id; empty before creation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Rule name
    pub name: String,
    /// Destination address or CIDR
    pub destination_ip: String,
    /// `ingress` or `egress`
    pub direction: String,
    /// Upper destination port
    pub dst_port_range_max: Option<u16>,
    /// Lower destination port
    pub dst_port_range_min: Option<u16>,
    /// `tcp`, `udp`, `icmp` or `any`
    pub protocol: String,
    /// Busy with a server-side operation
    #[serde(skip_serializing)]
    pub locked: bool,
    /// Firewall template the rule belongs to
    #[serde(skip)]
    pub template_id: String,
}

impl FirewallRule {
    /// A rule to create.
    pub fn new(
        name: impl Into<String>,
        destination_ip: impl Into<String>,
        direction: impl Into<String>,
        protocol: impl Into<String>,
        dst_port_range: Option<(u16, u16)>,
    ) -> Self {
        let (min, max) = dst_port_range.unzip();
        Self {
            name: name.into(),
            destination_ip: destination_ip.into(),
            direction: direction.into(),
            protocol: protocol.into(),
            dst_port_range_min: min,
            dst_port_range_max: max,
            ..Default::default()
        }
    }

    /// Only `tcp` and `udp` rules carry a port range.
    pub fn has_ports(&self) -> bool {
        matches!(self.protocol.as_str(), "tcp" | "udp")
    }
}

/// A filtering rule applied directly on a router.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterFirewallRule {
    /// Rule id; empty before creation
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Rule name
    pub name: String,
    /// `ingress` or `egress`
    pub direction: String,
    /// `tcp`, `udp`, `icmp` or `any`
    pub protocol: String,
    /// Destination address or CIDR
    pub destination_ip: String,
    /// Upper destination port
    pub dst_port_range_max: Option<u16>,
    /// Lower destination port
    pub dst_port_range_min: Option<u16>,
    /// Source address or CIDR
    pub source_ip: String,
    /// Upper source port
    pub src_port_range_max: Option<u16>,
    /// Lower source port
    pub src_port_range_min: Option<u16>,
    /// Busy with a server-side operation
    #[serde(skip_serializing)]
    pub locked: bool,
    /// Router the rule belongs to
    #[serde(skip)]
    pub router_id: String,
}

impl RouterFirewallRule {
    /// A rule to create. Port ranges are `(min, max)`.
    pub fn new(
        name: impl Into<String>,
        protocol: impl Into<String>,
        direction: impl Into<String>,
        destination_ip: impl Into<String>,
        dst_port_range: Option<(u16, u16)>,
        source_ip: impl Into<String>,
        src_port_range: Option<(u16, u16)>,
    ) -> Self {
        let (dst_min, dst_max) = dst_port_range.unzip();
        let (src_min, src_max) = src_port_range.unzip();
        Self {
            name: name.into(),
            protocol: protocol.into(),
            direction: direction.into(),
            destination_ip: destination_ip.into(),
            dst_port_range_min: dst_min,
            dst_port_range_max: dst_max,
            source_ip: source_ip.into(),
            src_port_range_min: src_min,
            src_port_range_max: src_max,
            ..Default::default()
        }
    }

    /// Only `tcp` and `udp` rules carry port ranges.
    pub fn has_ports(&self) -> bool {
        matches!(self.protocol.as_str(), "tcp" | "udp")
    }
}

/// A public address bound to a port.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Floating {
    /// Port id of the floating IP
    pub id: String,
    /// The public address
    pub ip_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subnet_update_payload_omits_local_fields() {
        let mut subnet = Subnet::new("10.0.0.0/24", "10.0.0.1", "10.0.0.2", "10.0.0.254", true);
        subnet.id = "s1".into();
        subnet.network_id = "n1".into();
        subnet.locked = true;

        let json = serde_json::to_value(&subnet).unwrap();
        assert_eq!(json["id"], "s1");
        assert_eq!(json["enable_dhcp"], true);
        assert!(json.get("network_id").is_none());
        assert!(json.get("locked").is_none());
    }

    #[test]
    fn test_new_subnet_has_no_id() {
        let subnet = Subnet::new("10.0.0.0/24", "10.0.0.1", "10.0.0.2", "10.0.0.254", false);
        let json = serde_json::to_value(&subnet).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["dns_servers"], json!([]));
    }

    #[test]
    fn test_port_spec_skips_unset_address() {
        let json = serde_json::to_value(PortSpec::new("n1").firewall_template("fw-1")).unwrap();
        assert_eq!(json, json!({"network": "n1", "fw_templates": ["fw-1"]}));
    }

    #[test]
    fn test_firewall_rule_port_range() {
        let rule = FirewallRule::new("ssh", "0.0.0.0/0", "ingress", "tcp", Some((22, 22)));
        assert!(rule.has_ports());
        assert_eq!(rule.dst_port_range_min, Some(22));

        let icmp = FirewallRule::new("ping", "0.0.0.0/0", "ingress", "icmp", None);
        assert!(!icmp.has_ports());
        assert_eq!(icmp.dst_port_range_max, None);
    }
}

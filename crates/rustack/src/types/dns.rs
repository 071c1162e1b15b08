//! DNS zones and records

use super::Reference;
use serde::{Deserialize, Serialize};

/// A hosted DNS zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Dns {
    /// Zone id
    pub id: String,
    /// Zone name, with trailing dot
    pub name: String,
    /// Owning project
    pub project: Option<Reference>,
}

/// A resource record in a zone.
///
/// `flag` and `tag` only apply to `CAA`; `priority` to `MX` and `SRV`;
/// `weight` and `port` to `SRV`. See [`DnsRecord::payload`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DnsRecord {
    /// Record id
    pub id: String,
    /// Record value
    pub data: String,
    /// CAA flag
    pub flag: u8,
    /// Owner name
    pub host: String,
    /// SRV port
    pub port: u16,
    /// MX/SRV priority
    pub priority: u16,
    /// CAA tag
    pub tag: String,
    /// TTL, seconds
    pub ttl: u32,
    /// Record type: `A`, `AAAA`, `CNAME`, `MX`, `TXT`, `NS`, `SRV`, `CAA`
    #[serde(rename = "type")]
    pub kind: String,
    /// SRV weight
    pub weight: u16,
    /// Zone the record belongs to
    #[serde(skip)]
    pub dns_id: String,
}

/// Wire form of a record for create and update.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct DnsRecordPayload<'a> {
    data: &'a str,
    flag: u8,
    host: &'a str,
    port: Option<u16>,
    priority: Option<u16>,
    tag: Option<&'a str>,
    ttl: u32,
    #[serde(rename = "type")]
    kind: &'a str,
    weight: Option<u16>,
}

impl DnsRecord {
    /// A record to create. Type-specific fields start at zero.
    pub fn new(
        kind: impl Into<String>,
        host: impl Into<String>,
        data: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            kind: kind.into(),
            host: host.into(),
            data: data.into(),
            ttl,
            ..Default::default()
        }
    }

    /// The request body: type-specific fields are null unless the type uses
    /// them, and `flag` is zero outside `CAA`.
    pub(crate) fn payload(&self) -> DnsRecordPayload<'_> {
        let mut payload = DnsRecordPayload {
            data: &self.data,
            flag: 0,
            host: &self.host,
            port: None,
            priority: None,
            tag: None,
            ttl: self.ttl,
            kind: &self.kind,
            weight: None,
        };

        match self.kind.as_str() {
            "CAA" => {
                payload.tag = Some(&self.tag);
                payload.flag = self.flag;
            }
            "MX" => payload.priority = Some(self.priority),
            "SRV" => {
                payload.priority = Some(self.priority);
                payload.weight = Some(self.weight);
                payload.port = Some(self.port);
            }
            _ => {}
        }

        payload
    }
}

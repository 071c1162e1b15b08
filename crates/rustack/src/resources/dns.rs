//! DNS zones and records

use super::{Resource, required, scoped};
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    http::Request,
    types::{Dns, DnsRecord},
};
use serde_json::json;

/// DNS zones.
#[derive(Clone)]
pub struct DnsZones {
    client: Client,
}

impl DnsZones {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every zone.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<Dns>> {
        self.client.get_all_pages("v1/dns", extra).await
    }

    /// Zones of one project.
    pub async fn list_for_project(&self, project_id: &str, extra: Arguments) -> Result<Vec<Dns>> {
        self.list(scoped("project", project_id, extra)).await
    }

    /// One zone.
    pub async fn get(&self, id: &str) -> Result<Dns> {
        self.client
            .get(&format!("v1/dns/{}", id), Arguments::defaults())
            .await
    }

    /// Create a zone in a project.
    pub async fn create(&self, project_id: &str, name: &str) -> Result<Dns> {
        let request = Request::post("v1/dns").json(&json!({
            "name": name,
            "project": project_id,
        }))?;
        required(self.client.execute_and_wait(request).await?, "v1/dns")
    }

    /// Delete a zone.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(format!("v1/dns/{}", id)))
            .await
    }

    /// Records of one zone.
    pub fn records(&self, dns_id: impl Into<String>) -> DnsRecords {
        DnsRecords::new(self.client.clone(), dns_id.into())
    }
}

impl Resource for DnsZones {
    fn client(&self) -> &Client {
        &self.client
    }
}

/// Records of one DNS zone.
#[derive(Clone)]
pub struct DnsRecords {
    client: Client,
    dns_id: String,
}

impl DnsRecords {
    pub(crate) fn new(client: Client, dns_id: String) -> Self {
        Self { client, dns_id }
    }

    /// The zone these records belong to.
    pub fn dns_id(&self) -> &str {
        &self.dns_id
    }

    fn item(&self, id: &str) -> String {
        format!("v1/dns/{}/record/{}", self.dns_id, id)
    }

    fn adopt(&self, mut record: DnsRecord) -> DnsRecord {
        record.dns_id = self.dns_id.clone();
        record
    }

    /// Every record of the zone.
    pub async fn list(&self) -> Result<Vec<DnsRecord>> {
        // Listing lives under a different segment than single records
        let path = format!("v1/dns/{}/dns_record", self.dns_id);
        let records: Vec<DnsRecord> = self
            .client
            .get_all_pages(&path, Arguments::defaults())
            .await?;
        Ok(records.into_iter().map(|r| self.adopt(r)).collect())
    }

    /// One record.
    pub async fn get(&self, id: &str) -> Result<DnsRecord> {
        let record = self.client.get(&self.item(id), Arguments::defaults()).await?;
        Ok(self.adopt(record))
    }

    /// Add a record.
    pub async fn create(&self, record: &DnsRecord) -> Result<DnsRecord> {
        let path = format!("v1/dns/{}/record", self.dns_id);
        let request = Request::post(&path).json(&record.payload())?;
        let created = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(created))
    }

    /// Save a record.
    pub async fn update(&self, record: &DnsRecord) -> Result<DnsRecord> {
        let path = self.item(&record.id);
        let request = Request::put(&path).json(&record.payload())?;
        let updated = required(self.client.execute_and_wait(request).await?, &path)?;
        Ok(self.adopt(updated))
    }

    /// Delete a record.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .execute_unit_and_wait(Request::delete(self.item(id)))
            .await
    }
}

impl Resource for DnsRecords {
    fn client(&self) -> &Client {
        &self.client
    }
}

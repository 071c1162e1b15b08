//! Billing clients endpoint

use super::Resource;
use crate::{args::Arguments, client::Client, error::Result, types::BillingClient};

/// Billing clients visible to the token.
#[derive(Clone)]
pub struct Clients {
    client: Client,
}

impl Clients {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Every billing client.
    pub async fn list(&self, extra: Arguments) -> Result<Vec<BillingClient>> {
        self.client.get_all_pages("v1/client", extra).await
    }

    /// One billing client.
    pub async fn get(&self, id: &str) -> Result<BillingClient> {
        self.client
            .get(&format!("v1/client/{}", id), Arguments::defaults())
            .await
    }
}

impl Resource for Clients {
    fn client(&self) -> &Client {
        &self.client
    }
}

//! Account endpoint

use super::Resource;
use crate::{
    args::Arguments,
    client::Client,
    error::Result,
    types::{Account, PublicKey, SshKey},
};

/// The current account and its keys.
#[derive(Clone)]
pub struct Accounts {
    client: Client,
}

impl Accounts {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// The account the token belongs to.
    pub async fn me(&self) -> Result<Account> {
        self.client.get("v1/account/me", Arguments::defaults()).await
    }

    /// SSH keys of the current account.
    pub async fn ssh_keys(&self) -> Result<Vec<SshKey>> {
        self.client
            .get_all_pages("v1/account/me/key", Arguments::defaults())
            .await
    }

    /// Public keys of any account.
    pub async fn public_keys(&self, account_id: &str) -> Result<Vec<PublicKey>> {
        let path = format!("v1/account/{}/key", account_id);
        self.client.get_all_pages(&path, Arguments::defaults()).await
    }

    /// One public key of the current account. Looks the account up first.
    pub async fn public_key(&self, id: &str) -> Result<PublicKey> {
        let account = self.me().await?;
        let path = format!("v1/account/{}/key/{}", account.id, id);
        self.client.get(&path, Arguments::defaults()).await
    }
}

impl Resource for Accounts {
    fn client(&self) -> &Client {
        &self.client
    }
}

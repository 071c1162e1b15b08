//! Account, keys and billing clients

use super::project::Hypervisor;
use serde::{Deserialize, Serialize};

/// The account the token belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Account {
    /// Account id
    pub id: String,
    /// Login email
    pub email: String,
    /// Login name
    pub username: String,
}

/// An SSH key stored on the current account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SshKey {
    /// Key id
    pub id: String,
    /// Key name
    pub name: String,
    /// OpenSSH public key text
    pub public_key: String,
}

/// A public key of any account, with its fingerprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PublicKey {
    /// Key id
    pub id: String,
    /// Key name
    pub name: String,
    /// Key fingerprint
    pub fingerprint: String,
    /// OpenSSH public key text
    pub public_key: String,
}

/// A billing client; projects belong to one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BillingClient {
    /// Client id
    pub id: String,
    /// Client name
    pub name: String,
    /// Billing model, e.g. `prepay`
    pub payment_model: String,
    /// Contract details, when visible
    pub contract: Option<Contract>,
    /// Hypervisors this client may create VDCs on
    pub allowed_hypervisors: Vec<Hypervisor>,
}

/// Billing contract of a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Contract {
    /// Current balance
    pub balance: f64,
}

impl BillingClient {
    /// Contract balance, if the API reported one.
    pub fn balance(&self) -> Option<f64> {
        self.contract.as_ref().map(|c| c.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_client_balance() {
        let client: BillingClient = serde_json::from_str(
            r#"{"id": "c1", "name": "acme", "payment_model": "prepay", "contract": {"balance": 12.5}}"#,
        )
        .unwrap();
        assert_eq!(client.balance(), Some(12.5));
        assert!(client.allowed_hypervisors.is_empty());

        let bare: BillingClient = serde_json::from_str(r#"{"id": "c2"}"#).unwrap();
        assert_eq!(bare.balance(), None);
    }
}

//! Testnet Dispenser Client
//!
//! Requests faucet funds for the deployer address so a fresh account can
//! cover the app-create fee and minimum balance. Only meaningful on
//! Testnet; the public faucet takes the target account as a query
//! parameter.

use reqwest::Client;
use thiserror::Error;

/// Public Algorand Testnet faucet
pub const TESTNET_DISPENSER_URL: &str = "https://bank.testnet.algorand.network";

/// Dispenser error types
#[derive(Debug, Error)]
pub enum DispenserError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("dispenser rejected the request: {0}")]
    Rejected(String),
}

/// Faucet HTTP client
#[derive(Debug, Clone)]
pub struct DispenserClient {
    client: Client,
    base_url: String,
}

impl DispenserClient {
    /// Create a new client with a custom faucet URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client for the public Testnet faucet
    pub fn new_testnet() -> Self {
        Self::new(TESTNET_DISPENSER_URL)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the faucet to fund `address`
    ///
    /// The grant lands after the faucet's own transaction confirms, so the
    /// caller re-checks the balance rather than assuming immediate funds.
    pub async fn request_funds(&self, address: &str) -> Result<(), DispenserError> {
        let url = format!("{}/?account={}", self.base_url, address);
        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(DispenserError::Rejected(error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_urls() {
        let testnet = DispenserClient::new_testnet();
        assert_eq!(testnet.base_url(), TESTNET_DISPENSER_URL);

        let custom = DispenserClient::new("https://faucet.example.com/");
        assert_eq!(custom.base_url(), "https://faucet.example.com");
    }
}

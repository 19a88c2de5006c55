//! Algorand Node Client
//!
//! Thin wrapper around the algonaut algod v2 client, exposed behind the
//! `AlgodApi` trait so the deploy pipeline can run against a mocked node in
//! tests. No retry or backoff: a failed call surfaces as `NodeError` and
//! terminates the run.

use algonaut::algod::v2::Algod;
use algonaut::core::{Address, CompiledTeal, Round, SuggestedTransactionParams};
use algonaut::transaction::SignedTransaction;
use async_trait::async_trait;
use thiserror::Error;

use crate::config::DeployConfig;

// ============================================================================
// Constants
// ============================================================================

/// Public Algorand Testnet algod endpoint (no API token required)
pub const TESTNET_ALGOD_URL: &str = "https://testnet-api.algonode.cloud";

/// Public Algorand Mainnet algod endpoint (no API token required)
pub const MAINNET_ALGOD_URL: &str = "https://mainnet-api.algonode.cloud";

/// algod endpoint of a local algokit sandbox
pub const LOCALNET_ALGOD_URL: &str = "http://localhost:4001";

// ============================================================================
// Errors
// ============================================================================

/// Node errors
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("invalid algod endpoint {0}: {1}")]
    InvalidEndpoint(String, String),

    #[error("algod request failed: {0}")]
    Api(String),
}

// ============================================================================
// Pending Transaction Lookup
// ============================================================================

/// Pending transaction lookup result
#[derive(Debug, Clone, Default)]
pub struct PendingInfo {
    /// Round the transaction was confirmed in, if any
    pub confirmed_round: Option<u64>,
    /// Application index created by the transaction, if any
    pub application_index: Option<u64>,
    /// Pool rejection message; empty while the transaction is still valid
    pub pool_error: String,
}

impl PendingInfo {
    /// Whether the transaction has been committed to a round
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_round.map(|r| r > 0).unwrap_or(false)
    }
}

// ============================================================================
// Trait
// ============================================================================

/// Node operations used by the deploy pipeline
///
/// Implementations:
/// - `AlgodClient` - production client backed by algonaut
/// - `MockAlgodApi` - generated mock for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlgodApi: Send + Sync {
    /// Fetch suggested transaction parameters
    async fn suggested_params(&self) -> Result<SuggestedTransactionParams, NodeError>;

    /// Compile TEAL source on the node, returning the decoded program bytes
    async fn compile_teal(&self, source: &str) -> Result<CompiledTeal, NodeError>;

    /// Submit a signed transaction, returning its transaction id
    async fn broadcast(&self, signed: &SignedTransaction) -> Result<String, NodeError>;

    /// Look up a pending transaction by id
    async fn pending_transaction(&self, tx_id: &str) -> Result<PendingInfo, NodeError>;

    /// Latest round the node has seen
    async fn last_round(&self) -> Result<u64, NodeError>;

    /// Block until the node reports a round after `round`
    async fn wait_for_round_after(&self, round: u64) -> Result<(), NodeError>;

    /// Balance of `address` in microalgos
    async fn account_balance(&self, address: &Address) -> Result<u64, NodeError>;
}

// ============================================================================
// Client
// ============================================================================

/// Algod client bound to a single node endpoint
pub struct AlgodClient {
    algod: Algod,
    url: String,
}

impl AlgodClient {
    /// Create a client for the given endpoint
    pub fn new(url: &str, token: &str) -> Result<Self, NodeError> {
        let algod = Algod::new(url, token)
            .map_err(|e| NodeError::InvalidEndpoint(url.to_string(), e.to_string()))?;
        Ok(Self {
            algod,
            url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from deployment configuration
    pub fn from_config(config: &DeployConfig) -> Result<Self, NodeError> {
        Self::new(&config.algod_url, &config.algod_token)
    }

    /// Endpoint URL this client talks to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check the node is reachable
    pub async fn health(&self) -> Result<(), NodeError> {
        self.algod
            .health()
            .await
            .map_err(|e| NodeError::Api(e.to_string()))
    }
}

#[async_trait]
impl AlgodApi for AlgodClient {
    async fn suggested_params(&self) -> Result<SuggestedTransactionParams, NodeError> {
        self.algod
            .suggested_transaction_params()
            .await
            .map_err(|e| NodeError::Api(e.to_string()))
    }

    async fn compile_teal(&self, source: &str) -> Result<CompiledTeal, NodeError> {
        self.algod
            .compile_teal(source.as_bytes())
            .await
            .map_err(|e| NodeError::Api(e.to_string()))
    }

    async fn broadcast(&self, signed: &SignedTransaction) -> Result<String, NodeError> {
        let response = self
            .algod
            .broadcast_signed_transaction(signed)
            .await
            .map_err(|e| NodeError::Api(e.to_string()))?;
        Ok(response.tx_id)
    }

    async fn pending_transaction(&self, tx_id: &str) -> Result<PendingInfo, NodeError> {
        let pending = self
            .algod
            .pending_transaction_with_id(tx_id)
            .await
            .map_err(|e| NodeError::Api(e.to_string()))?;
        Ok(PendingInfo {
            confirmed_round: pending.confirmed_round,
            application_index: pending.application_index,
            pool_error: pending.pool_error,
        })
    }

    async fn last_round(&self) -> Result<u64, NodeError> {
        let status = self
            .algod
            .status()
            .await
            .map_err(|e| NodeError::Api(e.to_string()))?;
        Ok(status.last_round)
    }

    async fn wait_for_round_after(&self, round: u64) -> Result<(), NodeError> {
        self.algod
            .status_after_round(Round(round))
            .await
            .map(|_| ())
            .map_err(|e| NodeError::Api(e.to_string()))
    }

    async fn account_balance(&self, address: &Address) -> Result<u64, NodeError> {
        let info = self
            .algod
            .account_information(address)
            .await
            .map_err(|e| NodeError::Api(e.to_string()))?;
        Ok(info.amount.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_urls() {
        let client = AlgodClient::new(TESTNET_ALGOD_URL, "").unwrap();
        assert_eq!(client.url(), TESTNET_ALGOD_URL);

        let client = AlgodClient::new("https://node.example.com/", "").unwrap();
        assert_eq!(client.url(), "https://node.example.com");
    }

    #[test]
    fn test_pending_info_confirmation() {
        assert!(!PendingInfo::default().is_confirmed());

        let confirmed = PendingInfo {
            confirmed_round: Some(12),
            application_index: Some(1),
            pool_error: String::new(),
        };
        assert!(confirmed.is_confirmed());

        let zero_round = PendingInfo {
            confirmed_round: Some(0),
            ..Default::default()
        };
        assert!(!zero_round.is_confirmed());
    }
}

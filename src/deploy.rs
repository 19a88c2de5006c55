//! Application Deployment Pipeline
//!
//! Builds, signs and submits the SavingsVault application-create
//! transaction, then waits a bounded number of rounds for confirmation.
//! Every run creates a new application instance; the operator records the
//! resulting App ID by hand.

use algonaut::core::Address;
use algonaut::transaction::builder::CreateApplication;
use algonaut::transaction::transaction::StateSchema;
use algonaut::transaction::TxnBuilder;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::account::DeployerAccount;
use crate::algod::{AlgodApi, NodeError, PendingInfo};
use crate::artifacts::TealArtifacts;
use crate::config::Network;

// ============================================================================
// Constants
// ============================================================================

/// Global uint slots: total_saved, goal_completed, deadline, target_amount
pub const GLOBAL_UINTS: u64 = 4;

/// Global byte-slice slots: goal_owner address
pub const GLOBAL_BYTE_SLICES: u64 = 1;

/// The contract keeps no per-account state
pub const LOCAL_UINTS: u64 = 0;
pub const LOCAL_BYTE_SLICES: u64 = 0;

/// Rounds to wait for confirmation before giving up
pub const DEFAULT_WAIT_ROUNDS: u64 = 4;

/// Minimum deployer balance to attempt a deploy (1 ALGO), covering the
/// create fee plus the schema's minimum-balance increase
pub const MIN_DEPLOY_BALANCE: u64 = 1_000_000;

// ============================================================================
// Errors
// ============================================================================

/// Deployment errors
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("node error: {0}")]
    Node(#[from] NodeError),

    #[error(
        "deployer account {address} holds {balance} microalgos, below the {required} \
         required to deploy; fund it first (Testnet: vault-deploy fund)"
    )]
    InsufficientBalance {
        address: String,
        balance: u64,
        required: u64,
    },

    #[error("failed to build application-create transaction: {0}")]
    Build(String),

    #[error("failed to sign transaction: {0}")]
    Sign(String),

    #[error("transaction {tx_id} rejected by the pool: {reason}")]
    Rejected { tx_id: String, reason: String },

    #[error(
        "transaction {tx_id} was not confirmed within {waited} rounds; check its status \
         on the explorer: {explorer_url}"
    )]
    NotConfirmed {
        tx_id: String,
        waited: u64,
        explorer_url: String,
    },

    #[error("confirmed transaction {0} carries no application index")]
    MissingAppIndex(String),
}

// ============================================================================
// Outcome
// ============================================================================

/// Result of a successful deployment
#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    /// Newly created application id
    pub app_id: u64,
    /// Id of the application-create transaction
    pub tx_id: String,
    /// Round the transaction was confirmed in
    pub confirmed_round: u64,
    /// Explorer page for the transaction
    pub tx_url: String,
    /// Explorer page for the application
    pub app_url: String,
}

impl DeployOutcome {
    /// Build the outcome from a confirmed pending-transaction record
    pub fn from_confirmation(
        tx_id: &str,
        confirmed: &PendingInfo,
        network: Network,
    ) -> Result<Self, DeployError> {
        let app_id = confirmed
            .application_index
            .ok_or_else(|| DeployError::MissingAppIndex(tx_id.to_string()))?;

        Ok(Self {
            app_id,
            tx_id: tx_id.to_string(),
            confirmed_round: confirmed.confirmed_round.unwrap_or(0),
            tx_url: network.explorer_tx_url(tx_id),
            app_url: network.explorer_app_url(app_id),
        })
    }
}

// ============================================================================
// Pipeline Steps
// ============================================================================

/// Fail early when the deployer cannot cover the create fee and
/// minimum-balance increase. Returns the balance in microalgos.
pub async fn check_funding(
    node: &impl AlgodApi,
    address: &Address,
) -> Result<u64, DeployError> {
    let balance = node.account_balance(address).await?;
    if balance < MIN_DEPLOY_BALANCE {
        return Err(DeployError::InsufficientBalance {
            address: address.to_string(),
            balance,
            required: MIN_DEPLOY_BALANCE,
        });
    }
    Ok(balance)
}

/// Compile both programs on the node, then build, sign and submit the
/// application-create transaction. Returns the transaction id.
pub async fn submit_app_create(
    node: &impl AlgodApi,
    account: &DeployerAccount,
    artifacts: &TealArtifacts,
) -> Result<String, DeployError> {
    let approval = node.compile_teal(&artifacts.approval_source).await?;
    let clear = node.compile_teal(&artifacts.clear_source).await?;
    debug!(target: "vault_deploy::deploy", "programs compiled by node");

    let params = node.suggested_params().await?;
    let txn = TxnBuilder::with(
        &params,
        CreateApplication::new(
            account.address(),
            approval,
            clear,
            StateSchema {
                number_ints: GLOBAL_UINTS,
                number_byteslices: GLOBAL_BYTE_SLICES,
            },
            StateSchema {
                number_ints: LOCAL_UINTS,
                number_byteslices: LOCAL_BYTE_SLICES,
            },
        )
        .build(),
    )
    .build()
    .map_err(|e| DeployError::Build(e.to_string()))?;

    let signed = account
        .sign(txn)
        .map_err(|e| DeployError::Sign(e.to_string()))?;
    let tx_id = node.broadcast(&signed).await?;
    info!(target: "vault_deploy::deploy", tx_id = %tx_id, "application-create submitted");
    Ok(tx_id)
}

/// Poll the node until `tx_id` is confirmed, advancing one round per poll
/// and giving up after `max_rounds` rounds.
pub async fn wait_for_confirmation(
    node: &impl AlgodApi,
    tx_id: &str,
    max_rounds: u64,
    network: Network,
) -> Result<PendingInfo, DeployError> {
    let mut round = node.last_round().await?;
    let deadline = round + max_rounds;

    loop {
        let pending = node.pending_transaction(tx_id).await?;
        if pending.is_confirmed() {
            info!(
                target: "vault_deploy::deploy",
                tx_id = %tx_id,
                round = pending.confirmed_round.unwrap_or(0),
                "transaction confirmed"
            );
            return Ok(pending);
        }
        if !pending.pool_error.is_empty() {
            return Err(DeployError::Rejected {
                tx_id: tx_id.to_string(),
                reason: pending.pool_error,
            });
        }
        if round >= deadline {
            return Err(DeployError::NotConfirmed {
                tx_id: tx_id.to_string(),
                waited: max_rounds,
                explorer_url: network.explorer_tx_url(tx_id),
            });
        }
        node.wait_for_round_after(round).await?;
        round += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algod::MockAlgodApi;
    use algonaut::transaction::account::Account;

    const TX_ID: &str = "H2KKVITXKWL25AFHKYXGDH4EKHPXJ5W77Z5NUOTMSIM5ZZZEIYMQ";
    const APP_ID: u64 = 7_261_454;

    fn confirmed_info() -> PendingInfo {
        PendingInfo {
            confirmed_round: Some(102),
            application_index: Some(APP_ID),
            pool_error: String::new(),
        }
    }

    #[tokio::test]
    async fn test_waiter_returns_fixed_app_index() {
        let mut node = MockAlgodApi::new();
        node.expect_last_round().returning(|| Ok(100));
        let mut polls = 0u32;
        node.expect_pending_transaction().returning(move |_| {
            polls += 1;
            if polls < 3 {
                Ok(PendingInfo::default())
            } else {
                Ok(confirmed_info())
            }
        });
        node.expect_wait_for_round_after().times(2).returning(|_| Ok(()));

        let pending = wait_for_confirmation(&node, TX_ID, 4, Network::Testnet)
            .await
            .unwrap();
        assert_eq!(pending.application_index, Some(APP_ID));

        let outcome = DeployOutcome::from_confirmation(TX_ID, &pending, Network::Testnet).unwrap();
        assert_eq!(outcome.app_id, APP_ID);
        assert!(outcome.app_url.ends_with("/applications/7261454"));
        assert!(outcome.tx_url.ends_with(TX_ID));
    }

    #[tokio::test]
    async fn test_waiter_gives_up_after_bound() {
        let mut node = MockAlgodApi::new();
        node.expect_last_round().returning(|| Ok(1));
        node.expect_pending_transaction()
            .returning(|_| Ok(PendingInfo::default()));
        node.expect_wait_for_round_after().times(4).returning(|_| Ok(()));

        let err = wait_for_confirmation(&node, TX_ID, 4, Network::Testnet)
            .await
            .unwrap_err();
        match &err {
            DeployError::NotConfirmed { tx_id, waited, .. } => {
                assert_eq!(tx_id, TX_ID);
                assert_eq!(*waited, 4);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // the operator-facing message carries the tx id and explorer link
        assert!(err.to_string().contains(TX_ID));
        assert!(err.to_string().contains("explorer"));
    }

    #[tokio::test]
    async fn test_waiter_surfaces_pool_rejection() {
        let mut node = MockAlgodApi::new();
        node.expect_last_round().returning(|| Ok(1));
        node.expect_pending_transaction().returning(|_| {
            Ok(PendingInfo {
                pool_error: "overspend".to_string(),
                ..Default::default()
            })
        });

        let err = wait_for_confirmation(&node, TX_ID, 4, Network::Testnet)
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::Rejected { .. }));
        assert!(err.to_string().contains("overspend"));
    }

    #[tokio::test]
    async fn test_check_funding_floor() {
        let address = Account::generate().address();

        let mut node = MockAlgodApi::new();
        node.expect_account_balance().returning(|_| Ok(500_000));
        let err = check_funding(&node, &address).await.unwrap_err();
        assert!(matches!(err, DeployError::InsufficientBalance { .. }));
        assert!(err.to_string().contains("fund"));

        let mut node = MockAlgodApi::new();
        node.expect_account_balance().returning(|_| Ok(5_000_000));
        assert_eq!(check_funding(&node, &address).await.unwrap(), 5_000_000);
    }

    #[test]
    fn test_outcome_requires_app_index() {
        let info = PendingInfo {
            confirmed_round: Some(102),
            application_index: None,
            pool_error: String::new(),
        };
        let err = DeployOutcome::from_confirmation(TX_ID, &info, Network::Testnet).unwrap_err();
        assert!(matches!(err, DeployError::MissingAppIndex(_)));
    }
}

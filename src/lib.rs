//! SavingsVault Deployment Tool
//!
//! One-shot operational CLI that deploys the pre-compiled SavingsVault
//! TEAL contract to an Algorand node:
//!
//! 1. Locate the repository root (walk up to the `.git` marker)
//! 2. Load the deployer mnemonic from `DEPLOYER_MNEMONIC`
//! 3. Read `contracts/approval.teal` and `contracts/clear.teal`
//! 4. Compile both programs on the node
//! 5. Build, sign and submit the application-create transaction
//! 6. Wait a bounded number of rounds and print the new App ID
//!
//! Contract compilation into TEAL happens in a separate build step; this
//! crate only ships the deployment pass. Nothing is persisted — the
//! operator records the printed App ID by hand.

pub mod account;
pub mod algod;
pub mod artifacts;
pub mod common;
pub mod config;
pub mod deploy;
pub mod dispenser;
pub mod logging;
pub mod repo;

// Re-exports: deployer credentials
pub use account::{CredentialError, DeployerAccount, MNEMONIC_ENV_VAR};

// Re-exports: node client
pub use algod::{
    AlgodApi, AlgodClient, NodeError, PendingInfo, LOCALNET_ALGOD_URL, MAINNET_ALGOD_URL,
    TESTNET_ALGOD_URL,
};

// Re-exports: TEAL artifacts
pub use artifacts::{ArtifactError, TealArtifacts};

// Re-exports: common error type
pub use common::error::{Result, VaultError};

// Re-exports: configuration
pub use config::{ConfigError, DeployConfig, Network};

// Re-exports: deployment pipeline
pub use deploy::{
    check_funding, submit_app_create, wait_for_confirmation, DeployError, DeployOutcome,
    DEFAULT_WAIT_ROUNDS, MIN_DEPLOY_BALANCE,
};

// Re-exports: Testnet dispenser
pub use dispenser::{DispenserClient, DispenserError, TESTNET_DISPENSER_URL};

// Re-exports: repository locator
pub use repo::{find_repo_root, RepoError};

/// Microalgo conversion helpers
pub mod units {
    pub const MICROALGOS_PER_ALGO: u64 = 1_000_000;

    /// Convert whole algos to microalgos with proper rounding
    pub fn algos_to_microalgos(algos: f64) -> u64 {
        (algos * MICROALGOS_PER_ALGO as f64).round() as u64
    }

    pub fn microalgos_to_algos(micro: u64) -> f64 {
        micro as f64 / MICROALGOS_PER_ALGO as f64
    }

    pub fn format_microalgos(micro: u64) -> String {
        let algos = microalgos_to_algos(micro);
        format!("{} microalgos ({:.6} ALGO)", micro, algos)
    }
}

#[cfg(test)]
mod tests {
    use super::units;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(units::algos_to_microalgos(1.0), 1_000_000);
        assert_eq!(units::algos_to_microalgos(0.5), 500_000);
        assert_eq!(units::microalgos_to_algos(2_500_000), 2.5);
        assert!(units::format_microalgos(1_000_000).contains("1.000000 ALGO"));
    }
}

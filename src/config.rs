//! Environment-based Configuration for the Deployment Tool
//!
//! All deployment settings come from environment variables (optionally via a
//! local `.env` file loaded at startup). The deployer mnemonic is handled
//! separately by the `account` module so the raw phrase never sits in the
//! config struct.
//!
//! # Recognized Environment Variables
//!
//! - `VAULT_NETWORK` - "mainnet", "testnet" or "localnet" (default: "testnet")
//! - `VAULT_ALGOD_URL` - algod endpoint URL (default: public node for the network)
//! - `VAULT_ALGOD_TOKEN` - algod API token (default: none for public nodes)
//! - `VAULT_CONTRACTS_DIR` - TEAL artifact directory (default: `<repo-root>/contracts`)
//! - `VAULT_WAIT_ROUNDS` - confirmation wait bound in rounds (default: 4)
//! - `VAULT_LOG_LEVEL` - logging level (debug, info, warn, error)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::algod::{LOCALNET_ALGOD_URL, MAINNET_ALGOD_URL, TESTNET_ALGOD_URL};
use crate::deploy::DEFAULT_WAIT_ROUNDS;
use crate::dispenser::TESTNET_DISPENSER_URL;

/// Standard API token of an algokit localnet sandbox
const LOCALNET_ALGOD_TOKEN: &str =
    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Target Algorand network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Localnet,
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "localnet" | "local" | "sandbox" => Ok(Network::Localnet),
            _ => Err(ConfigError::InvalidValue(
                "VAULT_NETWORK".to_string(),
                format!("unknown network: {}", s),
            )),
        }
    }
}

impl Network {
    /// Get default algod endpoint for this network
    pub fn default_algod_url(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_ALGOD_URL,
            Network::Testnet => TESTNET_ALGOD_URL,
            Network::Localnet => LOCALNET_ALGOD_URL,
        }
    }

    /// Get default algod API token for this network
    ///
    /// Public nodes take no token; the localnet sandbox uses its
    /// well-known development token.
    pub fn default_algod_token(&self) -> &'static str {
        match self {
            Network::Mainnet | Network::Testnet => "",
            Network::Localnet => LOCALNET_ALGOD_TOKEN,
        }
    }

    /// Get the faucet endpoint for this network, if one exists
    pub fn dispenser_url(&self) -> Option<&'static str> {
        match self {
            Network::Testnet => Some(TESTNET_DISPENSER_URL),
            Network::Mainnet | Network::Localnet => None,
        }
    }

    /// Explorer page for a transaction id
    pub fn explorer_tx_url(&self, tx_id: &str) -> String {
        match self {
            Network::Mainnet => {
                format!("https://explorer.perawallet.app/transactions/{}", tx_id)
            }
            Network::Testnet => format!(
                "https://testnet.explorer.perawallet.app/transactions/{}",
                tx_id
            ),
            Network::Localnet => {
                format!("https://lora.algokit.io/localnet/transaction/{}", tx_id)
            }
        }
    }

    /// Explorer page for an application id
    pub fn explorer_app_url(&self, app_id: u64) -> String {
        match self {
            Network::Mainnet => {
                format!("https://explorer.perawallet.app/applications/{}", app_id)
            }
            Network::Testnet => format!(
                "https://testnet.explorer.perawallet.app/applications/{}",
                app_id
            ),
            Network::Localnet => {
                format!("https://lora.algokit.io/localnet/application/{}", app_id)
            }
        }
    }
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Network the contract is deployed to
    pub network: Network,

    /// algod endpoint URL
    pub algod_url: String,

    /// algod API token (empty for public nodes)
    pub algod_token: String,

    /// TEAL artifact directory; `None` resolves to `<repo-root>/contracts`
    pub contracts_dir: Option<PathBuf>,

    /// Rounds to wait for transaction confirmation
    pub wait_rounds: u64,

    /// Log level
    pub log_level: String,
}

impl DeployConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let network: Network = env::var("VAULT_NETWORK")
            .unwrap_or_else(|_| "testnet".to_string())
            .parse()?;

        let algod_url = env::var("VAULT_ALGOD_URL")
            .unwrap_or_else(|_| network.default_algod_url().to_string());

        let algod_token = env::var("VAULT_ALGOD_TOKEN")
            .unwrap_or_else(|_| network.default_algod_token().to_string());

        let contracts_dir = env::var("VAULT_CONTRACTS_DIR").ok().map(PathBuf::from);

        let wait_rounds = match env::var("VAULT_WAIT_ROUNDS") {
            Ok(value) => value.parse().map_err(|_| {
                ConfigError::InvalidValue(
                    "VAULT_WAIT_ROUNDS".to_string(),
                    format!("must be a number of rounds, got: {}", value),
                )
            })?,
            Err(_) => DEFAULT_WAIT_ROUNDS,
        };

        let log_level = env::var("VAULT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            network,
            algod_url,
            algod_token,
            contracts_dir,
            wait_rounds,
            log_level,
        })
    }

    /// Print configuration summary (the mnemonic never appears here)
    pub fn print_summary(&self) {
        println!("=== Deploy Configuration ===");
        println!("Network: {:?}", self.network);
        println!("Algod: {}", self.algod_url);
        match &self.contracts_dir {
            Some(dir) => println!("Contracts Dir: {}", dir.display()),
            None => println!("Contracts Dir: <repo-root>/contracts"),
        }
        println!("Wait Rounds: {}", self.wait_rounds);
        println!("Log Level: {}", self.log_level);
        println!("============================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parsing() {
        assert!(matches!("mainnet".parse::<Network>(), Ok(Network::Mainnet)));
        assert!(matches!("testnet".parse::<Network>(), Ok(Network::Testnet)));
        assert!(matches!("LOCALNET".parse::<Network>(), Ok(Network::Localnet)));
        assert!("invalid".parse::<Network>().is_err());
    }

    #[test]
    fn test_default_endpoints() {
        assert_eq!(Network::Testnet.default_algod_url(), TESTNET_ALGOD_URL);
        assert_eq!(Network::Testnet.default_algod_token(), "");
        assert_eq!(Network::Localnet.default_algod_token(), LOCALNET_ALGOD_TOKEN);
        assert!(Network::Testnet.dispenser_url().is_some());
        assert!(Network::Mainnet.dispenser_url().is_none());
    }

    #[test]
    fn test_explorer_urls_embed_ids() {
        let tx_url = Network::Testnet.explorer_tx_url("TXID123");
        assert_eq!(
            tx_url,
            "https://testnet.explorer.perawallet.app/transactions/TXID123"
        );

        let app_url = Network::Testnet.explorer_app_url(7_261_454);
        assert_eq!(
            app_url,
            "https://testnet.explorer.perawallet.app/applications/7261454"
        );
    }
}

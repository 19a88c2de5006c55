//! Deployer Credentials
//!
//! The deployer account comes from a 25-word Algorand mnemonic in the
//! `DEPLOYER_MNEMONIC` environment variable. The phrase is validated for
//! word count before any key derivation, and the derived secret key stays
//! inside the wrapped SDK account, used only for local signing.

use algonaut::core::Address;
use algonaut::transaction::account::Account;
use algonaut::transaction::{SignedTransaction, Transaction};
use std::env;
use thiserror::Error;

/// Environment variable holding the deployer mnemonic
pub const MNEMONIC_ENV_VAR: &str = "DEPLOYER_MNEMONIC";

/// Word count of an Algorand mnemonic
pub const MNEMONIC_WORDS: usize = 25;

/// Credential errors
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "DEPLOYER_MNEMONIC is not set; export a funded account mnemonic before deploying: \
         export DEPLOYER_MNEMONIC='word1 word2 ... word25'"
    )]
    Unset,

    #[error("DEPLOYER_MNEMONIC must be exactly 25 words; got {0}")]
    WordCount(usize),

    #[error("mnemonic could not be decoded: {0}")]
    InvalidMnemonic(String),

    #[error("failed to sign transaction: {0}")]
    Signing(String),
}

/// Deployer signing account derived from the mnemonic
#[derive(Debug)]
pub struct DeployerAccount {
    account: Account,
}

impl DeployerAccount {
    /// Load the deployer account from `DEPLOYER_MNEMONIC`
    pub fn from_env() -> Result<Self, CredentialError> {
        let phrase = env::var(MNEMONIC_ENV_VAR).map_err(|_| CredentialError::Unset)?;
        Self::from_mnemonic(&phrase)
    }

    /// Derive the deployer account from a 25-word mnemonic phrase
    pub fn from_mnemonic(phrase: &str) -> Result<Self, CredentialError> {
        let words = phrase.split_whitespace().count();
        if words != MNEMONIC_WORDS {
            return Err(CredentialError::WordCount(words));
        }

        let account = Account::from_mnemonic(phrase.trim())
            .map_err(|e| CredentialError::InvalidMnemonic(e.to_string()))?;
        Ok(Self { account })
    }

    /// Public address of the deployer
    pub fn address(&self) -> Address {
        self.account.address()
    }

    /// Sign a transaction with the deployer key
    pub fn sign(&self, txn: Transaction) -> Result<SignedTransaction, CredentialError> {
        self.account
            .sign_transaction(txn)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_rejected_before_derivation() {
        let err = DeployerAccount::from_mnemonic("one two three").unwrap_err();
        assert!(matches!(err, CredentialError::WordCount(3)));

        let twenty_four = vec!["abandon"; 24].join(" ");
        let err = DeployerAccount::from_mnemonic(&twenty_four).unwrap_err();
        assert!(matches!(err, CredentialError::WordCount(24)));

        let twenty_six = vec!["abandon"; 26].join(" ");
        let err = DeployerAccount::from_mnemonic(&twenty_six).unwrap_err();
        assert!(matches!(err, CredentialError::WordCount(26)));
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // 25 valid words that do not form a valid mnemonic
        let phrase = vec!["abandon"; 25].join(" ");
        let err = DeployerAccount::from_mnemonic(&phrase).unwrap_err();
        assert!(matches!(err, CredentialError::InvalidMnemonic(_)));
    }

    #[test]
    fn test_mnemonic_round_trip() {
        let generated = Account::generate();
        let deployer = DeployerAccount::from_mnemonic(&generated.mnemonic()).unwrap();
        assert_eq!(deployer.address(), generated.address());
    }
}

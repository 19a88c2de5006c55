//! Common Error Types for the Deployment Tool
//!
//! Provides unified error handling across all modules.

use thiserror::Error;

/// Root error type for the deployment tool
#[derive(Debug, Error)]
pub enum VaultError {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Logging errors
    #[error("logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Repository location errors
    #[error("repository error: {0}")]
    Repo(#[from] crate::repo::RepoError),

    /// Deployer credential errors
    #[error("credential error: {0}")]
    Credentials(#[from] crate::account::CredentialError),

    /// TEAL artifact errors
    #[error("artifact error: {0}")]
    Artifacts(#[from] crate::artifacts::ArtifactError),

    /// Node client errors
    #[error("node error: {0}")]
    Node(#[from] crate::algod::NodeError),

    /// Dispenser errors
    #[error("dispenser error: {0}")]
    Dispenser(#[from] crate::dispenser::DispenserError),

    /// Deployment pipeline errors
    #[error("deploy error: {0}")]
    Deploy(#[from] crate::deploy::DeployError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VaultError {
    /// Get error code for operator-facing diagnostics
    pub fn error_code(&self) -> &'static str {
        match self {
            VaultError::Config(_) => "CONFIG_ERROR",
            VaultError::Logging(_) => "LOGGING_ERROR",
            VaultError::Repo(_) => "REPO_ERROR",
            VaultError::Credentials(_) => "CREDENTIAL_ERROR",
            VaultError::Artifacts(_) => "ARTIFACT_ERROR",
            VaultError::Node(_) => "NODE_ERROR",
            VaultError::Dispenser(_) => "DISPENSER_ERROR",
            VaultError::Deploy(_) => "DEPLOY_ERROR",
            VaultError::Io(_) => "IO_ERROR",
        }
    }
}

/// Result type alias using VaultError
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactError;

    #[test]
    fn test_error_conversion() {
        let err: VaultError = ArtifactError::Missing("contracts/approval.teal".to_string()).into();
        assert_eq!(err.error_code(), "ARTIFACT_ERROR");
        assert!(err.to_string().contains("approval.teal"));
    }
}

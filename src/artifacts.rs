//! Compiled TEAL Artifacts
//!
//! The contract build step writes `approval.teal` and `clear.teal` into the
//! contracts directory; this module reads them back as program source text
//! for the node-side compiler. Contents are not validated locally — the
//! node's compile endpoint is the authority on what is valid TEAL.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Artifact directory name under the repository root
pub const CONTRACTS_DIR: &str = "contracts";

/// Approval program file name
pub const APPROVAL_FILE: &str = "approval.teal";

/// Clear-state program file name
pub const CLEAR_FILE: &str = "clear.teal";

/// Artifact errors
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error(
        "compiled TEAL not found at {0}; run the contract build step to produce \
         approval.teal and clear.teal before deploying"
    )]
    Missing(String),

    #[error("failed to read {0}: {1}")]
    Unreadable(String, String),
}

/// TEAL program pair read from the contracts directory
#[derive(Debug, Clone)]
pub struct TealArtifacts {
    /// Approval program source text
    pub approval_source: String,
    /// Clear-state program source text
    pub clear_source: String,
}

impl TealArtifacts {
    /// Read both programs from `dir`
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        Ok(Self {
            approval_source: read_program(&dir.join(APPROVAL_FILE))?,
            clear_source: read_program(&dir.join(CLEAR_FILE))?,
        })
    }
}

fn read_program(path: &Path) -> Result<String, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::Missing(path.display().to_string()));
    }
    fs::read_to_string(path)
        .map_err(|e| ArtifactError::Unreadable(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const APPROVAL_SRC: &str = "#pragma version 8\nint 1\n";
    const CLEAR_SRC: &str = "#pragma version 8\nint 1\n";

    #[test]
    fn test_loads_both_programs() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(APPROVAL_FILE), APPROVAL_SRC).unwrap();
        fs::write(dir.path().join(CLEAR_FILE), CLEAR_SRC).unwrap();

        let artifacts = TealArtifacts::load(dir.path()).unwrap();
        assert_eq!(artifacts.approval_source, APPROVAL_SRC);
        assert_eq!(artifacts.clear_source, CLEAR_SRC);
    }

    #[test]
    fn test_missing_approval_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CLEAR_FILE), CLEAR_SRC).unwrap();

        let err = TealArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing(_)));
        assert!(err.to_string().contains(APPROVAL_FILE));
        assert!(err.to_string().contains("build step"));
    }

    #[test]
    fn test_missing_clear_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(APPROVAL_FILE), APPROVAL_SRC).unwrap();

        let err = TealArtifacts::load(dir.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Missing(_)));
        assert!(err.to_string().contains(CLEAR_FILE));
    }
}

//! Repository Locator
//!
//! The TEAL artifacts live at a fixed path relative to the repository root,
//! so the tool resolves the root by walking up from the working directory
//! until it finds the `.git` marker.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Repository location errors
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("no .git directory found above {0}; run the tool from inside the cloned repository")]
    NotFound(String),
}

/// Find the nearest ancestor of `start` (inclusive) that contains a `.git`
/// entry.
///
/// `.git` may be a directory or, in a linked worktree, a file; both count.
pub fn find_repo_root(start: &Path) -> Result<PathBuf, RepoError> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Ok(dir.to_path_buf());
        }
        current = dir.parent();
    }
    Err(RepoError::NotFound(start.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_finds_root_from_any_depth() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("project");
        let nested = root.join("a").join("b").join("c");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(root.join(".git")).unwrap();

        assert_eq!(find_repo_root(&root).unwrap(), root);
        assert_eq!(find_repo_root(&root.join("a")).unwrap(), root);
        assert_eq!(find_repo_root(&nested).unwrap(), root);
    }

    #[test]
    fn test_nearest_marker_wins() {
        let dir = tempdir().unwrap();
        let outer = dir.path().join("outer");
        let inner = outer.join("vendored");
        fs::create_dir_all(&inner).unwrap();
        fs::create_dir(outer.join(".git")).unwrap();
        fs::create_dir(inner.join(".git")).unwrap();

        assert_eq!(find_repo_root(&inner).unwrap(), inner);
    }

    #[test]
    fn test_missing_marker_fails() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("x").join("y");
        fs::create_dir_all(&nested).unwrap();

        let err = find_repo_root(&nested).unwrap_err();
        assert!(err.to_string().contains("no .git directory"));
    }
}

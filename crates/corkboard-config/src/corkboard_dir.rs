//! Discovery of the `.corkboard/` directory.
//!
//! The `.corkboard/` directory is the root of a project's board data. This
//! module provides functions to find it by walking up the directory tree.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the corkboard metadata directory.
const CORKBOARD_DIR_NAME: &str = ".corkboard";

/// The name of the environment variable that can override the directory.
const CORKBOARD_DIR_ENV: &str = "CORKBOARD_DIR";

/// Walk up the directory tree from `start` looking for a `.corkboard/`
/// directory.
///
/// Returns the path to the `.corkboard/` directory if found, or `None` if
/// the filesystem root is reached without finding one. The `CORKBOARD_DIR`
/// environment variable is checked first (highest priority).
pub fn find_corkboard_dir(start: &Path) -> Option<PathBuf> {
    // 1. Check CORKBOARD_DIR environment variable (highest priority).
    if let Ok(env_dir) = std::env::var(CORKBOARD_DIR_ENV) {
        let env_path = PathBuf::from(&env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    // 2. Walk up from `start` looking for .corkboard/.
    let start = match start.canonicalize() {
        Ok(p) => p,
        Err(_) => return None,
    };

    let mut current = start.as_path();
    loop {
        let candidate = current.join(CORKBOARD_DIR_NAME);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break, // Reached filesystem root.
        }
    }

    None
}

/// Like [`find_corkboard_dir`], but converts `None` into
/// [`ConfigError::CorkboardDirNotFound`].
pub fn find_corkboard_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_corkboard_dir(start).ok_or(ConfigError::CorkboardDirNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_dir_in_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let corkboard = tmp.path().join(".corkboard");
        std::fs::create_dir_all(&corkboard).unwrap();
        let nested = tmp.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_corkboard_dir(&nested).unwrap();
        assert_eq!(found.canonicalize().unwrap(), corkboard.canonicalize().unwrap());
    }

    #[test]
    fn missing_dir_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = find_corkboard_dir_or_error(tmp.path());
        assert!(matches!(result, Err(ConfigError::CorkboardDirNotFound)));
    }
}

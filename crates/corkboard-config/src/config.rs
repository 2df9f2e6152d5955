//! Configuration types and loading.
//!
//! The main entry point is [`CorkboardConfig`], which represents the contents
//! of `.corkboard/config.yaml`. Configuration is loaded with [`load_config`]
//! and saved with [`save_config`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// The `.corkboard/` directory was not found.
    #[error("no .corkboard directory found (run 'cork init' first)")]
    CorkboardDirNotFound,
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Config model
// ---------------------------------------------------------------------------

/// Contents of `.corkboard/config.yaml`.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorkboardConfig {
    /// Board to use when a command is invoked without `--board`.
    #[serde(default, rename = "default-board", skip_serializing_if = "Option::is_none")]
    pub default_board: Option<String>,

    /// Default actor name, overriding the environment-based resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    /// Emit JSON output by default.
    #[serde(default)]
    pub json: bool,

    /// Column names created by `cork board create --with-columns`.
    #[serde(default = "default_columns", rename = "starter-columns")]
    pub starter_columns: Vec<String>,
}

fn default_columns() -> Vec<String> {
    vec!["Backlog".to_string(), "In Progress".to_string(), "Done".to_string()]
}

impl Default for CorkboardConfig {
    fn default() -> Self {
        Self {
            default_board: None,
            actor: None,
            json: false,
            starter_columns: default_columns(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from `config.yaml` inside the given `.corkboard/`
/// directory.
///
/// If the file does not exist, a default [`CorkboardConfig`] is returned.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// or [`ConfigError::ParseError`] if it contains invalid YAML.
pub fn load_config(corkboard_dir: &Path) -> Result<CorkboardConfig> {
    let config_path = corkboard_dir.join("config.yaml");

    if !config_path.exists() {
        return Ok(CorkboardConfig::default());
    }

    let content = std::fs::read_to_string(&config_path)?;

    // An empty file is valid and yields default config.
    if content.trim().is_empty() {
        return Ok(CorkboardConfig::default());
    }

    let config: CorkboardConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.corkboard/`
/// directory. The directory is created if it does not exist.
pub fn save_config(corkboard_dir: &Path, config: &CorkboardConfig) -> Result<()> {
    std::fs::create_dir_all(corkboard_dir)?;

    let config_path = corkboard_dir.join("config.yaml");
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

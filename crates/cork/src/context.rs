//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds the state every command handler needs:
//! resolved `.corkboard/` directory, loaded config, actor name, and global
//! flags. The acting identity is resolved once here and passed explicitly
//! into every storage and import call.

use std::env;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context as _, Result, bail};
use tracing::debug;

use corkboard_config::{CorkboardConfig, find_corkboard_dir, load_config};
use corkboard_storage::SqliteStore;

use crate::cli::GlobalArgs;

/// Name of the SQLite database file inside `.corkboard/`.
const DB_FILE: &str = "corkboard.db";

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Resolved `.corkboard/` directory, if one was found.
    pub corkboard_dir: Option<PathBuf>,

    /// Loaded configuration (defaults when no config file exists).
    pub config: CorkboardConfig,

    /// Actor name for the audit trail.
    pub actor: String,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// The actor is resolved with the priority chain:
    /// `--actor` flag (or `CORKBOARD_ACTOR` env via clap) > config `actor` >
    /// `git config user.name` > `$USER` > `"unknown"`.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        let corkboard_dir = global
            .db
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| env::current_dir().ok().and_then(|cwd| find_corkboard_dir(&cwd)));

        let config = corkboard_dir
            .as_deref()
            .and_then(|dir| load_config(dir).ok())
            .unwrap_or_default();

        let actor = resolve_actor(global.actor.as_deref(), config.actor.as_deref());
        let json = global.json || config.json;

        Self {
            corkboard_dir,
            config,
            actor,
            json,
            verbose: global.verbose,
            quiet: global.quiet,
        }
    }

    /// Path of the SQLite database inside the resolved directory.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.corkboard_dir.as_ref().map(|dir| dir.join(DB_FILE))
    }

    /// Opens the store, failing with a hint when no project is initialized.
    pub fn open_store(&self) -> Result<SqliteStore> {
        let db_path = self
            .db_path()
            .context("no corkboard database found. Run 'cork init' to create one.")?;
        if !db_path.exists() {
            bail!(
                "no corkboard database found at {}\nHint: run 'cork init' to create a database",
                db_path.display()
            );
        }
        debug!(path = %db_path.display(), "opening store");
        Ok(SqliteStore::open(&db_path)?)
    }

    /// Resolves the target board: explicit flag > configured default.
    pub fn resolve_board(&self, flag: Option<&str>) -> Result<String> {
        if let Some(id) = flag {
            return Ok(id.to_string());
        }
        if let Some(id) = self
            .config
            .default_board
            .as_deref()
            .filter(|id| !id.is_empty())
        {
            return Ok(id.to_string());
        }
        bail!("no board selected: pass --board or set default-board in .corkboard/config.yaml")
    }
}

/// Resolves the actor name using the priority chain.
fn resolve_actor(flag_value: Option<&str>, config_value: Option<&str>) -> String {
    // 1. Explicit flag (clap also feeds CORKBOARD_ACTOR through here)
    if let Some(actor) = flag_value {
        if !actor.is_empty() {
            return actor.to_string();
        }
    }

    // 2. Config file
    if let Some(actor) = config_value {
        if !actor.is_empty() {
            return actor.to_string();
        }
    }

    // 3. git config user.name
    if let Ok(output) = Command::new("git").args(["config", "user.name"]).output() {
        if output.status.success() {
            let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !name.is_empty() {
                return name;
            }
        }
    }

    // 4. USER env (Unix) or USERNAME env (Windows)
    if let Ok(user) = env::var("USER").or_else(|_| env::var("USERNAME")) {
        if !user.is_empty() {
            return user;
        }
    }

    // 5. Fallback
    "unknown".to_string()
}

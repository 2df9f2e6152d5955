//! `cork init` -- initialize a corkboard project in the current directory.

use std::env;
use std::fs;

use anyhow::{Context, Result, bail};

use corkboard_config::{CorkboardConfig, save_config};
use corkboard_storage::SqliteStore;

use crate::cli::InitArgs;
use crate::context::RuntimeContext;

/// Default gitignore content for the `.corkboard` directory.
const GITIGNORE_CONTENT: &str = r#"# Corkboard database files
*.db
*.db-journal
*.db-wal
*.db-shm
"#;

/// Execute the `cork init` command.
pub fn run(ctx: &RuntimeContext, args: &InitArgs) -> Result<()> {
    let cwd = env::current_dir().context("failed to get current directory")?;

    let corkboard_dir = cwd.join(".corkboard");
    let db_path = corkboard_dir.join("corkboard.db");

    // Safety guard: check for existing data unless --force
    if !args.force && db_path.exists() {
        bail!(
            "Found existing database in {}\n\n\
            This workspace is already initialized.\n\n\
            To use the existing database:\n  \
            Just run cork commands normally (e.g., cork board list)\n\n\
            Or use --force to re-initialize.",
            corkboard_dir.display()
        );
    }

    fs::create_dir_all(&corkboard_dir)
        .with_context(|| format!("failed to create directory: {}", corkboard_dir.display()))?;

    // Create .gitignore
    let gitignore_path = corkboard_dir.join(".gitignore");
    if !gitignore_path.exists() {
        fs::write(&gitignore_path, GITIGNORE_CONTENT)
            .with_context(|| format!("failed to create .gitignore: {}", gitignore_path.display()))?;
    }

    // Create the SQLite database (opens + initializes the schema)
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to create database: {}", db_path.display()))?;
    drop(store);

    // Write a default config.yaml if none exists
    if !corkboard_dir.join("config.yaml").exists() {
        save_config(&corkboard_dir, &CorkboardConfig::default())
            .context("failed to write default config.yaml")?;
    }

    if !ctx.quiet {
        println!();
        println!("corkboard initialized!");
        println!();
        println!("  Database: {}", db_path.display());
        println!("  Config:   {}", corkboard_dir.join("config.yaml").display());
        println!();
        println!("Run `cork board create \"My board\" --with-columns --default` to get started.");
        println!();
    }

    Ok(())
}

//! Configuration management for the corkboard system.
//!
//! This crate handles loading and saving `.corkboard/config.yaml` files and
//! discovering `.corkboard/` directories in the filesystem.

pub mod config;
pub mod corkboard_dir;

pub use config::{ConfigError, CorkboardConfig, load_config, save_config};
pub use corkboard_dir::{find_corkboard_dir, find_corkboard_dir_or_error};

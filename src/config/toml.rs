//! TOML configuration file parsing
//!
//! ```toml
//! bound = 1000
//!
//! [workers]
//! count = 8
//!
//! [output]
//! json_output = "primes.json"
//! show_stats = true
//! ```

use super::*;
use crate::config::cli::Cli;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with a base configuration (CLI takes precedence)
///
/// The base is either a parsed config file or [`Config::default`]. The bound
/// is carried as given; [`Config::bound`] decides whether it is usable.
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    if cli.bound.is_some() {
        config.bound = cli.bound;
    }

    if let Some(workers) = cli.workers {
        config.workers.count = workers;
    }

    if cli.json_output.is_some() {
        config.output.json_output = cli.json_output.clone();
    }
    if cli.show_stats {
        config.output.show_stats = true;
    }

    if cli.debug {
        config.runtime.debug = true;
    }
    if cli.dry_run {
        config.runtime.dry_run = true;
    }

    Ok(config)
}

/// Build the run configuration from CLI arguments and an optional config file
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    merge_cli_with_config(cli, base)
}

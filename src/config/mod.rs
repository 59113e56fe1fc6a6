//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::error::PrimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Largest integer to test (primes `<= bound` are reported)
    ///
    /// Kept signed so a negative value from the command line or a config file
    /// reaches [`Config::bound`] and is reported as a usage error.
    #[serde(default)]
    pub bound: Option<i64>,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Configuration with defaults except for bound and worker count
    pub fn with_bound(bound: u64, workers: usize) -> Self {
        Self {
            bound: Some(i64::try_from(bound).unwrap_or(i64::MAX)),
            workers: WorkerConfig { count: workers },
            output: OutputConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }

    /// The bound, if present and at least 2
    pub fn bound(&self) -> Result<u64, PrimeError> {
        match self.bound {
            None => Err(PrimeError::MissingBound),
            Some(bound) if bound < 2 => Err(PrimeError::InvalidBound { bound }),
            Some(bound) => Ok(bound as u64),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bound: None,
            workers: WorkerConfig::default(),
            output: OutputConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of worker ranks (P)
    #[serde(default = "default_worker_count")]
    pub count: usize,
}

fn default_worker_count() -> usize {
    num_cpus::get()
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: default_worker_count(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report file path
    pub json_output: Option<PathBuf>,
    /// Print per-worker statistics to stderr after the result
    #[serde(default)]
    pub show_stats: bool,
}

/// Runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Dry run mode (validate and print configuration only)
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

impl RuntimeConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        match self.bound {
            Some(bound) => writeln!(f, "  Bound: {}", bound)?,
            None => writeln!(f, "  Bound: (not set)")?,
        }
        writeln!(f, "  Workers: {}", self.workers.count)?;
        if let Some(ref path) = self.output.json_output {
            writeln!(f, "  JSON output: {}", path.display())?;
        }
        write!(f, "  Show stats: {}", self.output.show_stats)
    }
}

//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// PrimePulse - parallel prime finder
#[derive(Parser, Debug)]
#[command(name = "primepulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Max integer to test for primality (must be at least 2)
    #[arg(value_name = "N", allow_negative_numbers = true)]
    pub bound: Option<i64>,

    /// Number of worker ranks (default: number of CPUs)
    #[arg(short = 't', long)]
    pub workers: Option<usize>,

    /// TOML configuration file (command-line values take precedence)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write a JSON report to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Print per-worker statistics to stderr
    #[arg(long)]
    pub show_stats: bool,

    /// Enable debug logging
    #[arg(long, env = "PRIMEPULSE_DEBUG")]
    pub debug: bool,

    /// Validate configuration without running
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse arguments from the process command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments that do not depend on a config file
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == Some(0) {
            anyhow::bail!("workers must be at least 1");
        }
        Ok(())
    }
}

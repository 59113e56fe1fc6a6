//! PrimePulse CLI entry point

use anyhow::{Context, Result};
use primepulse::config::{cli::Cli, toml::load_config, validator::validate_config, Config};
use primepulse::output::{json, text};
use primepulse::{Coordinator, PrimeError};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;

    let config = match load_config(&cli).and_then(|config| {
        validate_config(&config)?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(err) if is_usage_error(&err) => {
            eprintln!("error: {}", err);
            usage();
            return Ok(());
        }
        Err(err) => return Err(err.context("Configuration validation failed")),
    };
    init_logging(config.runtime.log_level());

    if config.runtime.dry_run {
        eprintln!("{}", config);
        eprintln!();
        eprintln!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    run(config)
}

/// Run the search and emit the result
fn run(config: Config) -> Result<()> {
    let config = Arc::new(config);
    let report = Coordinator::new(config.clone())
        .context("Failed to create coordinator")?
        .run()?;

    text::print_result(&report).context("Failed to write result")?;

    if config.output.show_stats {
        text::print_worker_summary(&report);
    }

    if let Some(ref path) = config.output.json_output {
        json::write_json_output(path, &report, true)?;
        tracing::info!(path = %path.display(), "wrote JSON report");
    }

    Ok(())
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins over the configured level when both are present.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .try_init();
}

fn is_usage_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PrimeError>()
        .map_or(false, PrimeError::is_usage)
}

/// Print a brief message explaining how the program is run
fn usage() {
    let prog = std::env::args()
        .next()
        .unwrap_or_else(|| "primepulse".to_string());
    eprintln!("usage: {} <n>", prog);
    eprintln!("   n = max integer to test for primality");
}

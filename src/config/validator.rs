//! Configuration validation

use super::*;
use anyhow::Result;

/// Upper limit on worker ranks; each rank is an OS thread
pub const MAX_WORKERS: usize = 4096;

/// Validate complete configuration
///
/// Bound problems surface as [`PrimeError`] values inside the returned error
/// so callers can tell the usage path apart from everything else.
pub fn validate_config(config: &Config) -> Result<()> {
    config.bound()?;
    validate_workers(&config.workers)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate worker configuration
pub fn validate_workers(workers: &WorkerConfig) -> Result<()> {
    if workers.count == 0 || workers.count > MAX_WORKERS {
        anyhow::bail!(
            "worker count must be between 1 and {}, got {}",
            MAX_WORKERS,
            workers.count
        );
    }
    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(ref path) = output.json_output {
        if path.as_os_str().is_empty() {
            anyhow::bail!("json_output path must not be empty");
        }
        if path.is_dir() {
            anyhow::bail!("json_output must be a file path, got directory {}", path.display());
        }
    }
    Ok(())
}

//! Coordinator
//!
//! Launches one thread per rank over a fresh channel world, joins them, and
//! hands the root's merged list to the collector.
//!
//! The coordinator never touches prime data while workers run. It only reads
//! the outcomes after every thread has been joined.

use crate::collector::PrimeReport;
use crate::comm::{ChannelWorld, Communicator};
use crate::config::Config;
use crate::error::PrimeError;
use crate::worker::{Worker, WorkerOutcome, ROOT};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Runs the workers of one prime search
pub struct Coordinator {
    config: Arc<Config>,
}

impl Coordinator {
    /// Create a coordinator for a validated configuration
    pub fn new(config: Arc<Config>) -> Result<Self> {
        if config.workers.count == 0 {
            anyhow::bail!("At least one worker is required");
        }
        config.bound()?;

        Ok(Self { config })
    }

    /// Run every worker to completion and collect the result
    ///
    /// # Example
    ///
    /// ```
    /// use primepulse::config::Config;
    /// use primepulse::coordinator::Coordinator;
    /// use std::sync::Arc;
    ///
    /// let config = Config::with_bound(20, 4);
    /// let report = Coordinator::new(Arc::new(config))?.run()?;
    /// assert_eq!(report.primes, vec![2, 3, 5, 7, 11, 13, 17, 19]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn run(self) -> Result<PrimeReport> {
        let bound = self.config.bound()?;
        let workers = self.config.workers.count;
        let start = Instant::now();

        info!(bound, workers, "starting prime search");

        let mut handles = Vec::with_capacity(workers);
        for comm in ChannelWorld::new(workers) {
            let rank = comm.rank();
            // Only the root's bound is used; the broadcast distributes it
            let local_bound = if rank == ROOT { bound } else { 0 };
            let handle = thread::Builder::new()
                .name(format!("prime-worker-{}", rank))
                .spawn(move || Worker::new(comm).run(local_bound))
                .with_context(|| format!("Failed to spawn worker {}", rank))?;
            handles.push(handle);
        }

        let mut results = Vec::with_capacity(workers);
        for (rank, handle) in handles.into_iter().enumerate() {
            let result = handle
                .join()
                .unwrap_or(Err(PrimeError::WorkerPanicked { rank }));
            results.push(result);
        }
        let elapsed = start.elapsed();

        let outcomes = first_failure(results)?;
        debug!(elapsed_ms = elapsed.as_millis() as u64, "all workers joined");

        collect(bound, outcomes, elapsed)
    }
}

/// Unwrap every outcome or report the most telling failure
///
/// A failing rank drops its endpoints, so its peers fail with `Disconnected`
/// in turn. The first failure of any other kind is the one that started it.
fn first_failure(results: Vec<Result<WorkerOutcome, PrimeError>>) -> Result<Vec<WorkerOutcome>> {
    let mut outcomes = Vec::with_capacity(results.len());
    let mut cause: Option<(usize, PrimeError)> = None;

    for (rank, result) in results.into_iter().enumerate() {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => {
                let replaces = match &cause {
                    None => true,
                    Some((_, PrimeError::Disconnected { .. })) => {
                        !matches!(err, PrimeError::Disconnected { .. })
                    }
                    Some(_) => false,
                };
                if replaces {
                    cause = Some((rank, err));
                }
            }
        }
    }

    match cause {
        Some((_, err)) if err.is_usage() => Err(err.into()),
        Some((rank, err)) => Err(anyhow::Error::new(err).context(format!("Worker {} failed", rank))),
        None => Ok(outcomes),
    }
}

/// Check the root's list against the count vector and build the report
fn collect(bound: u64, mut outcomes: Vec<WorkerOutcome>, elapsed: std::time::Duration) -> Result<PrimeReport> {
    let root = outcomes
        .get_mut(ROOT)
        .context("Root worker produced no outcome")?;
    let primes = root
        .primes
        .take()
        .context("Root worker finished without the merged list")?;

    let expected: usize = root.counts.iter().sum();
    if primes.len() != expected {
        anyhow::bail!(
            "Merged list holds {} primes but workers reported {}",
            primes.len(),
            expected
        );
    }

    let stats = outcomes.into_iter().map(|o| o.stats).collect();
    Ok(PrimeReport::collect(bound, primes, stats, elapsed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(bound: u64, workers: usize) -> Result<PrimeReport> {
        Coordinator::new(Arc::new(Config::with_bound(bound, workers)))?.run()
    }

    #[test]
    fn test_bound_twenty_four_workers() {
        let report = run(20, 4).unwrap();
        assert_eq!(report.primes, vec![2, 3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(report.workers.len(), 4);
        assert_eq!(report.workers.iter().map(|w| w.local_count).sum::<usize>(), 7);
    }

    #[test]
    fn test_bound_two_skips_work() {
        let report = run(2, 3).unwrap();
        assert_eq!(report.primes, vec![2]);
        assert!(report.workers.iter().all(|w| w.candidates == 0));
    }

    #[test]
    fn test_invalid_bound_rejected_up_front() {
        let err = Coordinator::new(Arc::new(Config::with_bound(1, 2))).err().unwrap();
        assert_eq!(err.downcast_ref::<PrimeError>(), Some(&PrimeError::InvalidBound { bound: 1 }));
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(Coordinator::new(Arc::new(Config::with_bound(10, 0))).is_err());
    }

    #[test]
    fn test_root_cause_beats_disconnects() {
        let results = vec![
            Err(PrimeError::Disconnected { peer: 2 }),
            Err(PrimeError::TransferSizeMismatch { from: 3, expected: 4, actual: 5 }),
            Err(PrimeError::Disconnected { peer: 1 }),
        ];
        let err = first_failure(results).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PrimeError>(),
            Some(&PrimeError::TransferSizeMismatch { from: 3, expected: 4, actual: 5 })
        );
        assert!(format!("{:#}", err).starts_with("Worker 1 failed"));
    }

    #[test]
    fn test_collect_checks_total_length() {
        let outcome = WorkerOutcome {
            bound: 10,
            primes: Some(vec![3, 5]),
            counts: vec![3],
            stats: Default::default(),
        };
        assert!(collect(10, vec![outcome], std::time::Duration::ZERO).is_err());
    }
}

//! Worker rank implementation
//!
//! A [`Worker`] runs the whole pipeline for one rank:
//!
//! 1. **Broadcast**: learn the bound from rank 0
//! 2. **Partition and test**: trial-divide this rank's stride of odd candidates
//! 3. **Count exchange**: all-gather the local list lengths
//! 4. **Reduce**: take part in the tree merge until this rank hands off or wins
//!
//! Workers share no memory; they talk only through their [`Communicator`].
//!
//! # Example
//!
//! ```
//! use primepulse::comm::ChannelWorld;
//! use primepulse::worker::Worker;
//!
//! let comm = ChannelWorld::new(1).pop().unwrap();
//! let outcome = Worker::new(comm).run(20)?;
//! assert_eq!(outcome.primes, Some(vec![3, 5, 7, 11, 13, 17, 19]));
//! # Ok::<(), primepulse::error::PrimeError>(())
//! ```

use crate::comm::{Communicator, CountVector};
use crate::error::PrimeError;
use crate::partition::{candidate_limit, local_primes, StridePartition};
use crate::reduce::tree_reduce;
use std::time::{Duration, Instant};
use tracing::debug;

/// Rank that broadcasts the bound and ends the reduction holding the result
pub const ROOT: usize = 0;

/// Per-rank statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub rank: usize,
    /// Odd candidates trial-divided by this rank
    pub candidates: usize,
    /// Primes this rank found itself
    pub local_count: usize,
    /// Reduction rounds this rank took part in
    pub rounds: u32,
    /// Values received from partners during the reduction
    pub received: usize,
    /// Time spent testing candidates
    pub test_elapsed: Duration,
    /// Time spent from the count exchange to the end of the reduction
    pub reduce_elapsed: Duration,
}

/// What a rank ends up with after its pipeline finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerOutcome {
    /// Bound received in the broadcast
    pub bound: u64,
    /// Sorted odd primes; `Some` only on the rank still active at the end
    pub primes: Option<Vec<u64>>,
    /// Count vector from the exchange (empty when the run short-circuits)
    pub counts: CountVector,
    pub stats: WorkerStats,
}

/// One rank of the prime search
pub struct Worker<C: Communicator> {
    comm: C,
}

impl<C: Communicator> Worker<C> {
    /// Wrap a communicator endpoint
    pub fn new(comm: C) -> Self {
        Self { comm }
    }

    /// This worker's rank
    pub fn rank(&self) -> usize {
        self.comm.rank()
    }

    /// Run the pipeline
    ///
    /// Only rank 0's `bound` matters; other ranks receive it in the broadcast.
    /// Every rank checks the broadcast bound, so an invalid bound stops all of
    /// them before any work. A bound of 2 skips partitioning and merging: the
    /// root reports an empty odd list and the collector adds 2.
    pub fn run(self, bound: u64) -> Result<WorkerOutcome, PrimeError> {
        let rank = self.comm.rank();
        let workers = self.comm.size();
        let bound = self.comm.broadcast(ROOT, bound)?;

        let mut stats = WorkerStats {
            rank,
            ..Default::default()
        };

        if bound <= 1 {
            return Err(PrimeError::InvalidBound {
                bound: bound as i64,
            });
        }
        if bound == 2 {
            return Ok(WorkerOutcome {
                bound,
                primes: (rank == ROOT).then(Vec::new),
                counts: Vec::new(),
                stats,
            });
        }

        let limit = candidate_limit(bound);
        let test_start = Instant::now();
        stats.candidates = StridePartition::new(rank, workers, limit).capacity();
        let local = local_primes(rank, workers, limit);
        stats.test_elapsed = test_start.elapsed();
        stats.local_count = local.len();
        debug!(
            rank,
            candidates = stats.candidates,
            local_count = local.len(),
            "tested local candidates"
        );

        let reduce_start = Instant::now();
        let counts = self.comm.all_gather(local.len())?;
        let outcome = tree_reduce(&self.comm, &counts, local)?;
        stats.reduce_elapsed = reduce_start.elapsed();
        stats.rounds = outcome.rounds;
        stats.received = outcome.received;

        Ok(WorkerOutcome {
            bound,
            primes: outcome.primes,
            counts,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::ChannelWorld;
    use std::thread;

    fn run_world(workers: usize, bound: u64) -> Vec<Result<WorkerOutcome, PrimeError>> {
        let handles: Vec<_> = ChannelWorld::new(workers)
            .into_iter()
            .map(|comm| {
                // Non-root ranks pass a bogus bound; the broadcast overrides it
                let local_bound = if comm.rank() == ROOT { bound } else { 0 };
                thread::spawn(move || Worker::new(comm).run(local_bound))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    }

    #[test]
    fn test_four_workers_to_twenty() {
        let outcomes = run_world(4, 20);
        let root = outcomes[0].as_ref().unwrap();
        assert_eq!(root.primes, Some(vec![3, 5, 7, 11, 13, 17, 19]));
        assert_eq!(root.counts.iter().sum::<usize>(), 7);
        for outcome in &outcomes[1..] {
            let outcome = outcome.as_ref().unwrap();
            assert_eq!(outcome.bound, 20);
            assert!(outcome.primes.is_none());
        }
    }

    #[test]
    fn test_candidates_split_across_ranks() {
        let outcomes = run_world(3, 30);
        let tested: usize = outcomes
            .iter()
            .map(|o| o.as_ref().unwrap().stats.candidates)
            .sum();
        // Odd numbers in [3, 30]
        assert_eq!(tested, 14);
    }

    #[test]
    fn test_bound_two_short_circuits() {
        let outcomes = run_world(3, 2);
        let root = outcomes[0].as_ref().unwrap();
        assert_eq!(root.primes, Some(vec![]));
        assert!(root.counts.is_empty());
        assert_eq!(root.stats.candidates, 0);
        assert!(outcomes[1].as_ref().unwrap().primes.is_none());
    }

    #[test]
    fn test_bound_one_fails_on_every_rank() {
        for outcome in run_world(3, 1) {
            assert_eq!(outcome.unwrap_err(), PrimeError::InvalidBound { bound: 1 });
        }
    }
}

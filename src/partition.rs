//! Stride partitioning of odd candidates
//!
//! Worker `r` of `P` tests `2r + 3, 2r + 3 + 2P, 2r + 3 + 4P, ...` below an
//! exclusive limit. Offsets `2r` for `r` in `[0, P)` cover every residue of the
//! odd numbers modulo `2P` exactly once, so the union over all workers is every
//! odd integer in `[3, limit)` and no two workers share a candidate.
//!
//! Even integers are never handed out; the collector reports 2 on its own.

use crate::primality::is_prime;

/// Exclusive candidate limit for a user bound
///
/// The reported primes are `<= bound`, so the partitioner runs up to
/// `bound + 1`.
pub fn candidate_limit(bound: u64) -> u64 {
    bound.saturating_add(1)
}

/// Ascending odd candidates assigned to one worker
#[derive(Debug, Clone)]
pub struct StridePartition {
    /// Next candidate to yield
    next: u64,
    /// Distance between consecutive candidates (`2P`)
    stride: u64,
    /// Exclusive upper limit
    limit: u64,
}

impl StridePartition {
    /// Create the partition for `rank` out of `workers`, below `limit`
    pub fn new(rank: usize, workers: usize, limit: u64) -> Self {
        debug_assert!(workers > 0 && rank < workers);
        Self {
            next: 2 * rank as u64 + 3,
            stride: 2 * workers as u64,
            limit,
        }
    }

    /// Exact number of candidates this partition yields
    ///
    /// Used to size the local prime list up front instead of guessing.
    pub fn capacity(&self) -> usize {
        if self.next >= self.limit {
            return 0;
        }
        ((self.limit - 1 - self.next) / self.stride + 1) as usize
    }
}

impl Iterator for StridePartition {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next >= self.limit {
            return None;
        }
        let candidate = self.next;
        // Saturate so a limit near u64::MAX still terminates
        self.next = self.next.saturating_add(self.stride);
        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.capacity();
        (n, Some(n))
    }
}

/// Test every candidate of one partition and keep the primes, ascending
pub fn local_primes(rank: usize, workers: usize, limit: u64) -> Vec<u64> {
    let partition = StridePartition::new(rank, workers, limit);
    let mut primes = Vec::with_capacity(partition.capacity());
    primes.extend(partition.filter(|&i| is_prime(i)));
    primes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_stride_sequence() {
        let got: Vec<u64> = StridePartition::new(1, 3, 30).collect();
        assert_eq!(got, vec![5, 11, 17, 23, 29]);
    }

    #[test]
    fn test_single_worker_takes_every_odd() {
        let got: Vec<u64> = StridePartition::new(0, 1, 12).collect();
        assert_eq!(got, vec![3, 5, 7, 9, 11]);
    }

    #[test]
    fn test_limit_is_exclusive() {
        let got: Vec<u64> = StridePartition::new(0, 2, 7).collect();
        assert_eq!(got, vec![3]);
        let got: Vec<u64> = StridePartition::new(0, 2, 8).collect();
        assert_eq!(got, vec![3, 7]);
    }

    #[test]
    fn test_capacity_matches_count() {
        for workers in 1..=9 {
            for rank in 0..workers {
                for limit in 0..80 {
                    let partition = StridePartition::new(rank, workers, limit);
                    let capacity = partition.capacity();
                    assert_eq!(capacity, partition.count(), "rank {} of {}, limit {}", rank, workers, limit);
                }
            }
        }
    }

    #[test]
    fn test_union_covers_odds_without_duplicates() {
        for workers in 1..=10 {
            for limit in [0u64, 3, 4, 10, 21, 64, 257] {
                let mut seen = BTreeSet::new();
                for rank in 0..workers {
                    for candidate in StridePartition::new(rank, workers, limit) {
                        assert!(seen.insert(candidate), "{} assigned twice (P = {})", candidate, workers);
                    }
                }
                let expected: BTreeSet<u64> = (3..limit).filter(|i| i % 2 == 1).collect();
                assert_eq!(seen, expected, "P = {}, limit = {}", workers, limit);
            }
        }
    }

    #[test]
    fn test_more_workers_than_candidates() {
        // Ranks past the last odd number get nothing
        assert_eq!(StridePartition::new(7, 8, 10).capacity(), 0);
        assert!(local_primes(7, 8, 10).is_empty());
    }

    #[test]
    fn test_local_primes_sorted() {
        let primes = local_primes(0, 2, candidate_limit(40));
        assert_eq!(primes, vec![3, 7, 11, 19, 23, 31]);
        assert!(primes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_candidate_limit_includes_bound() {
        assert_eq!(candidate_limit(7), 8);
        assert_eq!(candidate_limit(u64::MAX), u64::MAX);
    }
}

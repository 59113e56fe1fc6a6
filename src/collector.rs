//! Result collection
//!
//! The rank that ends the reduction active owns the merged odd primes. The
//! collector adds the even prime and the title; it does no other work.

use crate::error::PrimeError;
use crate::worker::WorkerStats;
use std::time::Duration;

/// Final answer of one run
#[derive(Debug, Clone, PartialEq)]
pub struct PrimeReport {
    /// Input bound
    pub bound: u64,
    /// Every prime `<= bound`, ascending, starting with 2
    pub primes: Vec<u64>,
    /// Per-rank statistics, ordered by rank
    pub workers: Vec<WorkerStats>,
    /// Wall time from launch to the last join
    pub elapsed: Duration,
}

impl PrimeReport {
    /// Build the report from the root's merged odd primes
    ///
    /// # Example
    ///
    /// ```
    /// use primepulse::collector::PrimeReport;
    /// use std::time::Duration;
    ///
    /// let report = PrimeReport::collect(10, vec![3, 5, 7], vec![], Duration::ZERO)?;
    /// assert_eq!(report.line(), "The primes <= 10 are: 2 3 5 7");
    /// # Ok::<(), primepulse::error::PrimeError>(())
    /// ```
    pub fn collect(
        bound: u64,
        odd_primes: Vec<u64>,
        workers: Vec<WorkerStats>,
        elapsed: Duration,
    ) -> Result<Self, PrimeError> {
        if bound < 2 {
            return Err(PrimeError::InvalidBound {
                bound: bound as i64,
            });
        }

        let mut primes = Vec::with_capacity(odd_primes.len() + 1);
        primes.push(2);
        primes.extend(odd_primes);

        Ok(Self {
            bound,
            primes,
            workers,
            elapsed,
        })
    }

    /// Title that precedes the list
    pub fn title(&self) -> String {
        format!("The primes <= {} are:", self.bound)
    }

    /// The single output line: title, then the primes separated by spaces
    pub fn line(&self) -> String {
        let mut line = self.title();
        for prime in &self.primes {
            line.push(' ');
            line.push_str(&prime.to_string());
        }
        line
    }
}

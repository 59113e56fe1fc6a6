//! Error taxonomy
//!
//! Only the bound errors are user-facing. Every other variant is an
//! internal consistency violation: once a rank observes one, the run is over.

use thiserror::Error;

/// Errors raised while distributing, exchanging, or merging prime lists
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimeError {
    /// No bound was given on the command line or in the config file
    #[error("no bound given")]
    MissingBound,

    /// The input bound is below the smallest prime
    #[error("bound must be at least 2, got {bound}")]
    InvalidBound { bound: i64 },

    /// A rank outside `[0, P)` was addressed
    #[error("rank {rank} is out of range for {workers} workers")]
    InvalidRank { rank: usize, workers: usize },

    /// A transfer carried a different number of values than the count vector promised
    #[error("transfer from rank {from} carried {actual} values, expected {expected}")]
    TransferSizeMismatch {
        from: usize,
        expected: usize,
        actual: usize,
    },

    /// A peer sent a message of the wrong kind for the current phase
    #[error("expected {expected} message from rank {from}, got {got}")]
    UnexpectedMessage {
        from: usize,
        expected: &'static str,
        got: &'static str,
    },

    /// A peer dropped its endpoint before the exchange finished
    #[error("rank {peer} disconnected")]
    Disconnected { peer: usize },

    /// A worker thread panicked
    #[error("worker {rank} panicked")]
    WorkerPanicked { rank: usize },
}

impl PrimeError {
    /// True for the configuration error path (usage message, no computation)
    pub fn is_usage(&self) -> bool {
        matches!(self, PrimeError::MissingBound | PrimeError::InvalidBound { .. })
    }
}

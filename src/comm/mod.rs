//! Message-passing runtime
//!
//! Workers never share memory. Everything they learn about each other goes
//! through a [`Communicator`]: one broadcast of the bound, one all-gather of
//! local counts, and the paired sends/receives of the tree reduction.
//!
//! # Modules
//!
//! - `protocol`: message definitions
//! - `channel`: in-process backend, one crossbeam channel per ordered rank pair

pub mod channel;
pub mod protocol;

pub use channel::{ChannelCommunicator, ChannelWorld};
pub use protocol::Message;

use crate::error::PrimeError;

/// Original local list length of every rank, indexed by rank
///
/// Filled once by [`Communicator::all_gather`] and read-only afterwards.
pub type CountVector = Vec<usize>;

/// Collective and point-to-point operations available to one rank
///
/// Receives are matched by source rank, so a message from rank `a` is never
/// delivered to a receive posted for rank `b`. No operation has a timeout: a
/// peer that never sends blocks the receiver for good.
pub trait Communicator: Send {
    /// This worker's rank in `[0, size())`
    fn rank(&self) -> usize;

    /// Total number of workers
    fn size(&self) -> usize;

    /// Distribute a value from `root` to every rank
    ///
    /// Only the root's `value` is used; every rank returns it.
    fn broadcast(&self, root: usize, value: u64) -> Result<u64, PrimeError>;

    /// Contribute `value` and receive every rank's contribution in rank order
    fn all_gather(&self, value: usize) -> Result<CountVector, PrimeError>;

    /// Hand a sorted list to `to`; the buffer moves with the message
    fn send(&self, to: usize, primes: Vec<u64>) -> Result<(), PrimeError>;

    /// Receive exactly `expected` values from `from`
    ///
    /// Any other length is a [`PrimeError::TransferSizeMismatch`].
    fn receive(&self, from: usize, expected: usize) -> Result<Vec<u64>, PrimeError>;
}

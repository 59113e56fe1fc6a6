//! Tree reduction merger
//!
//! Every rank runs [`tree_reduce`] on its own sorted list. Each round halves
//! the set of active ranks: senders hand their whole list to a partner and
//! drop out, receivers merge what arrives into their own list. After
//! `log2(next_power_of_two(P))` rounds only rank 0 is active and it holds every
//! prime in ascending order. No rank ever gathers unsorted data.
//!
//! Receive sizes always come from the count vector. A receiver never guesses
//! from a uniform group size, which is what keeps non-power-of-two worker
//! counts correct.
//!
//! # Modules
//!
//! - `merge`: two-pointer merge into a reusable buffer
//! - `topology`: roles, partners and receive sizes as pure functions

pub mod merge;
pub mod topology;

use crate::comm::Communicator;
use crate::error::PrimeError;
use merge::merge_into;
use std::mem;
use topology::{expected_receive_count, next_power_of_two, partner_for, round_count, Role};
use tracing::debug;

/// Per-rank state carried across reduction rounds
#[derive(Debug)]
pub struct ReductionState {
    /// Group size of the current round (always `2 * step_distance`)
    pub divisor: usize,
    /// Rank distance between a receiver and its partner
    pub step_distance: usize,
    /// False once this rank has handed its list on
    pub active: bool,
    /// Sorted primes currently owned by this rank
    pub list: Vec<u64>,
    /// Merge target, swapped with `list` after every merge
    scratch: Vec<u64>,
    /// Worst-case merged length (sum of all original counts)
    capacity: usize,
    /// Rounds this rank took part in, as sender or receiver
    rounds: u32,
    /// Values received over all rounds
    received: usize,
}

impl ReductionState {
    /// Start a reduction from this rank's own sorted list
    pub fn new(list: Vec<u64>, capacity: usize) -> Self {
        Self {
            divisor: 2,
            step_distance: 1,
            active: true,
            list,
            scratch: Vec::new(),
            capacity,
            rounds: 0,
            received: 0,
        }
    }

    /// Run one round for this rank
    ///
    /// Blocks on the partner when this rank receives.
    pub fn step<C>(&mut self, comm: &C, counts: &[usize]) -> Result<(), PrimeError>
    where
        C: Communicator + ?Sized,
    {
        let rank = comm.rank();
        let group_position = rank % self.divisor;

        match partner_for(rank, self.step_distance, group_position, comm.size()) {
            Role::Send { to } => {
                let list = mem::take(&mut self.list);
                debug!(
                    rank,
                    to,
                    count = list.len(),
                    step_distance = self.step_distance,
                    "sending primes"
                );
                comm.send(to, list)?;
                self.active = false;
                self.rounds += 1;
            }
            Role::Receive { from } => {
                let expected = expected_receive_count(counts, from, self.step_distance);
                let received = comm.receive(from, expected)?;
                debug!(
                    rank,
                    from,
                    count = received.len(),
                    step_distance = self.step_distance,
                    "received primes"
                );

                // Grow both buffers once so later swaps never reallocate
                self.list.reserve(self.capacity.saturating_sub(self.list.len()));
                self.scratch.reserve(self.capacity.saturating_sub(self.scratch.len()));

                merge_into(&self.list, &received, &mut self.scratch);
                mem::swap(&mut self.list, &mut self.scratch);
                self.scratch.clear();

                self.received += received.len();
                self.rounds += 1;
                debug!(rank, count = self.list.len(), "merged");
            }
            Role::Idle => {
                debug!(rank, step_distance = self.step_distance, "no partner this round");
            }
        }

        self.divisor *= 2;
        self.step_distance *= 2;
        Ok(())
    }
}

/// Result of one rank's reduction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionOutcome {
    /// Merged list, present only on the rank still active at the end
    pub primes: Option<Vec<u64>>,
    /// Rounds this rank took part in
    pub rounds: u32,
    /// Values this rank received in total
    pub received: usize,
}

/// Run the full reduction for one rank
///
/// `counts` must be the complete count vector from the all-gather; `local` is
/// this rank's own sorted list and its length must equal `counts[rank]`.
pub fn tree_reduce<C>(comm: &C, counts: &[usize], local: Vec<u64>) -> Result<ReductionOutcome, PrimeError>
where
    C: Communicator + ?Sized,
{
    debug_assert_eq!(counts.len(), comm.size());
    debug_assert_eq!(counts.get(comm.rank()), Some(&local.len()));

    let last_divisor = next_power_of_two(comm.size());
    let mut state = ReductionState::new(local, counts.iter().sum());

    while state.active && state.divisor <= last_divisor {
        state.step(comm, counts)?;
    }

    // The surviving rank has a partner in every round
    debug_assert!(!state.active || state.rounds == round_count(comm.size()));

    Ok(ReductionOutcome {
        primes: state.active.then_some(state.list),
        rounds: state.rounds,
        received: state.received,
    })
}

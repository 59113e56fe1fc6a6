//! Reduction topology
//!
//! Pure arithmetic for the recursive-doubling tree, kept apart from the
//! send/receive code so it can be checked exhaustively.
//!
//! At round `k` (`step_distance = 2^k`, `divisor = 2^(k+1)`) ranks form groups
//! of `divisor`. The rank at position `step_distance` of a group hands its list
//! to the rank at position 0 and leaves; every other still-active rank is a
//! receiver and is paired with `rank + step_distance` when that rank exists.

/// Smallest power of two `>= workers` (1 for zero or one worker)
pub fn next_power_of_two(workers: usize) -> usize {
    workers.max(1).next_power_of_two()
}

/// Number of rounds the reduction runs for `workers` ranks
pub fn round_count(workers: usize) -> u32 {
    next_power_of_two(workers).trailing_zeros()
}

/// What a rank does in one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Hand the current list to `to` and become inactive
    Send { to: usize },
    /// Receive from `from` and merge
    Receive { from: usize },
    /// Receiver without a partner this round; carries its list forward
    Idle,
}

/// Decide a rank's role from its position within the current group
///
/// `group_position` is `rank % divisor`. Any non-zero position means this rank
/// sends; among active ranks that position is always exactly `step_distance`.
pub fn partner_for(rank: usize, step_distance: usize, group_position: usize, workers: usize) -> Role {
    if group_position != 0 {
        return Role::Send {
            to: rank - step_distance,
        };
    }

    match rank.checked_add(step_distance) {
        Some(partner) if partner < workers => Role::Receive { from: partner },
        _ => Role::Idle,
    }
}

/// Number of values a receiver must expect from `partner`
///
/// By the time `partner` sends, it holds the original lists of every rank in
/// `[partner, partner + step_distance)` clipped to the worker count, and
/// nothing else.
pub fn expected_receive_count(counts: &[usize], partner: usize, step_distance: usize) -> usize {
    let start = partner.min(counts.len());
    let end = partner.saturating_add(step_distance).min(counts.len());
    counts[start..end].iter().sum()
}

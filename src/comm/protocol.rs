//! Messages exchanged between worker ranks
//!
//! # Message Flow
//!
//! ```text
//! rank 0                 rank r (r > 0)
//!   |                        |
//!   |------ BOUND(n) ------->|        broadcast
//!   |                        |
//!   |<----- COUNT(c_r) ----->|        all-gather (every pair, both ways)
//!   |                        |
//!   |<----- PRIMES([..]) ----|        one per reduction round, sender to receiver
//! ```
//!
//! The channel backend moves these as typed values. The serde form is the
//! JSON shape logged for each send at trace level.

use serde::{Deserialize, Serialize};

/// Message between two ranks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Input bound, broadcast from the root
    Bound(u64),
    /// Original local list length, exchanged during the all-gather
    Count(usize),
    /// Sorted primes handed to the receiver of a reduction round
    Primes(Vec<u64>),
}

impl Message {
    /// Short name used in error reports
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Bound(_) => "BOUND",
            Message::Count(_) => "COUNT",
            Message::Primes(_) => "PRIMES",
        }
    }
}

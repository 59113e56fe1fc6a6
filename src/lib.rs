//! PrimePulse - parallel prime finder
//!
//! PrimePulse finds every prime up to a bound N with P cooperating workers
//! that share no memory and talk only through message passing.
//!
//! # Architecture
//!
//! - **Stride partitioning**: worker `r` tests the odd candidates `2r + 3 + 2kP`
//! - **Trial division**: exact primality test up to the integer square root
//! - **Count exchange**: all-gather of local result sizes
//! - **Tree reduction**: recursive-doubling merge of sorted lists into rank 0
//! - **Collector**: prepends 2 and emits the result line

pub mod collector;
pub mod comm;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod output;
pub mod partition;
pub mod primality;
pub mod reduce;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use collector::PrimeReport;
pub use config::Config;
pub use coordinator::Coordinator;
pub use error::PrimeError;

/// Result type used throughout PrimePulse
pub type Result<T> = anyhow::Result<T>;

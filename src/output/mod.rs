//! Result output
//!
//! - `text`: the result line on stdout and an optional per-worker summary
//! - `json`: machine-readable report file

pub mod json;
pub mod text;

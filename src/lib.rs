//! hashbench: pluggable consistent-hashing strategies and the churn
//! benchmark harness used to compare them.
//!
//! See `DESIGN.md` for the measurement methodology and per-strategy notes.

pub mod error;
pub mod harness;
pub mod registry;
pub mod strategy;

pub mod prelude;
pub mod traits;

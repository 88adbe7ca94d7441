//! The evaluation framework: configuration, synthetic identities, the
//! churn-and-stability trial protocol, the concurrent load generator, the
//! distribution scorer, and report rendering.
//!
//! Control flow per trial:
//!
//! ```text
//!   populate ─► sanity check ─► baseline snapshot ─► measure (concurrent)
//!       │                                                │
//!       ▼                                                ▼
//!   scale-up ─► add-stability ─► scale-down ─► remove-stability
//!       │
//!       ▼
//!   full turnover ─► re-measure (concurrent)
//! ```
//!
//! Phases run strictly in sequence; only the two measurement windows are
//! internally concurrent. All randomness flows from the trial seed so runs
//! are reproducible and trials are independently re-runnable.

pub mod config;
pub mod keys;
pub mod loadgen;
pub mod protocol;
pub mod report;
pub mod scorer;

//! Error types for the benchmark harness.
//!
//! ## Key Components
//!
//! - [`NonDeterminismError`]: Returned when a strategy fails the pre-trial
//!   sanity check (same key, unchanged bucket set, different answers). A
//!   correctness failure, not a performance one — the affected trial is
//!   skipped and the suite continues.
//! - [`ConfigError`]: Returned when trial configuration parameters are
//!   invalid (e.g. zero sample size, negative churn factor).
//!
//! ## Example Usage
//!
//! ```
//! use hashbench::error::ConfigError;
//! use hashbench::harness::config::TrialConfig;
//!
//! let ok = TrialConfig::default();
//! assert!(ok.validate().is_ok());
//!
//! // Invalid parameters are caught without panicking.
//! let bad = TrialConfig {
//!     sample_size: 0,
//!     ..TrialConfig::default()
//! };
//! assert!(bad.validate().is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// NonDeterminismError
// ---------------------------------------------------------------------------

/// Error returned when a strategy gives inconsistent answers for a fixed key
/// over an unchanged bucket set.
///
/// Carries enough context to report which strategy misbehaved and how. The
/// outer experiment loop treats this as trial-local: other strategies and
/// bucket counts continue to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonDeterminismError {
    /// Registry id of the offending strategy.
    pub strategy: String,
    /// The probe key that produced conflicting answers.
    pub key: String,
    /// Bucket returned by the first `get`.
    pub first: Option<String>,
    /// Conflicting bucket returned by a later `get`.
    pub conflicting: Option<String>,
    /// Which repetition (0-based) observed the conflict.
    pub iteration: usize,
}

impl fmt::Display for NonDeterminismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "strategy `{}` is non-deterministic: key {:?} first mapped to {:?}, \
             but iteration {} returned {:?}",
            self.strategy, self.key, self.first, self.iteration, self.conflicting
        )
    }
}

impl std::error::Error for NonDeterminismError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when trial configuration parameters are invalid.
///
/// Produced by [`TrialConfig::validate`](crate::harness::config::TrialConfig::validate);
/// the `Display` text names the offending parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    reason: &'static str,
}

impl ConfigError {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

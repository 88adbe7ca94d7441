//! Trial configuration.
//!
//! A `TrialConfig` is an explicit context object handed through every phase
//! of a run; nothing in the harness reads ambient global state. The defaults
//! reproduce the reference configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a benchmark suite run.
///
/// # Example
///
/// ```
/// use hashbench::harness::config::TrialConfig;
///
/// let config = TrialConfig {
///     bucket_counts: vec![10, 100],
///     sample_size: 10_000,
///     ..TrialConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TrialConfig {
    /// Initial bucket counts to try, one trial per count.
    pub bucket_counts: Vec<usize>,
    /// Fraction of the initial count added and later removed per churn event.
    pub change_factor: f64,
    /// Keys captured in the baseline mapping snapshot.
    pub sample_size: usize,
    /// Repeated `get` calls in the pre-trial determinism check.
    pub sanity_iterations: usize,
    /// Concurrent workers in each measurement window.
    pub workers: usize,
    /// Wall-clock length of each measurement window.
    pub measure_duration: Duration,
    /// Optional per-worker pacing toward a target request rate (requests per
    /// second per worker). `None` runs unpaced.
    pub target_rate: Option<u64>,
    /// Root seed; per-trial and per-worker seeds derive from it.
    pub seed: u64,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            bucket_counts: vec![10, 100, 1000],
            change_factor: 0.5,
            sample_size: 100_000,
            sanity_iterations: 1000,
            workers: 8,
            measure_duration: Duration::from_secs(1),
            target_rate: None,
            seed: 42,
        }
    }
}

impl TrialConfig {
    /// Checks parameter sanity; the suite runner refuses to start on `Err`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_counts.is_empty() {
            return Err(ConfigError::new("bucket_counts must not be empty"));
        }
        if self.bucket_counts.contains(&0) {
            return Err(ConfigError::new("bucket_counts entries must be non-zero"));
        }
        if self.sample_size == 0 {
            return Err(ConfigError::new("sample_size must be non-zero"));
        }
        if self.sanity_iterations == 0 {
            return Err(ConfigError::new("sanity_iterations must be non-zero"));
        }
        if self.workers == 0 {
            return Err(ConfigError::new("workers must be non-zero"));
        }
        if self.measure_duration.is_zero() {
            return Err(ConfigError::new("measure_duration must be non-zero"));
        }
        if !self.change_factor.is_finite() || self.change_factor < 0.0 {
            return Err(ConfigError::new(
                "change_factor must be finite and non-negative",
            ));
        }
        if self.target_rate == Some(0) {
            return Err(ConfigError::new("target_rate must be non-zero when set"));
        }
        Ok(())
    }

    /// Buckets added (and later removed) per churn event for an initial
    /// count of `n`.
    pub fn change_count(&self, n: usize) -> usize {
        (n as f64 * self.change_factor).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(TrialConfig::default().validate().is_ok());
    }

    #[test]
    fn change_count_rounds() {
        let config = TrialConfig::default();
        assert_eq!(config.change_count(10), 5);
        assert_eq!(config.change_count(100), 50);
        assert_eq!(config.change_count(1), 1); // 0.5 rounds up
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let base = TrialConfig::default();

        let mut c = base.clone();
        c.bucket_counts.clear();
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.sample_size = 0;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.workers = 0;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.change_factor = f64::NAN;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.change_factor = -0.5;
        assert!(c.validate().is_err());

        let mut c = base;
        c.target_rate = Some(0);
        assert!(c.validate().is_err());
    }
}

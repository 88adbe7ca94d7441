//! Load-distribution statistics over per-bucket hit counts.
//!
//! The primary uniformity score is the coefficient of variation
//! (stddev / mean): scale-free, 0 for perfect uniformity, lower is better.
//! Standard deviation is the population form (divisor n, not n−1) — the hit
//! table is the whole population of buckets, not a sample from one.
//!
//! Degenerate inputs never leak NaN into a report: an empty table yields
//! `None` (explicitly rendered as "no data"), a single bucket scores
//! stddev 0 / cov 0, and an all-zero table scores cov 0.

/// Distribution statistics for one measurement window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionStats {
    pub mean: f64,
    pub std_dev: f64,
    /// Coefficient of variation: `std_dev / mean`, 0 when the mean is 0.
    pub cov: f64,
    pub min: u64,
    pub max: u64,
}

impl DistributionStats {
    /// Computes statistics over per-bucket hit counts.
    ///
    /// Returns `None` for an empty table — zero recorded buckets has no
    /// defined distribution and must be reported as such rather than
    /// produce garbage.
    ///
    /// # Example
    ///
    /// ```
    /// use hashbench::harness::scorer::DistributionStats;
    ///
    /// let stats = DistributionStats::from_counts(&[100, 0]).unwrap();
    /// assert_eq!(stats.mean, 50.0);
    /// assert_eq!(stats.std_dev, 50.0);
    /// assert_eq!(stats.cov, 1.0);
    ///
    /// assert!(DistributionStats::from_counts(&[]).is_none());
    /// ```
    pub fn from_counts(counts: &[u64]) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }

        let n = counts.len() as f64;
        let sum: u64 = counts.iter().sum();
        let mean = sum as f64 / n;

        let variance = counts
            .iter()
            .map(|&c| {
                let d = c as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();
        let cov = if mean == 0.0 { 0.0 } else { std_dev / mean };

        Some(Self {
            mean,
            std_dev,
            cov,
            min: counts.iter().copied().min().unwrap_or(0),
            max: counts.iter().copied().max().unwrap_or(0),
        })
    }
}

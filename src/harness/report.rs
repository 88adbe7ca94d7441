//! Trial results and textual report rendering.
//!
//! Rendering is plain fixed-width text, one summary row per trial plus an
//! optional per-trial detail block. A trial that failed the determinism
//! check still appears in the table, marked skipped — the benchmark's job is
//! to surface comparative data, including the fact that a strategy
//! misbehaves.

use std::fmt::Write as _;
use std::time::Duration;

use crate::error::NonDeterminismError;
use crate::harness::loadgen::{LoadStats, UNASSIGNED};
use crate::harness::scorer::DistributionStats;

/// One measurement window, reduced for reporting.
#[derive(Debug, Clone)]
pub struct MeasureWindow {
    /// Total `get` calls issued.
    pub calls: u64,
    /// Wall-clock window length.
    pub elapsed: Duration,
    /// Mean in-call latency, nanoseconds.
    pub ns_per_op: f64,
    /// Wall-clock throughput, calls per second.
    pub calls_per_sec: f64,
    /// Load distribution over registered buckets; `None` when the window
    /// recorded no bucket hits.
    pub distribution: Option<DistributionStats>,
}

impl MeasureWindow {
    /// Reduces raw load-generator output. The `(unassigned)` label is
    /// excluded from the distribution — it is not a bucket — but stays in
    /// the call total so a misbehaving strategy remains visible.
    pub fn from_load(stats: &LoadStats) -> Self {
        let counts: Vec<u64> = stats
            .hits
            .iter()
            .filter(|(label, _)| label.as_str() != UNASSIGNED)
            .map(|(_, &count)| count)
            .collect();
        Self {
            calls: stats.total_calls,
            elapsed: stats.elapsed,
            ns_per_op: stats.mean_ns_per_op,
            calls_per_sec: stats.calls_per_sec(),
            distribution: DistributionStats::from_counts(&counts),
        }
    }
}

/// Fraction of snapshot keys that kept their original bucket after a churn
/// event.
#[derive(Debug, Clone, Copy)]
pub struct StabilityRatio {
    pub retained: usize,
    pub total: usize,
}

impl StabilityRatio {
    /// Retained keys as a percentage; 0 for an empty snapshot.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.retained as f64 / self.total as f64 * 100.0
        }
    }
}

/// Complete results for one (strategy, initial-bucket-count) trial.
#[derive(Debug, Clone)]
pub struct TrialReport {
    /// Registry id of the strategy.
    pub strategy_id: &'static str,
    /// Human-readable strategy name.
    pub strategy: &'static str,
    /// Initial bucket count N.
    pub initial_buckets: usize,
    /// Buckets added, then removed, per churn event.
    pub change_count: usize,
    /// Steady-state measurement window (pre-churn).
    pub steady: MeasureWindow,
    /// Wall-clock time of the scale-up adds.
    pub add_elapsed: Duration,
    /// Stability after scale-up.
    pub add_stability: StabilityRatio,
    /// Wall-clock time of the scale-down removes.
    pub remove_elapsed: Duration,
    /// Stability after scale-down, against the same original snapshot.
    pub remove_stability: StabilityRatio,
    /// Measurement window after full bucket turnover.
    pub turnover: MeasureWindow,
    /// Theoretical minimal remap fraction for the scale-up event:
    /// `change_count / (N + change_count)`.
    pub expected_remap: f64,
}

impl TrialReport {
    /// Expected add-stability percentage for a minimal-disruption strategy.
    pub fn expected_add_stability_percent(&self) -> f64 {
        (1.0 - self.expected_remap) * 100.0
    }

    /// Single-line summary.
    pub fn summary(&self) -> String {
        let cov = self
            .steady
            .distribution
            .map_or_else(|| "n/a".to_owned(), |d| format!("{:.4}", d.cov));
        format!(
            "{}/{} buckets: cov={} {:.1}ns/op add-stab={:.2}% rem-stab={:.2}% (ideal {:.2}%)",
            self.strategy_id,
            self.initial_buckets,
            cov,
            self.steady.ns_per_op,
            self.add_stability.percent(),
            self.remove_stability.percent(),
            self.expected_add_stability_percent(),
        )
    }

    /// Multi-line detail block for one trial.
    pub fn render_detail(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} — {} buckets", self.strategy, self.initial_buckets);
        let _ = writeln!(
            out,
            "  steady:   {} calls in {:.2?} ({:.0} calls/s, {:.1} ns/op)",
            self.steady.calls, self.steady.elapsed, self.steady.calls_per_sec, self.steady.ns_per_op,
        );
        match self.steady.distribution {
            Some(d) => {
                let _ = writeln!(
                    out,
                    "  distribution: cov {:.4}, mean {:.0}, stddev {:.0}, min {}, max {}",
                    d.cov, d.mean, d.std_dev, d.min, d.max,
                );
            },
            None => {
                let _ = writeln!(out, "  distribution: no data");
            },
        }
        let _ = writeln!(
            out,
            "  adding {} buckets took {:.2?}; {}/{} keys retained ({:.2}%, ideal {:.2}%)",
            self.change_count,
            self.add_elapsed,
            self.add_stability.retained,
            self.add_stability.total,
            self.add_stability.percent(),
            self.expected_add_stability_percent(),
        );
        let _ = writeln!(
            out,
            "  removing {} buckets took {:.2?}; {}/{} keys retained ({:.2}%)",
            self.change_count,
            self.remove_elapsed,
            self.remove_stability.retained,
            self.remove_stability.total,
            self.remove_stability.percent(),
        );
        let _ = writeln!(
            out,
            "  post-turnover: {} calls ({:.1} ns/op)",
            self.turnover.calls, self.turnover.ns_per_op,
        );
        out
    }
}

/// Outcome of one trial slot: a report, or the fault that skipped it.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub strategy_id: &'static str,
    pub strategy: &'static str,
    pub initial_buckets: usize,
    pub result: Result<TrialReport, NonDeterminismError>,
}

/// Renders the whole suite as a fixed-width comparison table.
pub fn render_suite(outcomes: &[TrialOutcome]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<28} {:>8} {:>9} {:>10} {:>10} {:>10} {:>10}",
        "Strategy", "Buckets", "CoV", "ns/op", "add-stab%", "rem-stab%", "ideal%"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                let cov = report
                    .steady
                    .distribution
                    .map_or_else(|| "n/a".to_owned(), |d| format!("{:.4}", d.cov));
                let _ = writeln!(
                    out,
                    "{:<28} {:>8} {:>9} {:>10.1} {:>10.2} {:>10.2} {:>10.2}",
                    report.strategy,
                    report.initial_buckets,
                    cov,
                    report.steady.ns_per_op,
                    report.add_stability.percent(),
                    report.remove_stability.percent(),
                    report.expected_add_stability_percent(),
                );
            },
            Err(err) => {
                let _ = writeln!(
                    out,
                    "{:<28} {:>8}   skipped: {}",
                    outcome.strategy, outcome.initial_buckets, err,
                );
            },
        }
    }
    out
}

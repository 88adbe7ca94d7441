//! Concurrent load generator.
//!
//! Drives a time-bounded volume of `get` calls against one shared strategy
//! instance from `workers` scoped threads. The harness adds no locking of
//! its own around `get` — whatever concurrency discipline the strategy
//! carries internally is exactly what gets measured. Aggregation uses
//! concurrency-safe structures only: a sharded concurrent map for the
//! per-bucket hit table and atomic counters for totals, so no update is
//! lost (the sum of the hit table equals the number of calls issued).
//!
//! Workers observe a shared deadline, stop issuing calls once it elapses,
//! and the scope join guarantees the window is fully quiesced before the
//! protocol moves on. Optional pacing sleeps each worker toward a target
//! per-worker request rate; the delay is cooperative and does not affect
//! correctness.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use crate::harness::keys::hex_key;
use crate::traits::BucketRouter;

/// Hit-table label for lookups that returned `None` mid-window. Should never
/// appear while buckets are registered; kept visible rather than dropped so a
/// misbehaving strategy surfaces in the report.
pub const UNASSIGNED: &str = "(unassigned)";

/// Aggregated results of one measurement window.
#[derive(Debug, Clone)]
pub struct LoadStats {
    /// Total `get` calls issued across all workers.
    pub total_calls: u64,
    /// Wall-clock length of the window.
    pub elapsed: Duration,
    /// Mean in-call latency in nanoseconds.
    pub mean_ns_per_op: f64,
    /// Per-bucket hit counts.
    pub hits: FxHashMap<String, u64>,
}

impl LoadStats {
    /// Wall-clock throughput in calls per second.
    pub fn calls_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.total_calls as f64 / secs
        }
    }
}

/// Runs one measurement window against `router`.
///
/// Each worker draws keys from its own RNG (seeded from `seed` and the
/// worker index, so windows are reproducible) and accumulates into the
/// shared hit table.
pub fn run_load(
    router: &dyn BucketRouter,
    workers: usize,
    duration: Duration,
    target_rate: Option<u64>,
    seed: u64,
) -> LoadStats {
    let hit_table: DashMap<String, u64> = DashMap::new();
    let total_calls = AtomicU64::new(0);
    let call_nanos = AtomicU64::new(0);

    // f64 division: a u32 cast would wrap large rates to 0 and panic in the
    // Duration division.
    let pace = target_rate.map(|rate| Duration::from_secs(1).div_f64(rate.max(1) as f64));
    let start = Instant::now();
    let deadline = start + duration;

    thread::scope(|scope| {
        for worker in 0..workers {
            let hit_table = &hit_table;
            let total_calls = &total_calls;
            let call_nanos = &call_nanos;
            let mut rng =
                SmallRng::seed_from_u64(seed ^ (worker as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));

            scope.spawn(move || {
                while Instant::now() < deadline {
                    let key = hex_key(&mut rng);

                    let before = Instant::now();
                    let bucket = router.get(&key);
                    call_nanos.fetch_add(before.elapsed().as_nanos() as u64, Ordering::Relaxed);

                    let label = bucket.unwrap_or_else(|| UNASSIGNED.to_owned());
                    *hit_table.entry(label).or_insert(0) += 1;
                    total_calls.fetch_add(1, Ordering::Relaxed);

                    if let Some(pause) = pace {
                        thread::sleep(pause);
                    }
                }
            });
        }
    });

    let elapsed = start.elapsed();
    let total = total_calls.load(Ordering::Relaxed);
    let mean_ns_per_op = if total == 0 {
        0.0
    } else {
        call_nanos.load(Ordering::Relaxed) as f64 / total as f64
    };

    let hits: FxHashMap<String, u64> = hit_table.into_iter().collect();

    LoadStats {
        total_calls: total,
        elapsed,
        mean_ns_per_op,
        hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::ring::RingRouter;
    use crate::traits::BucketRouter as _;

    fn populated_ring(n: usize) -> RingRouter {
        let mut ring = RingRouter::new(100);
        for i in 0..n {
            ring.add(&format!("192.168.0.{i}"));
        }
        ring
    }

    #[test]
    fn hit_table_sums_to_total_calls() {
        let ring = populated_ring(10);
        let stats = run_load(&ring, 4, Duration::from_millis(50), None, 42);

        assert!(stats.total_calls > 0);
        let summed: u64 = stats.hits.values().sum();
        assert_eq!(summed, stats.total_calls);
    }

    #[test]
    fn all_hits_land_on_registered_buckets() {
        let ring = populated_ring(10);
        let stats = run_load(&ring, 4, Duration::from_millis(50), None, 42);

        for label in stats.hits.keys() {
            assert_ne!(label, UNASSIGNED);
            assert!(label.starts_with("192.168.0."));
        }
    }

    #[test]
    fn empty_registry_counts_under_unassigned() {
        let ring = RingRouter::new(100);
        let stats = run_load(&ring, 2, Duration::from_millis(20), None, 42);

        assert!(stats.total_calls > 0);
        assert_eq!(stats.hits.len(), 1);
        assert!(stats.hits.contains_key(UNASSIGNED));
    }

    #[test]
    fn pacing_caps_throughput() {
        let ring = populated_ring(4);
        // 100 calls/s per worker × 2 workers × 0.1 s ≈ 20 calls; allow wide
        // slack for scheduling noise.
        let stats = run_load(&ring, 2, Duration::from_millis(100), Some(100), 42);
        assert!(stats.total_calls <= 60, "paced window issued {}", stats.total_calls);
    }

    #[test]
    fn huge_target_rate_runs_unthrottled() {
        // Rates past u32::MAX (valid per TrialConfig::validate) pace to a
        // sub-nanosecond sleep, never a panicking zero divisor.
        let ring = populated_ring(4);
        let stats = run_load(&ring, 1, Duration::from_millis(10), Some(1u64 << 32), 1);
        assert!(stats.total_calls > 0);
    }
}

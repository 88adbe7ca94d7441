//! The churn-and-stability trial protocol.
//!
//! One trial exercises one fresh strategy instance at one initial bucket
//! count through ten strictly ordered phases:
//!
//! 1.  populate N synthetic buckets
//! 2.  determinism sanity check (correctness gate, not a measurement)
//! 3.  baseline mapping snapshot over `sample_size` random keys
//! 4.  concurrent throughput window → distribution scorer
//! 5.  scale-up: add `round(N × change_factor)` fresh buckets (timed)
//! 6.  add-stability: snapshot keys still on their original bucket
//! 7.  scale-down: remove as many randomly chosen buckets (timed)
//! 8.  remove-stability against the same original snapshot
//! 9.  full turnover: remove everything, add fresh identities
//! 10. concurrent re-measurement over the turned-over set
//!
//! Churn is always issued from this single orchestrating sequence; the
//! `&mut` receiver on `add`/`remove` makes overlap with the concurrent
//! windows unrepresentable. Faults are trial-local: a non-deterministic
//! strategy yields an `Err` outcome and the suite moves on.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::{ConfigError, NonDeterminismError};
use crate::harness::config::TrialConfig;
use crate::harness::keys::{bucket_ip, hex_key, initial_buckets, INITIAL_SUBNET, TURNOVER_SUBNET};
use crate::harness::loadgen::run_load;
use crate::harness::report::{MeasureWindow, StabilityRatio, TrialOutcome, TrialReport};
use crate::registry::StrategyCase;

/// Derives the deterministic seed for one (strategy, bucket-count) trial.
/// Trials draw from independent streams, so they can be re-run or reordered
/// without perturbing each other.
fn trial_seed(root: u64, strategy_id: &str, n: usize) -> u64 {
    xxh3_64(strategy_id.as_bytes()) ^ root.rotate_left(17) ^ (n as u64)
}

/// Runs one trial. `Err` means the strategy failed the determinism gate.
pub fn run_trial(
    case: &StrategyCase,
    n: usize,
    config: &TrialConfig,
) -> Result<TrialReport, NonDeterminismError> {
    let seed = trial_seed(config.seed, case.id, n);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut router = (case.make)();

    // Phase 1: populate.
    let mut live = initial_buckets(n);
    for bucket in &live {
        router.add(bucket);
    }

    // Phase 2: sanity check. Any flicker disqualifies the trial before any
    // number is trusted.
    let probe = hex_key(&mut rng);
    let first = router.get(&probe);
    for iteration in 1..config.sanity_iterations {
        let got = router.get(&probe);
        if got != first {
            return Err(NonDeterminismError {
                strategy: case.id.to_owned(),
                key: probe,
                first,
                conflicting: got,
                iteration,
            });
        }
    }

    // Phase 3: baseline snapshot. Keys are drawn fresh; duplicates collapse
    // in the map, which only shrinks the denominator slightly.
    let mut snapshot: FxHashMap<String, String> =
        FxHashMap::with_capacity_and_hasher(config.sample_size, Default::default());
    for _ in 0..config.sample_size {
        let key = hex_key(&mut rng);
        if let Some(bucket) = router.get(&key) {
            snapshot.insert(key, bucket);
        }
    }

    // Phase 4: steady-state throughput window.
    let steady = MeasureWindow::from_load(&run_load(
        router.as_ref(),
        config.workers,
        config.measure_duration,
        config.target_rate,
        seed.wrapping_add(1),
    ));

    // Phase 5: scale-up (timed). Identities continue the initial numbering,
    // so they are distinct from every live bucket.
    let change_count = config.change_count(n);
    let started = Instant::now();
    for i in 0..change_count {
        let bucket = bucket_ip(INITIAL_SUBNET, n + i);
        router.add(&bucket);
        live.push(bucket);
    }
    let add_elapsed = started.elapsed();

    // Phase 6: add-stability.
    let add_stability = stability(router.as_ref(), &snapshot);

    // Phase 7: scale-down (timed): random victims from the current set.
    let started = Instant::now();
    for _ in 0..change_count {
        let idx = rng.random_range(0..live.len());
        let victim = live.swap_remove(idx);
        router.remove(&victim);
    }
    let remove_elapsed = started.elapsed();

    // Phase 8: remove-stability, against the original snapshot.
    let remove_stability = stability(router.as_ref(), &snapshot);

    // Phase 9: full turnover under entirely new identities. Catches
    // strategies that degrade after heavy churn (unbounded internal growth,
    // fragmentation).
    let survivor_count = live.len();
    for bucket in live.drain(..) {
        router.remove(&bucket);
    }
    for i in 0..survivor_count {
        let bucket = bucket_ip(TURNOVER_SUBNET, i);
        router.add(&bucket);
        live.push(bucket);
    }

    // Phase 10: re-measurement.
    let turnover = MeasureWindow::from_load(&run_load(
        router.as_ref(),
        config.workers,
        config.measure_duration,
        config.target_rate,
        seed.wrapping_add(2),
    ));

    Ok(TrialReport {
        strategy_id: case.id,
        strategy: case.display_name,
        initial_buckets: n,
        change_count,
        steady,
        add_elapsed,
        add_stability,
        remove_elapsed,
        remove_stability,
        turnover,
        expected_remap: change_count as f64 / (n + change_count) as f64,
    })
}

/// Counts snapshot keys that still map to their original bucket.
fn stability(
    router: &dyn crate::traits::BucketRouter,
    snapshot: &FxHashMap<String, String>,
) -> StabilityRatio {
    let retained = snapshot
        .iter()
        .filter(|(key, bucket)| router.get(key).as_ref() == Some(bucket))
        .count();
    StabilityRatio {
        retained,
        total: snapshot.len(),
    }
}

/// Runs every (strategy, bucket-count) combination. Trial faults are
/// recorded in the outcome list; only an invalid configuration aborts the
/// suite.
pub fn run_suite(
    cases: &[StrategyCase],
    config: &TrialConfig,
) -> Result<Vec<TrialOutcome>, ConfigError> {
    config.validate()?;

    let mut outcomes = Vec::with_capacity(cases.len() * config.bucket_counts.len());
    for case in cases {
        for &n in &config.bucket_counts {
            outcomes.push(TrialOutcome {
                strategy_id: case.id,
                strategy: case.display_name,
                initial_buckets: n,
                result: run_trial(case, n, config),
            });
        }
    }
    Ok(outcomes)
}

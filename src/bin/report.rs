//! Full benchmark run over the standard strategy registry.
//!
//! Runs every (strategy, bucket-count) trial, prints a per-trial detail
//! block as results arrive, and finishes with the comparison table.
//!
//! Run with: `cargo run --release --bin report`

use std::time::Duration;

use hashbench::harness::config::TrialConfig;
use hashbench::harness::protocol::run_trial;
use hashbench::harness::report::{render_suite, TrialOutcome};
use hashbench::registry::STANDARD_STRATEGIES;

const MEASURE_DURATION: Duration = Duration::from_secs(1);
const SAMPLE_SIZE: usize = 100_000;
const WORKERS: usize = 8;
const SEED: u64 = 42;

fn main() {
    let config = TrialConfig {
        bucket_counts: vec![10, 100, 1000],
        sample_size: SAMPLE_SIZE,
        workers: WORKERS,
        measure_duration: MEASURE_DURATION,
        seed: SEED,
        ..TrialConfig::default()
    };
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        std::process::exit(1);
    }

    println!("=== hashbench report ===");
    println!(
        "strategies: {}, bucket counts: {:?}, change factor: {}, sample: {}, workers: {}",
        STANDARD_STRATEGIES.len(),
        config.bucket_counts,
        config.change_factor,
        config.sample_size,
        config.workers,
    );
    println!();

    let mut outcomes = Vec::new();
    for case in STANDARD_STRATEGIES {
        for &n in &config.bucket_counts {
            let result = run_trial(case, n, &config);
            match &result {
                Ok(report) => {
                    println!("{}", report.summary());
                    print!("{}", report.render_detail());
                },
                Err(err) => println!("{} — {} buckets: SKIPPED ({err})", case.display_name, n),
            }
            println!();
            outcomes.push(TrialOutcome {
                strategy_id: case.id,
                strategy: case.display_name,
                initial_buckets: n,
                result,
            });
        }
    }

    println!("{}", render_suite(&outcomes));
}

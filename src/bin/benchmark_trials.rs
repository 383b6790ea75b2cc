//! Run trial-throughput benchmark and optionally append one line to a log file for trend tracking.
//!
//! Usage:
//!   cargo run --release --bin benchmark_trials
//!   cargo run --release --bin benchmark_trials -- --log
//!
//! --log  Append one row to benchmark_log.csv (date, trials_per_sec, trials_per_min, applicants, seats).

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use tryout::selection::{run_trial, MeritEvaluator, QuotaSelector, Rng, UniformGenerator};

fn main() {
    let log = std::env::args().any(|a| a == "--log");

    let applicants = 50usize;
    let seats = 10usize;
    let generator = UniformGenerator::new(applicants);
    let selector = QuotaSelector::new(seats, 0.67, 0.8).expect("benchmark selector config");

    // Run for at least this long or this many trials
    const MIN_DURATION_MS: u64 = 2000;
    const MIN_TRIALS: u64 = 5000;

    let start = Instant::now();
    let mut trials: u64 = 0;
    while start.elapsed().as_millis() < MIN_DURATION_MS as u128 || trials < MIN_TRIALS {
        let _ = run_trial(&generator, &selector, &MeritEvaluator, &mut Rng::new(trials));
        trials += 1;
    }
    let elapsed_secs = start.elapsed().as_secs_f64();

    let trials_per_sec = trials as f64 / elapsed_secs;
    let trials_per_min = trials_per_sec * 60.0;

    println!("Trial benchmark ({applicants} applicants, {seats} seats):");
    println!("  Trials:     {}", trials);
    println!("  Duration:   {:.2} s", elapsed_secs);
    println!("  Trials/s:   {:.2}", trials_per_sec);
    println!("  Trials/min: {:.2}", trials_per_min);

    if log {
        let date = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let line = format!(
            "{},{:.4},{:.4},{},{}\n",
            date, trials_per_sec, trials_per_min, applicants, seats
        );
        let path = "benchmark_log.csv";
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("open benchmark_log.csv for append");
        if file.metadata().map(|m| m.len() == 0).unwrap_or(true) {
            let _ = file.write_all(b"date,trials_per_sec,trials_per_min,applicants,seats\n");
        }
        file.write_all(line.as_bytes())
            .expect("write benchmark_log.csv");
        file.flush().expect("flush benchmark_log.csv");
        println!("Appended to {}", path);
    }
}

use serde::Serialize;

use crate::report::write_report_file;
use crate::selection::{
    run_trial, BiasedSelector, MeritEvaluator, QuotaSelector, Rng, UnbiasedSelector,
    UniformGenerator,
};
use crate::sweep::{load_plan, run_sweep_parallel, run_sweep_with_progress, validate_plan, SweepPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Trial,
    Sweep,
    Report,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("trial") => Some(Command::Trial),
        Some("sweep") => Some(Command::Sweep),
        Some("report") => Some(Command::Report),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Trial) => handle_trial(args),
        Some(Command::Sweep) => handle_sweep(args),
        Some(Command::Report) => handle_report(args),
        Some(Command::Validate) => handle_validate(args),
        None => {
            eprintln!("usage: tryout <trial|sweep|report|validate>");
            2
        }
    }
}

/// Demo parameters for a single trial: the midpoint of the reference grid.
const TRIAL_BIAS_FACTOR: f64 = 0.67;
const TRIAL_QUOTA_FRACTION: f64 = 0.8;

#[derive(Debug, Serialize)]
struct TrialReport {
    applicants: usize,
    seats: usize,
    seed: u64,
    bias_factor: f64,
    max_quota_fraction: f64,
    unbiased_score: f64,
    biased_score: f64,
    quota_score: f64,
}

fn handle_trial(args: &[String]) -> i32 {
    let applicants = parse_usize_arg(args.get(2), "applicants", 50);
    let seats = parse_usize_arg(args.get(3), "seats", 10);
    let seed = parse_u64_arg(args.get(4), "seed", 7);
    let as_table = args.iter().any(|arg| arg == "--table");

    let generator = UniformGenerator::new(applicants);
    let unbiased = match UnbiasedSelector::new(seats) {
        Ok(selector) => selector,
        Err(err) => {
            eprintln!("invalid trial configuration: {err}");
            return 1;
        }
    };
    let biased = match BiasedSelector::new(seats, TRIAL_BIAS_FACTOR) {
        Ok(selector) => selector,
        Err(err) => {
            eprintln!("invalid trial configuration: {err}");
            return 1;
        }
    };
    let quota = match QuotaSelector::new(seats, TRIAL_BIAS_FACTOR, TRIAL_QUOTA_FRACTION) {
        Ok(selector) => selector,
        Err(err) => {
            eprintln!("invalid trial configuration: {err}");
            return 1;
        }
    };

    // Same seed for each policy: all three judge the same applicant pool.
    let report = TrialReport {
        applicants,
        seats,
        seed,
        bias_factor: TRIAL_BIAS_FACTOR,
        max_quota_fraction: TRIAL_QUOTA_FRACTION,
        unbiased_score: run_trial(&generator, &unbiased, &MeritEvaluator, &mut Rng::new(seed)),
        biased_score: run_trial(&generator, &biased, &MeritEvaluator, &mut Rng::new(seed)),
        quota_score: run_trial(&generator, &quota, &MeritEvaluator, &mut Rng::new(seed)),
    };

    if as_table {
        println!("applicants\tseats\tseed\tunbiased\tbiased\tquota");
        println!(
            "{}\t{}\t{}\t{:.6}\t{:.6}\t{:.6}",
            report.applicants,
            report.seats,
            report.seed,
            report.unbiased_score,
            report.biased_score,
            report.quota_score
        );
    } else {
        match serde_json::to_string_pretty(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize trial result: {err}");
                return 1;
            }
        }
    }

    0
}

fn handle_sweep(args: &[String]) -> i32 {
    let plan = match args.get(2) {
        Some(path) => match load_plan(path) {
            Ok(plan) => plan,
            Err(err) => {
                eprintln!("sweep failed: {err}");
                return 1;
            }
        },
        None => SweepPlan::default(),
    };
    if let Some(code) = report_plan_errors(&plan) {
        return code;
    }

    match run_sweep_parallel(&plan.to_scenario()) {
        Ok(results) => match serde_json::to_string_pretty(&results) {
            Ok(payload) => {
                println!("{payload}");
                0
            }
            Err(err) => {
                eprintln!("failed to serialize sweep result: {err}");
                1
            }
        },
        Err(err) => {
            eprintln!("sweep failed: {err}");
            1
        }
    }
}

fn handle_report(args: &[String]) -> i32 {
    let (Some(plan_path), Some(out_path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: tryout report <plan.{{json,yaml}}> <out.csv>");
        return 2;
    };

    let plan = match load_plan(plan_path) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("report failed: {err}");
            return 1;
        }
    };
    if let Some(code) = report_plan_errors(&plan) {
        return code;
    }

    let results = match run_sweep_with_progress(&plan.to_scenario(), |done, total| {
        eprintln!("cells {done}/{total}");
    }) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("report failed: {err}");
            return 1;
        }
    };

    match write_report_file(out_path, &results) {
        Ok(()) => {
            println!("report written: {} ({} cells)", out_path, results.len());
            0
        }
        Err(err) => {
            eprintln!("report failed: {err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: tryout validate <plan.{{json,yaml}}>");
        return 2;
    };

    let plan = match load_plan(path) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("validation failed: {err}");
            return 1;
        }
    };

    let report = validate_plan(&plan);
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} diagnostic(s)",
            report.diagnostics.len()
        );
        1
    } else {
        println!("validation passed: {path}");
        0
    }
}

/// Print a plan's error diagnostics, if any, and return the exit code to use.
fn report_plan_errors(plan: &SweepPlan) -> Option<i32> {
    let report = validate_plan(plan);
    if !report.has_errors() {
        return None;
    }
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    eprintln!("plan has errors; fix them or run 'tryout validate'");
    Some(1)
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

//! Repeated-trial aggregation: one (quota, bias) cell of a sweep is the mean
//! trial score over many independent repetitions.

use serde::Serialize;

use crate::selection::{run_trial, Evaluator, Generator, Rng, Selector};

/// Aggregated outcome of one sweep cell.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CellResult {
    pub quota_fraction: f64,
    pub bias_factor: f64,
    pub mean_score: f64,
    pub repetitions: usize,
}

/// Mean trial score over `repetitions` independent trials. Repetition `i`
/// runs on its own PRNG seeded `base_seed + i`, so every trial has a fresh
/// population and the whole aggregate is reproducible from `base_seed`.
pub fn mean_trial_score<G, S, E>(
    generator: &G,
    selector: &S,
    evaluator: &E,
    repetitions: usize,
    base_seed: u64,
) -> f64
where
    G: Generator,
    S: Selector,
    E: Evaluator,
{
    let repetitions = repetitions.max(1);
    let mut sum = 0.0;
    for repetition in 0..repetitions {
        let mut rng = Rng::new(base_seed.wrapping_add(repetition as u64));
        sum += run_trial(generator, selector, evaluator, &mut rng);
    }
    sum / repetitions as f64
}

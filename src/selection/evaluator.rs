//! Outcome scoring: how much of the merit-optimal selection did a policy
//! actually pick?

use std::collections::HashSet;

use crate::selection::candidate::{Candidate, Population};

pub trait Evaluator {
    fn evaluate(&self, population: &[Candidate], selection: &[Candidate]) -> f64;
}

/// Ad-hoc evaluators can be passed as closures.
impl<F> Evaluator for F
where
    F: Fn(&[Candidate], &[Candidate]) -> f64,
{
    fn evaluate(&self, population: &[Candidate], selection: &[Candidate]) -> f64 {
        self(population, selection)
    }
}

/// Top `seats` of the pool by true score, descending. This is the selection a
/// perfectly informed, unbiased process would have made.
pub fn optimal_selection(population: &[Candidate], seats: usize) -> Population {
    let mut ranked: Population = population.to_vec();
    ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
    ranked.truncate(seats);
    ranked
}

/// Fraction of the selection that also appears in the merit-optimal selection
/// of the same size. Membership is by candidate id. An empty selection scores
/// 0.0 rather than dividing by zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeritEvaluator;

impl Evaluator for MeritEvaluator {
    fn evaluate(&self, population: &[Candidate], selection: &[Candidate]) -> f64 {
        if selection.is_empty() {
            return 0.0;
        }
        let optimal: HashSet<u64> = optimal_selection(population, selection.len())
            .iter()
            .map(|candidate| candidate.id)
            .collect();
        let optimal_picks = selection
            .iter()
            .filter(|candidate| optimal.contains(&candidate.id))
            .count();
        optimal_picks as f64 / selection.len() as f64
    }
}

//! Selection policies. Every policy ranks the pool with a stable descending
//! sort and takes from the top; the quota policy additionally enforces a
//! per-group seat cap during a single greedy scan.

use crate::selection::candidate::{Candidate, Population};

pub trait Selector {
    fn select(&self, population: &[Candidate]) -> Vec<Candidate>;
}

/// Ad-hoc policies can be passed as closures.
impl<F> Selector for F
where
    F: Fn(&[Candidate]) -> Vec<Candidate>,
{
    fn select(&self, population: &[Candidate]) -> Vec<Candidate> {
        self(population)
    }
}

/// Ranking key under a scoring bias: protected-group scores pass through,
/// everyone else is discounted by `bias_factor`. Ranking only; the score the
/// evaluator sees is never modified.
pub fn biased_rank(candidate: &Candidate, bias_factor: f64) -> f64 {
    if candidate.protected {
        candidate.score
    } else {
        candidate.score * bias_factor
    }
}

fn ranked_descending<K>(population: &[Candidate], key: K) -> Population
where
    K: Fn(&Candidate) -> f64,
{
    let mut ranked: Population = population.to_vec();
    // Stable sort: equal keys keep pool order, so ties break deterministically.
    ranked.sort_by(|left, right| key(right).total_cmp(&key(left)));
    ranked
}

fn validate_seats(seats: usize) -> Result<(), String> {
    if seats == 0 {
        return Err("seats must be at least 1, got 0".to_string());
    }
    Ok(())
}

fn validate_bias_factor(bias_factor: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&bias_factor) {
        return Err(format!(
            "bias_factor must be within [0, 1], got {bias_factor}"
        ));
    }
    Ok(())
}

/// Rank by raw score, take the top `seats`.
#[derive(Debug, Clone, Copy)]
pub struct UnbiasedSelector {
    seats: usize,
}

impl UnbiasedSelector {
    pub fn new(seats: usize) -> Result<Self, String> {
        validate_seats(seats)?;
        Ok(Self { seats })
    }
}

impl Selector for UnbiasedSelector {
    fn select(&self, population: &[Candidate]) -> Vec<Candidate> {
        let mut ranked = ranked_descending(population, |candidate| candidate.score);
        ranked.truncate(self.seats);
        ranked
    }
}

/// Rank by the biased key, take the top `seats`. With `bias_factor = 1.0`
/// the selected set matches [UnbiasedSelector].
#[derive(Debug, Clone, Copy)]
pub struct BiasedSelector {
    seats: usize,
    bias_factor: f64,
}

impl BiasedSelector {
    pub fn new(seats: usize, bias_factor: f64) -> Result<Self, String> {
        validate_seats(seats)?;
        validate_bias_factor(bias_factor)?;
        Ok(Self { seats, bias_factor })
    }
}

impl Selector for BiasedSelector {
    fn select(&self, population: &[Candidate]) -> Vec<Candidate> {
        let mut ranked =
            ranked_descending(population, |candidate| biased_rank(candidate, self.bias_factor));
        ranked.truncate(self.seats);
        ranked
    }
}

/// Biased ranking plus a per-group seat cap of `ceil(seats * max_quota_fraction)`.
///
/// The ranked pool is scanned once; a candidate is accepted iff the selection
/// is not yet full and the candidate's group is under its cap. A skipped
/// candidate is never reconsidered, so the result can be shorter than `seats`
/// when one group's supply runs out while the other group is capped. That is
/// expected output, not an error.
///
/// Known limitation: the cap assumes exactly two groups share the seats and
/// nothing verifies `2 * cap >= seats`, so a fraction below 0.5 can make a
/// full selection impossible by construction.
#[derive(Debug, Clone, Copy)]
pub struct QuotaSelector {
    seats: usize,
    bias_factor: f64,
    max_quota_fraction: f64,
}

impl QuotaSelector {
    pub fn new(seats: usize, bias_factor: f64, max_quota_fraction: f64) -> Result<Self, String> {
        validate_seats(seats)?;
        validate_bias_factor(bias_factor)?;
        if !(max_quota_fraction > 0.0 && max_quota_fraction <= 1.0) {
            return Err(format!(
                "max_quota_fraction must be within (0, 1], got {max_quota_fraction}"
            ));
        }
        Ok(Self {
            seats,
            bias_factor,
            max_quota_fraction,
        })
    }

    /// Maximum seats either group may occupy.
    pub fn cap_per_group(&self) -> usize {
        (self.seats as f64 * self.max_quota_fraction).ceil() as usize
    }
}

impl Selector for QuotaSelector {
    fn select(&self, population: &[Candidate]) -> Vec<Candidate> {
        let ranked =
            ranked_descending(population, |candidate| biased_rank(candidate, self.bias_factor));
        let cap = self.cap_per_group();

        let mut protected_taken = 0usize;
        let mut open_taken = 0usize;
        let mut selection = Vec::with_capacity(self.seats);
        for candidate in ranked {
            if selection.len() >= self.seats {
                break;
            }
            let taken = if candidate.protected {
                &mut protected_taken
            } else {
                &mut open_taken
            };
            if *taken < cap {
                *taken += 1;
                selection.push(candidate);
            }
        }
        selection
    }
}

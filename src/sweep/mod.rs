pub mod plan;
pub mod trials;

pub use plan::{load_plan, validate_plan, PlanReport, SweepPlan};
pub use trials::{mean_trial_score, CellResult};

use rayon::prelude::*;

use crate::parallel::chunk_ranges;
use crate::selection::{MeritEvaluator, QuotaSelector, UniformGenerator};

/// Cells per progress chunk for [run_sweep_with_progress].
const PROGRESS_CHUNK_CELLS: usize = 4;

/// A full parameter grid: every quota fraction crossed with every bias
/// factor, each cell averaged over `repetitions` trials.
#[derive(Debug, Clone)]
pub struct SweepScenario {
    pub applicants: usize,
    pub seats: usize,
    pub repetitions: usize,
    pub seed: u64,
    pub quota_fractions: Vec<f64>,
    pub bias_factors: Vec<f64>,
}

impl Default for SweepScenario {
    fn default() -> Self {
        Self {
            applicants: 50,
            seats: 10,
            repetitions: 1000,
            seed: 0,
            quota_fractions: vec![0.5, 0.6, 0.7, 0.8, 0.9, 1.0],
            bias_factors: vec![0.01, 0.33, 0.67, 0.9, 1.0],
        }
    }
}

/// One validated grid cell, ready to run.
#[derive(Debug, Clone, Copy)]
struct SweepCell {
    quota_fraction: f64,
    bias_factor: f64,
    selector: QuotaSelector,
    base_seed: u64,
}

impl SweepScenario {
    /// Expand the grid, failing fast on any invalid configuration before a
    /// single trial runs.
    fn cells(&self) -> Result<Vec<SweepCell>, String> {
        if self.applicants == 0 {
            return Err("applicants must be at least 1, got 0".to_string());
        }
        let mut cells = Vec::with_capacity(self.quota_fractions.len() * self.bias_factors.len());
        for (quota_index, &quota_fraction) in self.quota_fractions.iter().enumerate() {
            for (bias_index, &bias_factor) in self.bias_factors.iter().enumerate() {
                let selector = QuotaSelector::new(self.seats, bias_factor, quota_fraction)?;
                cells.push(SweepCell {
                    quota_fraction,
                    bias_factor,
                    selector,
                    base_seed: cell_seed(self.seed, quota_index, bias_index),
                });
            }
        }
        Ok(cells)
    }
}

/// Stable per-cell seed: grid position mixed into the scenario seed, so cell
/// order and execution order (sequential, parallel, chunked) never change
/// the numbers.
fn cell_seed(seed: u64, quota_index: usize, bias_index: usize) -> u64 {
    seed.wrapping_add((quota_index as u64 + 1).wrapping_mul(0x9e3779b97f4a7c15))
        .wrapping_add((bias_index as u64 + 1).wrapping_mul(0xbf58476d1ce4e5b9))
}

pub fn run_sweep(scenario: &SweepScenario) -> Result<Vec<CellResult>, String> {
    run_sweep_with_parallelism(scenario, false)
}

/// Like [run_sweep] but distributes cells across all CPU cores via Rayon.
/// Results order matches grid order and the numbers match the sequential run.
pub fn run_sweep_parallel(scenario: &SweepScenario) -> Result<Vec<CellResult>, String> {
    run_sweep_with_parallelism(scenario, true)
}

fn run_sweep_with_parallelism(
    scenario: &SweepScenario,
    parallel: bool,
) -> Result<Vec<CellResult>, String> {
    let cells = scenario.cells()?;
    let generator = UniformGenerator::new(scenario.applicants);
    let repetitions = scenario.repetitions.max(1);

    let run_one = |cell: &SweepCell| CellResult {
        quota_fraction: cell.quota_fraction,
        bias_factor: cell.bias_factor,
        mean_score: mean_trial_score(
            &generator,
            &cell.selector,
            &MeritEvaluator,
            repetitions,
            cell.base_seed,
        ),
        repetitions,
    };

    let results = if parallel {
        cells.par_iter().map(run_one).collect()
    } else {
        cells.iter().map(run_one).collect()
    };
    Ok(results)
}

/// Like [run_sweep_parallel] but runs the grid in chunks and invokes
/// `on_progress(done, total)` after each chunk (done/total in cells).
pub fn run_sweep_with_progress<F>(
    scenario: &SweepScenario,
    mut on_progress: F,
) -> Result<Vec<CellResult>, String>
where
    F: FnMut(u32, u32),
{
    let cells = scenario.cells()?;
    let total = cells.len();
    if total == 0 {
        return Ok(Vec::new());
    }
    // Report total immediately so callers show "0 / total" while the first
    // chunk runs.
    on_progress(0, total as u32);

    let generator = UniformGenerator::new(scenario.applicants);
    let repetitions = scenario.repetitions.max(1);
    let mut results = Vec::with_capacity(total);

    for (start, end) in chunk_ranges(total, PROGRESS_CHUNK_CELLS) {
        let chunk: Vec<CellResult> = cells[start..end]
            .par_iter()
            .map(|cell| CellResult {
                quota_fraction: cell.quota_fraction,
                bias_factor: cell.bias_factor,
                mean_score: mean_trial_score(
                    &generator,
                    &cell.selector,
                    &MeritEvaluator,
                    repetitions,
                    cell.base_seed,
                ),
                repetitions,
            })
            .collect();
        results.extend(chunk);
        on_progress(end as u32, total as u32);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_scenario() -> SweepScenario {
        SweepScenario {
            applicants: 20,
            seats: 4,
            repetitions: 40,
            seed: 11,
            quota_fractions: vec![0.5, 1.0],
            bias_factors: vec![0.5, 1.0],
        }
    }

    #[test]
    fn sweep_produces_one_result_per_cell_in_grid_order() {
        let results = run_sweep(&small_scenario()).expect("sweep should run");
        assert_eq!(results.len(), 4);
        assert_eq!(
            (results[0].quota_fraction, results[0].bias_factor),
            (0.5, 0.5)
        );
        assert_eq!(
            (results[3].quota_fraction, results[3].bias_factor),
            (1.0, 1.0)
        );
        for cell in &results {
            assert!(
                (0.0..=1.0).contains(&cell.mean_score),
                "mean out of range: {}",
                cell.mean_score
            );
        }
    }

    #[test]
    fn unconstrained_unbiased_cell_is_perfectly_meritocratic() {
        let results = run_sweep(&small_scenario()).expect("sweep should run");
        let cell = results
            .iter()
            .find(|cell| cell.quota_fraction == 1.0 && cell.bias_factor == 1.0)
            .expect("grid contains the (1.0, 1.0) cell");
        assert_eq!(cell.mean_score, 1.0);
    }

    #[test]
    fn invalid_grid_value_fails_before_any_trial() {
        let scenario = SweepScenario {
            bias_factors: vec![0.5, 1.5],
            ..small_scenario()
        };
        let err = run_sweep(&scenario).unwrap_err();
        assert!(err.contains("bias_factor"), "unexpected message: {err}");
    }

    #[test]
    fn cell_seeds_differ_across_grid_positions() {
        let mut seen = std::collections::HashSet::new();
        for quota_index in 0..8 {
            for bias_index in 0..8 {
                assert!(seen.insert(cell_seed(0, quota_index, bias_index)));
            }
        }
    }
}

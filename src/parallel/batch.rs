//! Chunk boundaries for progress reporting and batched parallel execution.

use crate::parallel::pool::Parallelism;
use crate::sweep::{run_sweep_parallel, CellResult, SweepScenario};

/// Split `total` items into consecutive ranges `[start, end)` of at most
/// `chunk` items; the final range may be shorter.
pub fn chunk_ranges(total: usize, chunk: usize) -> Vec<(usize, usize)> {
    if total == 0 || chunk == 0 {
        return Vec::new();
    }
    let mut ranges = Vec::with_capacity(total.div_ceil(chunk));
    let mut start = 0;
    while start < total {
        let end = (start + chunk).min(total);
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Run a parallel sweep under an explicit [Parallelism] setting. Convenience
/// wiring for callers that pin worker counts (e.g. speedup comparisons).
pub fn run_sweep_batches(
    scenario: &SweepScenario,
    parallelism: &Parallelism,
) -> Result<Vec<CellResult>, String> {
    parallelism.install(|| run_sweep_parallel(scenario))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_ranges_even_split() {
        assert_eq!(chunk_ranges(8, 4), vec![(0, 4), (4, 8)]);
    }

    #[test]
    fn chunk_ranges_short_tail() {
        assert_eq!(chunk_ranges(10, 4), vec![(0, 4), (4, 8), (8, 10)]);
    }

    #[test]
    fn chunk_ranges_chunk_larger_than_total() {
        assert_eq!(chunk_ranges(3, 10), vec![(0, 3)]);
    }

    #[test]
    fn chunk_ranges_empty() {
        assert!(chunk_ranges(0, 5).is_empty());
        assert!(chunk_ranges(10, 0).is_empty());
    }

    #[test]
    fn pinned_pool_matches_default_pool_results() {
        let scenario = SweepScenario {
            applicants: 16,
            seats: 4,
            repetitions: 20,
            seed: 5,
            quota_fractions: vec![0.5, 1.0],
            bias_factors: vec![0.5, 1.0],
        };
        let default_run =
            run_sweep_batches(&scenario, &Parallelism::Default).expect("sweep should run");
        let pinned_run =
            run_sweep_batches(&scenario, &Parallelism::Fixed(2)).expect("sweep should run");
        assert_eq!(default_run.len(), pinned_run.len());
        for (left, right) in default_run.iter().zip(pinned_run.iter()) {
            assert_eq!(left.mean_score, right.mean_score);
        }
    }
}

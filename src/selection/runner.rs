//! One trial: generate a pool, select from it, score the selection.

use crate::selection::evaluator::Evaluator;
use crate::selection::generator::Generator;
use crate::selection::rng::Rng;
use crate::selection::selector::Selector;

/// Pure composition of the three capabilities. No retries, no side effects;
/// the components are infallible once constructed, so nothing is propagated.
/// Deterministic for a given rng state and deterministic components.
pub fn run_trial<G, S, E>(generator: &G, selector: &S, evaluator: &E, rng: &mut Rng) -> f64
where
    G: Generator,
    S: Selector,
    E: Evaluator,
{
    let population = generator.generate(rng);
    let selection = selector.select(&population);
    evaluator.evaluate(&population, &selection)
}

pub mod candidate;
pub mod evaluator;
pub mod generator;
pub mod rng;
pub mod runner;
pub mod selector;

pub use candidate::{Candidate, Population};
pub use evaluator::{optimal_selection, Evaluator, MeritEvaluator};
pub use generator::{Generator, UniformGenerator};
pub use rng::Rng;
pub use runner::run_trial;
pub use selector::{biased_rank, BiasedSelector, QuotaSelector, Selector, UnbiasedSelector};

//! Population generation. A generator is a capability: anything that turns a
//! PRNG into an applicant pool. Swapping the distribution touches neither
//! selectors nor evaluators.

use crate::selection::candidate::{Candidate, Population};
use crate::selection::rng::Rng;

pub trait Generator {
    fn generate(&self, rng: &mut Rng) -> Population;
}

/// Ad-hoc generators can be passed as closures.
impl<F> Generator for F
where
    F: Fn(&mut Rng) -> Population,
{
    fn generate(&self, rng: &mut Rng) -> Population {
        self(rng)
    }
}

/// Reference distribution: scores uniform in [0, 1), group membership a fair
/// coin independent of score. Ids are assigned 0..applicants, so every pool
/// member is distinguishable even under score collisions.
#[derive(Debug, Clone, Copy)]
pub struct UniformGenerator {
    pub applicants: usize,
}

impl UniformGenerator {
    pub fn new(applicants: usize) -> Self {
        Self { applicants }
    }
}

impl Generator for UniformGenerator {
    fn generate(&self, rng: &mut Rng) -> Population {
        (0..self.applicants as u64)
            .map(|id| Candidate::new(id, rng.next_unit(), rng.next_bool()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_generator_produces_requested_count_with_sequential_ids() {
        let mut rng = Rng::new(11);
        let pool = UniformGenerator::new(64).generate(&mut rng);
        assert_eq!(pool.len(), 64);
        for (index, candidate) in pool.iter().enumerate() {
            assert_eq!(candidate.id, index as u64);
            assert!((0.0..1.0).contains(&candidate.score));
        }
    }

    #[test]
    fn uniform_generator_is_seed_deterministic() {
        let generator = UniformGenerator::new(32);
        let first = generator.generate(&mut Rng::new(5));
        let second = generator.generate(&mut Rng::new(5));
        assert_eq!(first, second);
    }

    #[test]
    fn uniform_generator_draws_both_groups() {
        let mut rng = Rng::new(21);
        let pool = UniformGenerator::new(200).generate(&mut rng);
        let protected = pool.iter().filter(|c| c.protected).count();
        assert!(
            protected > 0 && protected < pool.len(),
            "one-sided pool: {protected}/200 protected"
        );
    }

    #[test]
    fn closures_act_as_generators() {
        let fixed = |_: &mut Rng| vec![Candidate::new(0, 0.5, true)];
        let pool = fixed.generate(&mut Rng::new(0));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].id, 0);
    }
}

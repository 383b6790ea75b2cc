//! Applicant value type. Candidates are compared by `id`, never by score:
//! two applicants with equal scores are still distinct people.

use serde::Serialize;

/// A simulated applicant. `id` is assigned by the generator and is the only
/// notion of identity; `score` is the intrinsic quality the evaluator trusts;
/// `protected` marks the group whose score is never discounted during ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub id: u64,
    pub score: f64,
    pub protected: bool,
}

impl Candidate {
    pub fn new(id: u64, score: f64, protected: bool) -> Self {
        Self {
            id,
            score,
            protected,
        }
    }
}

/// One trial's applicant pool. No ordering invariant; selectors sort their
/// own working copies.
pub type Population = Vec<Candidate>;

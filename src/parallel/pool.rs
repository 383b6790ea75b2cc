//! Rayon thread pool selection for sweep workloads.
//!
//! Use [Parallelism::install] to run a parallel sweep on a fixed number of
//! threads, or rely on Rayon's global pool (all CPU cores).

use rayon::ThreadPoolBuilder;

/// How many worker threads a parallel sweep may use.
#[derive(Debug, Clone, Copy, Default)]
pub enum Parallelism {
    /// Rayon's global pool (all CPU cores).
    #[default]
    Default,
    /// A temporary pool with exactly this many threads.
    Fixed(usize),
}

impl Parallelism {
    /// Run a closure under this parallelism setting. [Parallelism::Default]
    /// runs on the global pool; [Parallelism::Fixed] builds a temporary pool
    /// for the duration of the closure.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match self {
            Self::Default => f(),
            Self::Fixed(workers) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(*workers)
                    .build()
                    .expect("rayon thread pool");
                pool.install(f)
            }
        }
    }
}

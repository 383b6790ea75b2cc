pub mod batch;
pub mod pool;

pub use batch::{chunk_ranges, run_sweep_batches};
pub use pool::Parallelism;

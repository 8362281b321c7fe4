//! Test execution engine
//!
//! The sequential ordering primitive and the benchmark harness built on it.

mod harness;
mod sequence;

pub use harness::{Benchmark, BenchmarkError};
pub use sequence::run_sequentially;

//! seqbench - Deterministic Sequential Benchmark Harness
//!
//! A harness for timing and validating sequences of asynchronous operations
//! against a subject system known only through an async call/response
//! contract (a database, a network service, a storage engine).
//!
//! ## Features
//!
//! - Strictly ordered execution: scheduled operations run one at a time, in
//!   registration order, with abort-on-first-failure semantics
//! - Repetitions: the full `set_up → tests → tear_down` cycle repeats N
//!   times, with per-test durations accumulated across repetitions
//! - Validation amortization: result validators run on the first repetition
//!   only, so repeated runs measure timing without re-paying validation cost
//! - Aggregated reporting: mean duration per test, formatted to three
//!   fractional digits, with Table/JSON/CSV renderings
//! - Injected collaborators: monotonic clock and log sink are constructor
//!   arguments, keeping runs deterministic under test
//!
//! ## Usage
//!
//! ```no_run
//! use seqbench::{Benchmark, TestCase};
//!
//! # async fn demo() -> Result<(), seqbench::BenchmarkError> {
//! let mut bench = Benchmark::new("kv-store");
//!
//! bench.schedule("insert", || async { Ok(42u64) });
//! bench.schedule_case(
//!     TestCase::new("lookup", || async { Ok(42u64) })
//!         .with_validator(|value| async move { Ok(value == 42) }),
//! );
//!
//! let report = bench.run(3).await?;
//! println!("{}", report.to_json());
//! # Ok(())
//! # }
//! ```
//!
//! A failed operation, hook, or validator rejects the in-flight run and
//! skips everything scheduled after it; durations recorded up to that point
//! remain readable through [`Benchmark::results`].

pub mod executor;
pub mod models;
pub mod output;
pub mod utils;

pub use executor::{run_sequentially, Benchmark, BenchmarkError};
pub use models::{BoxError, Hook, Operation, Report, ReportEntry, TestCase, Validator, UNAVAILABLE};
pub use output::{write_report_to_file, OutputFormat, ReportFormatter};
pub use utils::{
    init_logging, Clock, LogSink, Logger, ManualClock, MemorySink, MonotonicClock, Severity, Timer,
    TracingSink,
};

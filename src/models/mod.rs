//! Data models for the benchmark harness
//!
//! Test case definitions and the derived duration report.

mod report;
mod test_case;

pub use report::{Report, ReportEntry, UNAVAILABLE};
pub use test_case::{BoxError, Hook, Operation, TestCase, Validator};

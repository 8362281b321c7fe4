//! Output formatting module
//!
//! Provides table, JSON, CSV, and summary renderings of a report.

mod formatter;

pub use formatter::{write_report_to_file, OutputFormat, ReportFormatter};

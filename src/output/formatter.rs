//! Report formatters
//!
//! Renders a derived report as a table, JSON, CSV, or a one-line summary.

use std::io::Write;
use std::path::Path;

use crate::models::{Report, UNAVAILABLE};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table | OutputFormat::Summary => "txt",
            OutputFormat::Json | OutputFormat::JsonPretty => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Report formatter
pub struct ReportFormatter {
    format: OutputFormat,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a report in the configured format.
    pub fn format_report(&self, report: &Report) -> String {
        match self.format {
            OutputFormat::Table => self.format_table(report),
            OutputFormat::Json => report.to_json(),
            OutputFormat::JsonPretty => report.to_json_pretty(),
            OutputFormat::Csv => self.format_csv(report),
            OutputFormat::Summary => self.format_summary(report),
        }
    }

    fn format_table(&self, report: &Report) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{:=^60}\n", format!(" {} ", report.name)));
        for entry in &report.entries {
            let value = if entry.value == UNAVAILABLE {
                entry.value.clone()
            } else {
                format!("{} ms", entry.value)
            };
            output.push_str(&format!("  {:<40} {:>14}\n", entry.name, value));
        }
        output.push_str(&format!("{:=<60}\n", ""));
        output.push_str(&format!(
            "  {} test(s), {} measured\n",
            report.entries.len(),
            report.measured()
        ));

        output
    }

    fn format_csv(&self, report: &Report) -> String {
        let mut output = String::new();
        output.push_str("test_name,mean_ms\n");
        for entry in &report.entries {
            output.push_str(&format!(
                "\"{}\",{}\n",
                entry.name.replace('"', "\"\""),
                entry.value
            ));
        }
        output
    }

    fn format_summary(&self, report: &Report) -> String {
        format!(
            "{}: {}/{} test(s) measured",
            report.name,
            report.measured(),
            report.entries.len()
        )
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Write a formatted report to a file.
pub fn write_report_to_file(
    path: impl AsRef<Path>,
    report: &Report,
    format: OutputFormat,
) -> std::io::Result<()> {
    let content = ReportFormatter::new(format).format_report(report);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

//! Aggregated duration report
//!
//! A report is derived on demand from the harness state and never stored:
//! one entry per recorded test case, in registration order, carrying either
//! the mean duration formatted to three fractional digits or the literal
//! `"unavailable"` when no sample exists yet.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Value reported for a test that has no recorded durations.
pub const UNAVAILABLE: &str = "unavailable";

/// One report line: test name and formatted mean duration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub value: String,
}

impl ReportEntry {
    /// Build an entry from raw duration samples in milliseconds.
    pub fn from_samples(name: impl Into<String>, samples: &[f64]) -> Self {
        Self {
            name: name.into(),
            value: format_mean(samples),
        }
    }

    /// Whether a mean is available (at least one sample was recorded).
    pub fn is_measured(&self) -> bool {
        self.value != UNAVAILABLE
    }
}

/// Derived report over one harness instance.
///
/// Serializes to `{"name": <harness name>, "data": {<test>: <"D.DDD" |
/// "unavailable">, ...}}` with entries in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub name: String,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new(name: impl Into<String>, entries: Vec<ReportEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Look up the reported value for a test name.
    pub fn get(&self, test: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == test)
            .map(|entry| entry.value.as_str())
    }

    /// Number of entries with an available mean.
    pub fn measured(&self) -> usize {
        self.entries.iter().filter(|e| e.is_measured()).count()
    }

    /// Compact single-line JSON rendering.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut report = serializer.serialize_struct("Report", 2)?;
        report.serialize_field("name", &self.name)?;
        report.serialize_field("data", &EntryMap(&self.entries))?;
        report.end()
    }
}

// Serializes entries as a JSON object, preserving entry order.
struct EntryMap<'a>(&'a [ReportEntry]);

impl Serialize for EntryMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.name, &entry.value)?;
        }
        map.end()
    }
}

/// Arithmetic mean formatted to exactly three fractional digits, or
/// [`UNAVAILABLE`] for an empty sample sequence.
pub(crate) fn format_mean(samples: &[f64]) -> String {
    if samples.is_empty() {
        return UNAVAILABLE.to_string();
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    format!("{mean:.3}")
}

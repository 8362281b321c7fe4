//! Logging utilities
//!
//! Four ordered severities with a configurable threshold, written through an
//! injected line-oriented sink. Logging is purely observational and never
//! affects harness control flow.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log severity, most to least verbose.
///
/// A message at severity `s` is emitted only if `s >= threshold`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Fine = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl Severity {
    /// Numeric ordinal (0-3).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fine" => Some(Severity::Fine),
            "info" => Some(Severity::Info),
            "warning" | "warn" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }

    pub fn to_tracing_level(self) -> Level {
        match self {
            Severity::Fine => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Fine => write!(f, "FINE"),
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Line-oriented log destination.
pub trait LogSink: Send + Sync {
    /// Write one already-filtered line.
    fn write(&self, severity: Severity, line: &str);
}

/// Default sink forwarding to `tracing` events.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, line: &str) {
        match severity {
            Severity::Fine => tracing::debug!("{line}"),
            Severity::Info => tracing::info!("{line}"),
            Severity::Warning => tracing::warn!("{line}"),
            Severity::Error => tracing::error!("{line}"),
        }
    }
}

/// Sink capturing lines in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured lines, in emission order.
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().expect("sink lock poisoned").clone()
    }

    /// Whether any captured line contains `fragment`.
    pub fn contains(&self, fragment: &str) -> bool {
        self.lines
            .lock()
            .expect("sink lock poisoned")
            .iter()
            .any(|(_, line)| line.contains(fragment))
    }
}

impl LogSink for MemorySink {
    fn write(&self, severity: Severity, line: &str) {
        self.lines
            .lock()
            .expect("sink lock poisoned")
            .push((severity, line.to_string()));
    }
}

/// Threshold filter in front of a sink.
#[derive(Clone)]
pub struct Logger {
    threshold: Severity,
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new(threshold: Severity, sink: Arc<dyn LogSink>) -> Self {
        Self { threshold, sink }
    }

    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Emit `line` if `severity` clears the threshold.
    pub fn log(&self, severity: Severity, line: impl AsRef<str>) {
        if severity >= self.threshold {
            self.sink.write(severity, line.as_ref());
        }
    }

    pub fn fine(&self, line: impl AsRef<str>) {
        self.log(Severity::Fine, line);
    }

    pub fn info(&self, line: impl AsRef<str>) {
        self.log(Severity::Info, line);
    }

    pub fn warning(&self, line: impl AsRef<str>) {
        self.log(Severity::Warning, line);
    }

    pub fn error(&self, line: impl AsRef<str>) {
        self.log(Severity::Error, line);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Severity::Info, Arc::new(TracingSink))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// Install a `tracing` subscriber filtered at the given severity.
///
/// Intended for binaries and ad-hoc test runs; repeated calls are no-ops.
pub fn init_logging(threshold: Severity) {
    let filter = EnvFilter::new(format!("seqbench={}", threshold.to_tracing_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}

//! Utility modules
//!
//! Logging and timing support for the harness.

mod logger;
mod timer;

pub use logger::{init_logging, LogSink, Logger, MemorySink, Severity, TracingSink};
pub use timer::{Clock, ManualClock, MonotonicClock, Timer};

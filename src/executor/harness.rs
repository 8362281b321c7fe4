//! Benchmark harness
//!
//! Owns the ordered test registry, the duration log, and the repetition
//! counter. Orchestrates `set_up → test₁ … testₙ → tear_down` per repetition
//! through the sequential runner, times every operation against the injected
//! clock, and derives the aggregated report on demand.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::BoxFuture;
use thiserror::Error;

use crate::executor::sequence::run_sequentially;
use crate::models::{BoxError, Hook, Report, ReportEntry, TestCase};
use crate::utils::{Clock, LogSink, Logger, MonotonicClock, Severity, Timer};

/// Lazily-constructed step inside one repetition.
type Step<'a> = Box<dyn FnOnce() -> BoxFuture<'a, Result<(), BenchmarkError>> + Send + 'a>;

/// Failure of a benchmark run.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// A validator resolved `false` for the named test.
    #[error("{name} validation failed")]
    ValidationFailed { name: String },
    /// The subject system failed (in an operation, a hook, or a validator);
    /// the original failure value is carried unchanged.
    #[error("{0}")]
    Subject(BoxError),
}

/// Harness executing scheduled asynchronous tests in order and storing
/// their durations.
///
/// One instance is one isolated measurement campaign: the duration log and
/// repetition counter are owned by the instance and survive across `run`
/// calls, including failed ones. Concurrent `run` calls on the same instance
/// are unsupported (they would race on the repetition counter and interleave
/// duration samples); callers must serialize them.
///
/// `T` is the payload type produced by every scheduled operation;
/// heterogeneous suites typically use `serde_json::Value`.
pub struct Benchmark<T> {
    name: String,
    tests: Vec<TestCase<T>>,
    set_up: Hook,
    tear_down: Hook,
    /// Duration samples in milliseconds, keyed by test name.
    samples: Mutex<HashMap<String, Vec<f64>>>,
    current_repetition: AtomicU32,
    logger: Logger,
    clock: Arc<dyn Clock>,
}

impl<T: Send + 'static> Benchmark<T> {
    /// Create a harness with no-op hooks, an `Info` log threshold, the
    /// `tracing`-backed sink, and the real monotonic clock.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
            set_up: noop_hook(),
            tear_down: noop_hook(),
            samples: Mutex::new(HashMap::new()),
            current_repetition: AtomicU32::new(0),
            logger: Logger::default(),
            clock: Arc::new(MonotonicClock::new()),
        }
    }

    /// Hook invoked before the tests of every repetition.
    pub fn with_set_up<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.set_up = Box::new(move || Box::pin(hook()));
        self
    }

    /// Hook invoked after the tests of every repetition.
    pub fn with_tear_down<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.tear_down = Box::new(move || Box::pin(hook()));
        self
    }

    /// Lowest severity that gets emitted.
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.logger = self.logger.with_threshold(threshold);
        self
    }

    /// Replace the log sink.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.logger = self.logger.with_sink(sink);
        self
    }

    /// Replace the clock used for duration measurement.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of scheduled test cases.
    pub fn scheduled(&self) -> usize {
        self.tests.len()
    }

    /// Append a test case with the default always-true validator.
    ///
    /// Names are not checked for uniqueness; two cases scheduled under the
    /// same name share one duration bucket and one report entry.
    pub fn schedule<F, Fut>(&mut self, name: impl Into<String>, operation: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, BoxError>> + Send + 'static,
    {
        self.schedule_case(TestCase::new(name, operation));
    }

    /// Append a fully configured test case.
    pub fn schedule_case(&mut self, test: TestCase<T>) {
        self.tests.push(test);
    }

    /// Execute every scheduled test, in registration order, `repetitions`
    /// times (0 is treated as a single repetition).
    ///
    /// Repetitions run strictly in sequence; the first failure anywhere
    /// (set-up, a test operation, its validator, or tear-down) aborts the
    /// remaining steps of that repetition and all later repetitions. On
    /// success the derived report is logged (compact at `Info`, pretty at
    /// `Fine`) and returned; duration samples accumulated by a failed run
    /// stay in place for inspection via [`Benchmark::results`].
    pub async fn run(&self, repetitions: u32) -> Result<Report, BenchmarkError> {
        let repetitions = repetitions.max(1);
        run_sequentially((0..repetitions).map(move |_| move || self.run_repetition())).await?;

        let report = self.results();
        self.logger.info(format!("RESULT: {}", report.to_json()));
        self.logger.fine(format!("RESULT: {}", report.to_json_pretty()));
        Ok(report)
    }

    /// [`Benchmark::run`] driven by a freshly built current-thread Tokio
    /// runtime, for callers outside any async context.
    pub fn run_blocking(&self, repetitions: u32) -> Result<Report, BenchmarkError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| BenchmarkError::Subject(Box::new(e)))?;
        runtime.block_on(self.run(repetitions))
    }

    /// Derive the report from the samples accumulated so far.
    ///
    /// Synchronous and side-effect free; callable at any time, including
    /// mid-run or after a failed run. Tests without samples report
    /// `"unavailable"`; skip-recording tests are absent entirely.
    pub fn results(&self) -> Report {
        let samples = self.lock_samples();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut entries = Vec::new();

        for test in &self.tests {
            if test.skip_recording || !seen.insert(test.name.as_str()) {
                continue;
            }
            let recorded = samples.get(&test.name).map(Vec::as_slice).unwrap_or(&[]);
            entries.push(ReportEntry::from_samples(test.name.clone(), recorded));
        }

        Report::new(self.name.clone(), entries)
    }

    /// One full `set_up → tests → tear_down` pass.
    async fn run_repetition(&self) -> Result<(), BenchmarkError> {
        let repetition = self.current_repetition.fetch_add(1, Ordering::SeqCst) + 1;
        self.logger.fine(format!("REPETITION: {repetition}"));

        let mut steps: Vec<Step<'_>> = Vec::with_capacity(self.tests.len() + 2);
        steps.push(Box::new(move || {
            Box::pin(async move { (self.set_up)().await.map_err(BenchmarkError::Subject) })
        }));
        for test in &self.tests {
            steps.push(Box::new(move || {
                Box::pin(self.run_one_test(test, repetition))
            }));
        }
        steps.push(Box::new(move || {
            Box::pin(async move { (self.tear_down)().await.map_err(BenchmarkError::Subject) })
        }));

        run_sequentially(steps).await
    }

    /// Run a single test: time it, record the duration, validate the result.
    async fn run_one_test(&self, test: &TestCase<T>, repetition: u32) -> Result<(), BenchmarkError> {
        self.logger
            .fine(format!("---------- Running {} ----------", test.name));

        let timer = Timer::start(self.clock.clone());
        let value = (test.operation)().await.map_err(BenchmarkError::Subject)?;
        let duration_ms = timer.elapsed_ms();

        // Duration capture precedes validation: the sample lands even when
        // validation is about to fail the run.
        if !test.skip_recording {
            self.lock_samples()
                .entry(test.name.clone())
                .or_default()
                .push(duration_ms);
        }

        // Only the first repetition pays for validation; identical test
        // bodies are assumed to stay structurally valid on later runs.
        let validated = if repetition > 1 {
            true
        } else {
            (test.validator)(value)
                .await
                .map_err(BenchmarkError::Subject)?
        };

        if validated {
            self.logger
                .fine(format!("PASSED {}: {duration_ms:.3}", test.name));
            Ok(())
        } else {
            self.logger.fine(format!("FAILED {}", test.name));
            Err(BenchmarkError::ValidationFailed {
                name: test.name.clone(),
            })
        }
    }

    fn lock_samples(&self) -> MutexGuard<'_, HashMap<String, Vec<f64>>> {
        self.samples.lock().expect("duration log lock poisoned")
    }
}

fn noop_hook() -> Hook {
    Box::new(|| Box::pin(async { Ok(()) }))
}

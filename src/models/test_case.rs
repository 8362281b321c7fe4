//! Scheduled test case model
//!
//! A test case pairs a named asynchronous operation with an optional result
//! validator. Cases are immutable once scheduled; identity is registration
//! order, and names are deliberately not checked for uniqueness (samples
//! aggregate by name, see the harness documentation).

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;

/// Failure value produced by the subject system under test.
///
/// Forwarded through the harness unchanged, never wrapped.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A scheduled zero-argument asynchronous operation.
pub type Operation<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, BoxError>> + Send + Sync>;

/// Asynchronous predicate over an operation's result.
pub type Validator<T> =
    Box<dyn Fn(T) -> BoxFuture<'static, Result<bool, BoxError>> + Send + Sync>;

/// Set-up or tear-down hook, run once per repetition.
pub type Hook = Box<dyn Fn() -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// A registered test case.
///
/// `T` is the payload type every operation in one harness produces;
/// heterogeneous suites typically use `serde_json::Value`.
pub struct TestCase<T> {
    pub(crate) name: String,
    pub(crate) operation: Operation<T>,
    pub(crate) validator: Validator<T>,
    pub(crate) skip_recording: bool,
}

impl<T: Send + 'static> TestCase<T> {
    /// Create a case with the default always-true validator and recording on.
    pub fn new<F, Fut>(name: impl Into<String>, operation: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, BoxError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            operation: Box::new(move || Box::pin(operation())),
            validator: Box::new(|_| Box::pin(async { Ok(true) })),
            skip_recording: false,
        }
    }

    /// Replace the default validator.
    ///
    /// Resolving `Ok(false)` fails the run with a validation error; an `Err`
    /// propagates like any other subject failure.
    pub fn with_validator<F, Fut>(mut self, validator: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, BoxError>> + Send + 'static,
    {
        self.validator = Box::new(move |value| Box::pin(validator(value)));
        self
    }

    /// Exclude this case from timing aggregation and reporting.
    pub fn skip_recording(mut self) -> Self {
        self.skip_recording = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_recorded(&self) -> bool {
        !self.skip_recording
    }
}

impl<T> fmt::Debug for TestCase<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("skip_recording", &self.skip_recording)
            .finish_non_exhaustive()
    }
}

//! Sequential execution primitive
//!
//! Runs an ordered list of lazily-produced futures strictly one at a time,
//! aborting on the first failure. The failure value is returned unchanged.
//! This primitive does pure ordering: no concurrency, no retries, no
//! timeouts. The harness reuses it both for the steps inside one repetition
//! and for the repetitions themselves.

use std::future::Future;

/// Run `steps` in order, one at a time.
///
/// Step `i + 1` is not even constructed until step `i` has resolved
/// successfully; the first error short-circuits the rest and is returned
/// as-is. An empty sequence succeeds.
pub async fn run_sequentially<E, S, Fut>(steps: impl IntoIterator<Item = S>) -> Result<(), E>
where
    S: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    for step in steps {
        step().await?;
    }
    Ok(())
}

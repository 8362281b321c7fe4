//! Integration tests
//!
//! Exercise the harness end to end against a small in-memory data store,
//! the way it would drive a real subject system: seeded set-up, ordered
//! insert/update/delete operations, result validators, and report output.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use seqbench::{
    Benchmark, BenchmarkError, BoxError, MemorySink, OutputFormat, ReportFormatter, TestCase,
};

/// Minimal async data store standing in for the subject system.
#[derive(Default)]
struct MemoryStore {
    rows: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    async fn insert(&self, key: &str, value: Value) -> Result<Value, BoxError> {
        let mut rows = self.rows.lock().await;
        rows.insert(key.to_string(), value);
        Ok(json!({ "rows": rows.len() }))
    }

    async fn update(&self, key: &str, value: Value) -> Result<Value, BoxError> {
        let mut rows = self.rows.lock().await;
        match rows.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(json!({ "updated": 1 }))
            }
            None => Err(format!("no row for key {key}").into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<Value, BoxError> {
        let mut rows = self.rows.lock().await;
        let removed = rows.remove(key).is_some();
        Ok(json!({ "removed": removed }))
    }

    async fn count(&self) -> usize {
        self.rows.lock().await.len()
    }

    async fn clear(&self) {
        self.rows.lock().await.clear();
    }
}

fn store_suite(store: &Arc<MemoryStore>) -> Benchmark<Value> {
    let mut bench: Benchmark<Value> = Benchmark::new("memory-store")
        .with_sink(Arc::new(MemorySink::new()))
        .with_set_up({
            let store = store.clone();
            move || {
                let store = store.clone();
                async move {
                    store.clear().await;
                    store.insert("seed", json!({ "id": 0 })).await?;
                    Ok(())
                }
            }
        });

    {
        let store = store.clone();
        bench.schedule_case(
            TestCase::new("insert", move || {
                let store = store.clone();
                async move { store.insert("job-1", json!({ "salary": 1000 })).await }
            })
            .with_validator(|result| async move { Ok(result["rows"] == json!(2)) }),
        );
    }
    {
        let store = store.clone();
        bench.schedule_case(
            TestCase::new("update", move || {
                let store = store.clone();
                async move { store.update("job-1", json!({ "salary": 2000 })).await }
            })
            .with_validator(|result| async move { Ok(result == json!({ "updated": 1 })) }),
        );
    }
    {
        let store = store.clone();
        bench.schedule_case(
            TestCase::new("delete", move || {
                let store = store.clone();
                async move { store.delete("job-1").await }
            })
            .with_validator(|result| async move { Ok(result["removed"] == json!(true)) }),
        );
    }

    bench
}

#[tokio::test]
async fn full_suite_passes_and_reports_means() {
    let store = Arc::new(MemoryStore::default());
    let bench = store_suite(&store);

    let report = bench.run(2).await.unwrap();

    assert_eq!(report.entries.len(), 3);
    let names: Vec<&str> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["insert", "update", "delete"]);

    for entry in &report.entries {
        assert!(entry.is_measured(), "{} should be measured", entry.name);
        assert!(entry.value.parse::<f64>().is_ok());
        // Mean formatted to exactly three fractional digits.
        assert_eq!(entry.value.split('.').nth(1).map(str::len), Some(3));
    }

    // Each repetition re-seeds and then deletes job-1 again.
    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn report_serializes_for_external_consumers() {
    let store = Arc::new(MemoryStore::default());
    let bench = store_suite(&store);
    let report = bench.run(1).await.unwrap();

    let json = ReportFormatter::new(OutputFormat::Json).format_report(&report);
    let parsed: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["name"], json!("memory-store"));
    assert!(parsed["data"]["insert"].is_string());

    let csv = ReportFormatter::new(OutputFormat::Csv).format_report(&report);
    assert!(csv.starts_with("test_name,mean_ms\n"));
    assert!(csv.contains("\"update\","));
}

#[tokio::test]
async fn validation_failure_rejects_run_but_keeps_recorded_durations() {
    let mut bench: Benchmark<Value> =
        Benchmark::new("aborted").with_sink(Arc::new(MemorySink::new()));

    bench.schedule_case(
        TestCase::new("t1", || async {
            tokio::time::sleep(Duration::from_millis(2)).await;
            Ok(json!(1))
        })
        .with_validator(|value| async move { Ok(value == json!(1)) }),
    );
    bench.schedule_case(
        TestCase::new("t2", || async {
            tokio::time::sleep(Duration::from_millis(8)).await;
            Ok(json!(2))
        })
        .with_validator(|_| async move { Ok(false) }),
    );

    let t3_ran = Arc::new(AtomicBool::new(false));
    {
        let flag = t3_ran.clone();
        bench.schedule("t3", move || {
            flag.store(true, Ordering::SeqCst);
            async { Ok(json!(3)) }
        });
    }

    let err = bench.run(2).await.unwrap_err();
    assert!(matches!(
        err,
        BenchmarkError::ValidationFailed { ref name } if name == "t2"
    ));

    // t1 and t2 keep their repetition-1 samples; t3 never ran.
    let report = bench.results();
    assert_ne!(report.get("t1"), Some("unavailable"));
    assert_ne!(report.get("t2"), Some("unavailable"));
    assert_eq!(report.get("t3"), Some("unavailable"));
    assert!(!t3_ran.load(Ordering::SeqCst));

    let t1_ms: f64 = report.get("t1").unwrap().parse().unwrap();
    assert!(t1_ms >= 1.0, "t1 slept for 2ms, recorded {t1_ms}ms");
}

#[tokio::test]
async fn tear_down_failure_carries_the_subject_error_unchanged() {
    let mut bench: Benchmark<Value> = Benchmark::new("teardown")
        .with_sink(Arc::new(MemorySink::new()))
        .with_tear_down(|| async { Err(anyhow::anyhow!("subject rejected teardown").into()) });

    bench.schedule("noop", || async { Ok(json!(0)) });

    let err = bench.run(1).await.unwrap_err();
    assert_eq!(err.to_string(), "subject rejected teardown");
    assert!(matches!(err, BenchmarkError::Subject(_)));

    // The test itself completed before tear-down failed, so its duration
    // is already in the log.
    assert_ne!(bench.results().get("noop"), Some("unavailable"));
}

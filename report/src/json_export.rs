//! JSON export functionality

use anyhow::{Context, Result};
use order_bench_core::Report;
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes run summaries as JSON
pub struct JsonExporter;

impl JsonExporter {
    /// Summary document for a report
    pub fn to_value(report: &Report) -> Value {
        let status_codes: serde_json::Map<String, Value> = report
            .status_codes
            .iter()
            .map(|(code, count)| (code.to_string(), json!(count)))
            .collect();

        json!({
            "started_at": report.started_at.to_rfc3339(),
            "summary": {
                "total_requests": report.total_submitted,
                "successful_requests": report.success_count,
                "failed_requests": report.failure_count,
                "success_rate_percent": report.success_rate() * 100.0,
                "failure_rate_percent": report.failure_rate() * 100.0,
                "total_time_secs": report.total_duration.as_secs_f64(),
                "requests_per_second": report.requests_per_second(),
            },
            "latency": {
                "avg_secs": report.average_latency().as_secs_f64(),
                "min_secs": report.min_latency.map(|d| d.as_secs_f64()),
                "max_secs": report.max_latency.map(|d| d.as_secs_f64()),
            },
            "status_codes": status_codes,
            "failure_sample": report.failure_sample.as_ref().map(|sample| json!({
                "order_id": sample.work_item_id.to_string(),
                "error": sample.error_description,
            })),
        })
    }

    /// Export the summary to a JSON file
    pub fn export(report: &Report, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &Self::to_value(report))
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_bench_core::{aggregate_iter, Outcome, WorkItemId};
    use std::time::Duration;

    fn report() -> Report {
        aggregate_iter(
            vec![
                Outcome::success(WorkItemId::from_random_bytes([1; 16]), 200, Duration::from_millis(10), ""),
                Outcome::success(WorkItemId::from_random_bytes([2; 16]), 503, Duration::from_millis(30), ""),
                Outcome::failure(WorkItemId::from_random_bytes([3; 16]), "connection error: refused"),
                Outcome::success(WorkItemId::from_random_bytes([4; 16]), 200, Duration::from_millis(20), ""),
            ],
            Duration::from_millis(500),
        )
    }

    #[test]
    fn test_to_value() {
        let value = JsonExporter::to_value(&report());

        assert_eq!(value["summary"]["total_requests"], 4);
        assert_eq!(value["summary"]["successful_requests"], 3);
        assert_eq!(value["summary"]["failed_requests"], 1);
        assert_eq!(value["summary"]["success_rate_percent"], 75.0);
        assert_eq!(value["summary"]["failure_rate_percent"], 25.0);
        assert_eq!(value["summary"]["requests_per_second"], 8.0);
        assert_eq!(value["status_codes"]["200"], 2);
        assert_eq!(value["status_codes"]["503"], 1);
        assert_eq!(value["latency"]["min_secs"], 0.01);
        assert_eq!(value["latency"]["max_secs"], 0.03);
        assert_eq!(value["failure_sample"]["error"], "connection error: refused");
    }

    #[test]
    fn test_empty_report_has_null_sample() {
        let value = JsonExporter::to_value(&Report::new(0));

        assert!(value["failure_sample"].is_null());
        assert!(value["latency"]["min_secs"].is_null());
        assert_eq!(value["summary"]["requests_per_second"], 0.0);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        JsonExporter::export(&report(), &path).unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let expected = JsonExporter::to_value(&report());
        assert_eq!(written["summary"], expected["summary"]);
        assert_eq!(written["status_codes"], expected["status_codes"]);
        assert!(written["started_at"].is_string());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");

        let err = JsonExporter::export(&report(), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to create report file"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_export_to_full_device_fails() {
        let err = JsonExporter::export(&Report::new(0), "/dev/full").unwrap_err();
        assert!(err.to_string().contains("Failed to write report file"));
    }
}

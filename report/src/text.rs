//! Terminal summary

use order_bench_core::Report;
use std::fmt::Write;

/// Width of the `=` and `-` rules framing console output
pub const RULE_WIDTH: usize = 60;

/// Renders a [`Report`] the way the CLI prints it
pub struct TextReport;

impl TextReport {
    /// Multi-line summary, ending with a newline
    pub fn render(report: &Report) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = Self::write_to(&mut out, report);
        out
    }

    fn write_to(out: &mut String, report: &Report) -> std::fmt::Result {
        writeln!(out, "RESULTS:")?;
        writeln!(out, "  Total requests: {}", report.total_submitted)?;
        writeln!(out, "  Successes: {}", report.success_count)?;
        writeln!(out, "  Failures: {}", report.failure_count)?;
        writeln!(
            out,
            "  Total time: {:.2} seconds",
            report.total_duration.as_secs_f64()
        )?;
        writeln!(
            out,
            "  Mean time per request: {:.3} seconds",
            report.average_latency().as_secs_f64()
        )?;
        if let (Some(min), Some(max)) = (report.min_latency, report.max_latency) {
            writeln!(
                out,
                "  Fastest / slowest: {:.3} / {:.3} seconds",
                min.as_secs_f64(),
                max.as_secs_f64()
            )?;
        }
        writeln!(
            out,
            "  Requests per second: {:.2}",
            report.requests_per_second()
        )?;

        if !report.status_codes.is_empty() {
            writeln!(out, "  HTTP status codes:")?;
            for (code, count) in &report.status_codes {
                writeln!(out, "    {}: {} requests", code, count)?;
            }
        }

        if let Some(sample) = &report.failure_sample {
            writeln!(out)?;
            writeln!(out, "Example of a failed order:")?;
            writeln!(out, "  Order ID: {}", sample.work_item_id)?;
            writeln!(out, "  Error: {}", sample.error_description)?;
        }

        Ok(())
    }

    /// `=` banner announcing a run
    pub fn banner(url: &str, requests: usize, concurrency: usize) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!(
            "{rule}\nSTARTING LOAD TEST\nURL: {url}\nRequests: {requests}\nConcurrency: {concurrency}\n{rule}\n"
        )
    }
}

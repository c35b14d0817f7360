//! Incremental aggregation of outcomes into a report

use std::time::Duration;

use futures::{Stream, StreamExt};

use crate::metrics::{FailureSample, Report};
use crate::response::Outcome;

/// Folds outcomes into a [`Report`] one at a time
///
/// Only running totals are kept; individual outcomes are not retained.
#[derive(Debug, Clone)]
pub struct Aggregator {
    report: Report,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self {
            report: Report::new(0),
        }
    }

    /// Account for one outcome
    pub fn record(&mut self, outcome: &Outcome) {
        let report = &mut self.report;
        report.total_submitted += 1;

        match outcome {
            Outcome::Success {
                status_code,
                latency,
                ..
            } => {
                report.success_count += 1;
                report.latency_sum += *latency;
                report.latency_count += 1;
                report.min_latency = Some(report.min_latency.map_or(*latency, |m| m.min(*latency)));
                report.max_latency = Some(report.max_latency.map_or(*latency, |m| m.max(*latency)));
                *report.status_codes.entry(*status_code).or_insert(0) += 1;
            }
            Outcome::Failure {
                work_item_id,
                error_description,
            } => {
                report.failure_count += 1;
                if report.failure_sample.is_none() {
                    report.failure_sample = Some(FailureSample {
                        work_item_id: *work_item_id,
                        error_description: error_description.clone(),
                    });
                }
            }
        }
    }

    /// Outcomes recorded so far
    pub fn completed(&self) -> usize {
        self.report.total_submitted
    }

    /// Running totals so far
    pub fn snapshot(&self) -> &Report {
        &self.report
    }

    /// Close the run and hand out the final report
    ///
    /// `total_duration` is the wall-clock time the caller measured around
    /// dispatch plus aggregation; throughput is derived from it.
    pub fn finish(mut self, total_duration: Duration) -> Report {
        self.report.total_duration = total_duration;
        self.report
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Consume an outcome stream fully and build the report
pub async fn aggregate<S>(outcomes: S, total_duration: Duration) -> Report
where
    S: Stream<Item = Outcome>,
{
    let mut aggregator = Aggregator::new();
    futures::pin_mut!(outcomes);
    while let Some(outcome) = outcomes.next().await {
        aggregator.record(&outcome);
    }
    aggregator.finish(total_duration)
}

/// Synchronous counterpart of [`aggregate`]
pub fn aggregate_iter<I>(outcomes: I, total_duration: Duration) -> Report
where
    I: IntoIterator<Item = Outcome>,
{
    let mut aggregator = Aggregator::new();
    for outcome in outcomes {
        aggregator.record(&outcome);
    }
    aggregator.finish(total_duration)
}

//! Aggregate statistics for a load run

use crate::request::WorkItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// The first transport failure observed during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureSample {
    /// Work item that failed
    pub work_item_id: WorkItemId,
    /// What went wrong
    pub error_description: String,
}

/// Final statistics of a load run
///
/// Built incrementally by the [`Aggregator`](crate::dispatcher::Aggregator)
/// and handed to the caller once every outcome has been consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Orders submitted to the dispatcher
    pub total_submitted: usize,

    /// Orders that received any HTTP response
    pub success_count: usize,

    /// Orders that failed at the transport level
    pub failure_count: usize,

    /// Sum of latencies over successes
    pub latency_sum: Duration,

    /// Number of latencies in `latency_sum`
    pub latency_count: usize,

    /// Fastest success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_latency: Option<Duration>,

    /// Slowest success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_latency: Option<Duration>,

    /// Occurrences of each status code
    pub status_codes: BTreeMap<u16, usize>,

    /// Wall-clock duration of dispatch plus aggregation
    pub total_duration: Duration,

    /// When the run started
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// First failure seen in completion order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_sample: Option<FailureSample>,
}

impl Report {
    /// Empty report for a run of `total_submitted` orders
    pub fn new(total_submitted: usize) -> Self {
        Self {
            total_submitted,
            success_count: 0,
            failure_count: 0,
            latency_sum: Duration::ZERO,
            latency_count: 0,
            min_latency: None,
            max_latency: None,
            status_codes: BTreeMap::new(),
            total_duration: Duration::ZERO,
            started_at: chrono::Utc::now(),
            failure_sample: None,
        }
    }

    /// Number of outcomes accounted for
    pub fn total_completed(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// Mean latency of successes, zero when there were none
    pub fn average_latency(&self) -> Duration {
        if self.latency_count == 0 {
            Duration::ZERO
        } else {
            match u32::try_from(self.latency_count) {
                Ok(count) => self.latency_sum / count,
                Err(_) => self.latency_sum.div_f64(self.latency_count as f64),
            }
        }
    }

    /// Orders submitted per second of wall-clock time, zero for an instant run
    pub fn requests_per_second(&self) -> f64 {
        let secs = self.total_duration.as_secs_f64();
        if secs > 0.0 {
            self.total_submitted as f64 / secs
        } else {
            0.0
        }
    }

    /// Get the success rate (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total_submitted == 0 {
            0.0
        } else {
            self.success_count as f64 / self.total_submitted as f64
        }
    }

    /// Get the failure rate (0.0 - 1.0)
    pub fn failure_rate(&self) -> f64 {
        if self.total_submitted == 0 {
            0.0
        } else {
            self.failure_count as f64 / self.total_submitted as f64
        }
    }
}

//! Load run configuration types

use crate::executor::DEFAULT_REQUEST_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default order intake endpoint
pub const DEFAULT_TARGET_URL: &str = "http://localhost:8080/v1/api/orders";

/// Default number of orders per run
pub const DEFAULT_REQUEST_COUNT: usize = 10_000;

/// Default capacity of the completion channel between workers and the stream
pub const DEFAULT_OUTCOME_BUFFER: usize = 10_000;

fn default_outcome_buffer() -> usize {
    DEFAULT_OUTCOME_BUFFER
}

/// Load run configuration
///
/// Defines where orders are sent, how many, and how many may be in flight
/// at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Target URL for the POST requests
    pub target_url: String,

    /// Number of orders to send
    pub requests: usize,

    /// Concurrency limit; `None` means one slot per order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<usize>,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            requests: DEFAULT_REQUEST_COUNT,
            max_workers: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl LoadConfig {
    /// Create a config for `requests` orders against `target_url`
    pub fn new(target_url: impl Into<String>, requests: usize) -> Self {
        Self {
            target_url: target_url.into(),
            requests,
            ..Default::default()
        }
    }

    /// Set the concurrency limit
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Concurrency limit actually used for the run
    pub fn effective_concurrency(&self) -> usize {
        self.max_workers.unwrap_or(self.requests)
    }

    /// Dispatcher settings derived from this config
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            concurrency: self.max_workers,
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_url.trim().is_empty() {
            return Err(ConfigError::InvalidTarget("target url must not be empty".into()));
        }

        if !(self.target_url.starts_with("http://") || self.target_url.starts_with("https://")) {
            return Err(ConfigError::InvalidTarget(format!(
                "target url must use http or https: {}",
                self.target_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "timeout must be greater than zero".into(),
            ));
        }

        self.dispatch_config().validate()
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Maximum in-flight executions; `None` means one per item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Outcomes buffered between workers and the consumer before workers wait
    #[serde(default = "default_outcome_buffer")]
    pub outcome_buffer: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            concurrency: None,
            outcome_buffer: DEFAULT_OUTCOME_BUFFER,
        }
    }
}

impl DispatchConfig {
    /// Create a config with a fixed concurrency limit
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: Some(concurrency),
            ..Default::default()
        }
    }

    /// Set the completion channel capacity
    pub fn with_outcome_buffer(mut self, size: usize) -> Self {
        self.outcome_buffer = size;
        self
    }

    /// Concurrency limit for a run of `items` work items
    ///
    /// Never below 1, so an empty run still has a well-formed pool.
    pub fn limit_for(&self, items: usize) -> usize {
        self.concurrency.unwrap_or(items).max(1)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == Some(0) {
            return Err(ConfigError::InvalidConcurrency(
                "concurrency must be at least 1".into(),
            ));
        }

        if self.outcome_buffer == 0 {
            return Err(ConfigError::InvalidConcurrency(
                "outcome buffer must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid concurrency value
    #[error("Invalid concurrency: {0}")]
    InvalidConcurrency(String),

    /// Invalid target URL
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Invalid timeout
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

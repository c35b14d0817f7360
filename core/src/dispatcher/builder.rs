//! Builder pattern for Dispatcher construction

use std::sync::Arc;

use crate::config::DispatchConfig;
use crate::error::{BenchError, BenchResult};
use crate::traits::Executor;

use super::executor::Dispatcher;

/// Builder for creating a Dispatcher with proper configuration
///
/// # Example
///
/// ```ignore
/// let dispatcher = DispatcherBuilder::new()
///     .concurrency(10)
///     .executor(executor)
///     .build()?;
/// ```
pub struct DispatcherBuilder {
    config: DispatchConfig,
    executor: Option<Arc<dyn Executor>>,
}

impl DispatcherBuilder {
    /// Create a new dispatcher builder with default configuration
    pub fn new() -> Self {
        Self {
            config: DispatchConfig::default(),
            executor: None,
        }
    }

    /// Set the full dispatch configuration
    pub fn config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the concurrency limit
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = Some(concurrency);
        self
    }

    /// Set or clear the concurrency limit (`None` means one slot per item)
    pub fn max_workers(mut self, max_workers: Option<usize>) -> Self {
        self.config.concurrency = max_workers;
        self
    }

    /// Set the completion channel capacity
    pub fn outcome_buffer(mut self, size: usize) -> Self {
        self.config.outcome_buffer = size;
        self
    }

    /// Set the executor
    pub fn executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Build the dispatcher
    ///
    /// # Errors
    ///
    /// Returns an error if the executor is not set, or if configuration
    /// validation fails.
    pub fn build(self) -> BenchResult<Dispatcher> {
        let executor = self
            .executor
            .ok_or_else(|| BenchError::missing_config("executor"))?;

        self.config
            .validate()
            .map_err(|e| BenchError::config(e.to_string()))?;

        Ok(Dispatcher::new(self.config, executor))
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Builder pattern for Worker construction

use crate::error::{BenchError, BenchResult};
use crate::response::Outcome;
use crate::traits::Executor;

use super::executor::Worker;
use super::queue::WorkQueue;

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};

/// Builder for creating Worker instances
///
/// # Example
/// ```ignore
/// let worker = WorkerBuilder::new(0)
///     .executor(executor)
///     .queue(queue)
///     .outcome_tx(tx)
///     .semaphore(semaphore)
///     .build()?;
/// ```
pub struct WorkerBuilder {
    id: usize,
    executor: Option<Arc<dyn Executor>>,
    queue: Option<Arc<WorkQueue>>,
    outcome_tx: Option<mpsc::Sender<Outcome>>,
    semaphore: Option<Arc<Semaphore>>,
}

impl WorkerBuilder {
    /// Create a new builder with the given worker ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            executor: None,
            queue: None,
            outcome_tx: None,
            semaphore: None,
        }
    }

    /// Set the executor
    pub fn executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Set the shared work queue
    pub fn queue(mut self, queue: Arc<WorkQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Set the outcome channel sender
    pub fn outcome_tx(mut self, tx: mpsc::Sender<Outcome>) -> Self {
        self.outcome_tx = Some(tx);
        self
    }

    /// Set the execution slot semaphore
    pub fn semaphore(mut self, semaphore: Arc<Semaphore>) -> Self {
        self.semaphore = Some(semaphore);
        self
    }

    /// Build the Worker
    ///
    /// # Errors
    /// Returns an error if any required field is missing.
    pub fn build(self) -> BenchResult<Worker> {
        let executor = self
            .executor
            .ok_or_else(|| BenchError::missing_config("executor"))?;
        let queue = self
            .queue
            .ok_or_else(|| BenchError::missing_config("queue"))?;
        let outcome_tx = self
            .outcome_tx
            .ok_or_else(|| BenchError::missing_config("outcome_tx"))?;
        let semaphore = self
            .semaphore
            .ok_or_else(|| BenchError::missing_config("semaphore"))?;

        Ok(Worker::new(self.id, executor, queue, outcome_tx, semaphore))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::WorkItem;
    use async_trait::async_trait;

    struct NoopExecutor;

    #[async_trait]
    impl Executor for NoopExecutor {
        async fn execute(&self, item: &WorkItem) -> Outcome {
            Outcome::failure(item.id, "noop")
        }
    }

    fn full_builder() -> WorkerBuilder {
        let (tx, _rx) = mpsc::channel(1);
        WorkerBuilder::new(3)
            .executor(Arc::new(NoopExecutor))
            .queue(Arc::new(WorkQueue::default()))
            .outcome_tx(tx)
            .semaphore(Arc::new(Semaphore::new(1)))
    }

    #[test]
    fn test_builder_complete() {
        let worker = full_builder().build().unwrap();
        assert_eq!(worker.id(), 3);
    }

    #[test]
    fn test_builder_missing_executor() {
        let (tx, _rx) = mpsc::channel(1);
        let result = WorkerBuilder::new(0)
            .queue(Arc::new(WorkQueue::default()))
            .outcome_tx(tx)
            .semaphore(Arc::new(Semaphore::new(1)))
            .build();

        let err = result.unwrap_err();
        assert!(err.message.contains("executor"));
    }

    #[test]
    fn test_builder_missing_queue() {
        let (tx, _rx) = mpsc::channel(1);
        let result = WorkerBuilder::new(0)
            .executor(Arc::new(NoopExecutor))
            .outcome_tx(tx)
            .semaphore(Arc::new(Semaphore::new(1)))
            .build();

        assert!(result.unwrap_err().message.contains("queue"));
    }

    #[test]
    fn test_builder_missing_outcome_tx() {
        let result = WorkerBuilder::new(0)
            .executor(Arc::new(NoopExecutor))
            .queue(Arc::new(WorkQueue::default()))
            .semaphore(Arc::new(Semaphore::new(1)))
            .build();

        assert!(result.unwrap_err().message.contains("outcome_tx"));
    }

    #[test]
    fn test_builder_missing_semaphore() {
        let (tx, _rx) = mpsc::channel(1);
        let result = WorkerBuilder::new(0)
            .executor(Arc::new(NoopExecutor))
            .queue(Arc::new(WorkQueue::default()))
            .outcome_tx(tx)
            .build();

        assert!(result.unwrap_err().message.contains("semaphore"));
    }
}

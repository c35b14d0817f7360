//! Worker execution loop

use crate::error::{BenchError, BenchResult};
use crate::response::Outcome;
use crate::traits::Executor;

use super::queue::WorkQueue;
use super::stats::WorkerStats;

use std::sync::Arc;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, mpsc, Semaphore};

/// Failure description for an order interrupted by a shutdown
pub const CANCELLED_IN_FLIGHT: &str = "cancelled while in flight";

/// Failure description for an order never started because of a shutdown
pub const CANCELLED_BEFORE_DISPATCH: &str = "cancelled before dispatch";

/// Worker executes orders in a loop: claim -> execute -> report -> repeat
///
/// Workers are tokio tasks managed by the Dispatcher. They share the
/// executor, queue and semaphore via Arc, and send outcomes through an
/// mpsc channel.
pub struct Worker {
    /// Unique worker identifier
    id: usize,

    /// Executor (shared across workers via Arc)
    executor: Arc<dyn Executor>,

    /// Orders waiting for a slot
    queue: Arc<WorkQueue>,

    /// Channel sender for outcomes
    outcome_tx: mpsc::Sender<Outcome>,

    /// Execution slot limiter (shared semaphore)
    semaphore: Arc<Semaphore>,
}

impl Worker {
    /// Create a new worker
    pub fn new(
        id: usize,
        executor: Arc<dyn Executor>,
        queue: Arc<WorkQueue>,
        outcome_tx: mpsc::Sender<Outcome>,
        semaphore: Arc<Semaphore>,
    ) -> Self {
        Self {
            id,
            executor,
            queue,
            outcome_tx,
            semaphore,
        }
    }

    /// Run the worker loop
    ///
    /// Returns WorkerStats when the queue is exhausted, the outcome channel
    /// is closed, or a shutdown signal was handled. A closed semaphore is the
    /// only error: the pool can no longer hand out execution slots.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> BenchResult<WorkerStats> {
        let mut stats = WorkerStats::new();
        stats.start();

        tracing::debug!(worker_id = self.id, "Worker started");

        loop {
            // Check for a pending shutdown BEFORE claiming work
            if shutdown_pending(&mut shutdown) {
                tracing::debug!(worker_id = self.id, "Worker received shutdown signal");
                self.cancel_remaining(&mut stats).await;
                break;
            }

            let permit = self
                .semaphore
                .acquire()
                .await
                .map_err(|_| BenchError::shutdown())?;

            let Some(item) = self.queue.claim().await else {
                tracing::debug!(worker_id = self.id, "Queue empty, worker stopping");
                break;
            };

            let mut cancelled = false;
            let outcome = tokio::select! {
                biased;

                // Shutdown signal (highest priority)
                () = shutdown_signalled(&mut shutdown) => {
                    cancelled = true;
                    Outcome::failure(item.id, CANCELLED_IN_FLIGHT)
                }

                outcome = self.executor.execute(&item) => outcome,
            };
            drop(permit);

            stats.record(&outcome);
            if self.outcome_tx.send(outcome).await.is_err() {
                tracing::debug!(
                    worker_id = self.id,
                    "Outcome channel closed, worker stopping"
                );
                break;
            }

            if cancelled {
                tracing::debug!(worker_id = self.id, "Worker received shutdown signal");
                self.cancel_remaining(&mut stats).await;
                break;
            }
        }

        stats.stop();
        tracing::debug!(
            worker_id = self.id,
            completed = stats.completed,
            failed = stats.failed,
            elapsed_ms = ?stats.elapsed().map(|d| d.as_millis()),
            "Worker finished"
        );

        Ok(stats)
    }

    /// Resolve every still-queued order as cancelled
    ///
    /// Keeps the one-outcome-per-order invariant when a run is interrupted.
    async fn cancel_remaining(&self, stats: &mut WorkerStats) {
        for item in self.queue.drain().await {
            let outcome = Outcome::failure(item.id, CANCELLED_BEFORE_DISPATCH);
            stats.record(&outcome);
            if self.outcome_tx.send(outcome).await.is_err() {
                break;
            }
        }
    }

    /// Get the worker ID
    pub fn id(&self) -> usize {
        self.id
    }
}

fn shutdown_pending(shutdown: &mut broadcast::Receiver<()>) -> bool {
    match shutdown.try_recv() {
        Ok(()) | Err(TryRecvError::Lagged(_)) => true,
        Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => false,
    }
}

/// Resolves once a shutdown was sent, including when several signals
/// overflowed the channel. Never resolves if every sender is gone.
async fn shutdown_signalled(shutdown: &mut broadcast::Receiver<()>) {
    match shutdown.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending().await,
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("available_permits", &self.semaphore.available_permits())
            .finish()
    }
}

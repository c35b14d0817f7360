//! Dispatcher execution logic

use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc, Semaphore};

use crate::config::DispatchConfig;
use crate::error::{BenchError, BenchResult};
use crate::metrics::Report;
use crate::request::WorkItem;
use crate::response::Outcome;
use crate::traits::Executor;
use crate::worker::{WorkQueue, WorkerBuilder};

use super::aggregator::Aggregator;
use super::stream::OutcomeStream;

/// Dispatcher runs work items through a bounded pool of workers
///
/// Responsible for spawning workers, coordinating shutdown,
/// and handing outcomes back in completion order.
pub struct Dispatcher {
    /// Dispatch configuration
    pub(crate) config: DispatchConfig,

    /// Executor (shared across workers)
    pub(crate) executor: Arc<dyn Executor>,

    /// Shutdown signal sender
    pub(crate) shutdown_tx: broadcast::Sender<()>,
}

impl Dispatcher {
    /// Create a new dispatcher
    ///
    /// Use `DispatcherBuilder` for a more ergonomic construction.
    pub fn new(config: DispatchConfig, executor: Arc<dyn Executor>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            executor,
            shutdown_tx,
        }
    }

    /// Cancel the current run
    ///
    /// In-flight and queued items resolve to cancellation failures, so the
    /// outcome stream still yields one outcome per item.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Get the dispatch configuration
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Start executing `items` and return their outcomes as they complete
    ///
    /// Spawns `min(limit, items.len())` workers on the current tokio runtime.
    /// Outside of a runtime no execution slot can be created, which is
    /// reported as an orchestration error.
    pub fn dispatch(&self, items: Vec<WorkItem>) -> BenchResult<OutcomeStream> {
        self.config
            .validate()
            .map_err(|e| BenchError::config(e.to_string()))?;

        let runtime = Handle::try_current().map_err(|e| {
            BenchError::orchestration(format!("no async runtime to run workers on: {}", e))
        })?;

        let total = items.len();
        let limit = self.config.limit_for(total).min(Semaphore::MAX_PERMITS);
        let worker_count = limit.min(total);

        tracing::info!(
            items = total,
            concurrency = limit,
            workers = worker_count,
            "Starting dispatch"
        );

        let semaphore = Arc::new(Semaphore::new(limit));
        let queue = Arc::new(WorkQueue::new(items));
        let (outcome_tx, outcome_rx) =
            mpsc::channel::<Outcome>(self.config.outcome_buffer);

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let worker = WorkerBuilder::new(worker_id)
                .executor(Arc::clone(&self.executor))
                .queue(Arc::clone(&queue))
                .outcome_tx(outcome_tx.clone())
                .semaphore(Arc::clone(&semaphore))
                .build()?;
            let shutdown_rx = self.shutdown_tx.subscribe();

            handles.push(runtime.spawn(async move { worker.run(shutdown_rx).await }));
        }

        Ok(OutcomeStream {
            outcome_rx,
            handles,
            semaphore,
            limit,
            total,
            received: 0,
            finished: false,
            worker_stats: Vec::with_capacity(worker_count),
            _shutdown_tx: self.shutdown_tx.clone(),
        })
    }

    /// Dispatch `items` and aggregate every outcome into a report
    pub async fn run(&self, items: Vec<WorkItem>) -> BenchResult<Report> {
        self.run_with_observer(items, |_, _| {}).await
    }

    /// Like [`run`](Self::run), calling `observer` with the 1-based
    /// completion index and each outcome as it arrives
    ///
    /// Wall-clock time is measured around dispatch plus aggregation.
    pub async fn run_with_observer<F>(
        &self,
        items: Vec<WorkItem>,
        mut observer: F,
    ) -> BenchResult<Report>
    where
        F: FnMut(usize, &Outcome),
    {
        let start = Instant::now();
        let mut aggregator = Aggregator::new();
        let mut outcomes = self.dispatch(items)?;

        while let Some(outcome) = outcomes.next().await {
            let outcome = outcome?;
            aggregator.record(&outcome);
            observer(aggregator.completed(), &outcome);
        }

        let report = aggregator.finish(start.elapsed());
        tracing::info!(
            elapsed_secs = report.total_duration.as_secs_f64(),
            succeeded = report.success_count,
            failed = report.failure_count,
            rps = report.requests_per_second(),
            "Dispatch completed"
        );

        Ok(report)
    }

    /// Run with Ctrl+C signal handling
    ///
    /// Automatically triggers graceful shutdown on Ctrl+C.
    pub async fn run_with_signal_handling<F>(
        &self,
        items: Vec<WorkItem>,
        observer: F,
    ) -> BenchResult<Report>
    where
        F: FnMut(usize, &Outcome),
    {
        let shutdown_tx = self.shutdown_tx.clone();

        // Spawn signal handler task
        let signal_handle = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Received Ctrl+C, cancelling remaining orders...");
                    let _ = shutdown_tx.send(());
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                }
            }
        });

        let result = self.run_with_observer(items, observer).await;

        // Abort signal handler if still running
        signal_handle.abort();

        result
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish()
    }
}

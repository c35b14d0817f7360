//! Completion-ordered stream of outcomes

use std::sync::Arc;

use futures::Stream;
use tokio::sync::{broadcast, mpsc, Semaphore};
use tokio::task::JoinHandle;

use crate::error::{BenchError, BenchResult};
use crate::response::Outcome;
use crate::worker::WorkerStats;

/// Outcomes of one dispatch, yielded as executions finish
///
/// The stream ends after exactly one outcome per submitted item. If the
/// worker pool itself broke, one `Err` is yielded before the end. A stream
/// covers a single run and cannot be restarted; dropping it aborts any
/// worker still running.
pub struct OutcomeStream {
    pub(crate) outcome_rx: mpsc::Receiver<Outcome>,
    pub(crate) handles: Vec<JoinHandle<BenchResult<WorkerStats>>>,
    pub(crate) semaphore: Arc<Semaphore>,
    pub(crate) limit: usize,
    pub(crate) total: usize,
    pub(crate) received: usize,
    pub(crate) finished: bool,
    pub(crate) worker_stats: Vec<WorkerStats>,
    /// Keeps the shutdown channel open for as long as workers may listen
    pub(crate) _shutdown_tx: broadcast::Sender<()>,
}

impl OutcomeStream {
    /// Next outcome in completion order
    pub async fn next(&mut self) -> Option<BenchResult<Outcome>> {
        if self.finished {
            return None;
        }

        match self.outcome_rx.recv().await {
            Some(outcome) => {
                self.received += 1;
                Some(Ok(outcome))
            }
            None => {
                self.finished = true;
                self.join_workers().await.err().map(Err)
            }
        }
    }

    /// Adapt into a `futures::Stream`
    pub fn into_stream(self) -> impl Stream<Item = BenchResult<Outcome>> + Send {
        futures::stream::unfold(self, |mut stream| async move {
            stream.next().await.map(|item| (item, stream))
        })
    }

    /// Items submitted to this dispatch
    pub fn total(&self) -> usize {
        self.total
    }

    /// Outcomes yielded so far
    pub fn received(&self) -> usize {
        self.received
    }

    /// Executions currently holding a slot
    pub fn in_flight(&self) -> usize {
        self.limit.saturating_sub(self.semaphore.available_permits())
    }

    /// Per-worker statistics, available once the stream is exhausted
    pub fn worker_stats(&self) -> &[WorkerStats] {
        &self.worker_stats
    }

    /// Wait for every worker and check that nothing was lost
    async fn join_workers(&mut self) -> BenchResult<()> {
        let mut first_error = None;
        let mut pool = WorkerStats::new();

        for (idx, handle) in self.handles.drain(..).enumerate() {
            match handle.await {
                Ok(Ok(stats)) => {
                    tracing::debug!(
                        worker_id = idx,
                        completed = stats.completed,
                        failed = stats.failed,
                        success_rate = stats.success_rate(),
                        "Worker completed"
                    );
                    pool.merge(&stats);
                    self.worker_stats.push(stats);
                }
                Ok(Err(e)) => {
                    tracing::error!(worker_id = idx, error = %e, "Worker returned error");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                Err(e) => {
                    tracing::error!(worker_id = idx, error = %e, "Worker task panicked");
                    if first_error.is_none() {
                        first_error =
                            Some(BenchError::worker(format!("worker {} panicked: {}", idx, e)));
                    }
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        tracing::debug!(
            workers = self.worker_stats.len(),
            completed = pool.completed,
            failed = pool.failed,
            success_rate = pool.success_rate(),
            "Worker pool drained"
        );

        if self.received != self.total {
            return Err(BenchError::orchestration(format!(
                "expected {} outcomes, received {}",
                self.total, self.received
            )));
        }

        Ok(())
    }
}

impl Drop for OutcomeStream {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for OutcomeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutcomeStream")
            .field("total", &self.total)
            .field("received", &self.received)
            .field("limit", &self.limit)
            .field("finished", &self.finished)
            .finish()
    }
}

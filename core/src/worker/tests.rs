//! Integration tests for the Worker module

use super::*;
use crate::request::{WorkItem, WorkItemId};
use crate::response::Outcome;
use crate::traits::Executor;

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Semaphore};
use uuid::Uuid;

// ============================================================================
// Mock Executor
// ============================================================================

struct MockExecutor {
    delay: Option<Duration>,
    status: u16,
    counter: AtomicUsize,
}

impl MockExecutor {
    fn new(status: u16) -> Self {
        Self {
            delay: None,
            status,
            counter: AtomicUsize::new(0),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn execute(&self, item: &WorkItem) -> Outcome {
        self.counter.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Outcome::success(item.id, self.status, Duration::from_millis(1), "ok")
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn work_items(n: u128) -> Vec<WorkItem> {
    (0..n)
        .map(|i| {
            WorkItem::new(
                WorkItemId(Uuid::from_u128(i)),
                "4006381333931",
                1,
                Decimal::new(500, 2),
            )
        })
        .collect()
}

fn create_test_worker(
    id: usize,
    executor: Arc<dyn Executor>,
    queue: Arc<WorkQueue>,
    slots: usize,
) -> (Worker, mpsc::Receiver<Outcome>, broadcast::Sender<()>) {
    let (outcome_tx, outcome_rx) = mpsc::channel(100);
    let (shutdown_tx, _) = broadcast::channel(1);

    let worker = WorkerBuilder::new(id)
        .executor(executor)
        .queue(queue)
        .outcome_tx(outcome_tx)
        .semaphore(Arc::new(Semaphore::new(slots)))
        .build()
        .expect("Failed to build worker");

    (worker, outcome_rx, shutdown_tx)
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_worker_drains_queue() {
    let executor = Arc::new(MockExecutor::new(201));
    let queue = Arc::new(WorkQueue::new(work_items(5)));

    let (worker, mut outcome_rx, shutdown_tx) =
        create_test_worker(0, executor.clone(), queue.clone(), 1);

    let stats = worker
        .run(shutdown_tx.subscribe())
        .await
        .expect("Worker failed");

    assert_eq!(stats.completed, 5);
    assert_eq!(stats.failed, 0);
    assert_eq!(executor.counter.load(Ordering::SeqCst), 5);
    assert_eq!(queue.remaining().await, 0);

    let mut received = Vec::new();
    while let Ok(outcome) = outcome_rx.try_recv() {
        received.push(outcome);
    }
    assert_eq!(received.len(), 5);
    assert!(received.iter().all(|o| o.status_code() == Some(201)));
}

#[tokio::test]
async fn test_worker_empty_queue_exits_immediately() {
    let executor = Arc::new(MockExecutor::new(200));
    let queue = Arc::new(WorkQueue::default());

    let (worker, _outcome_rx, shutdown_tx) = create_test_worker(0, executor.clone(), queue, 1);
    let stats = worker.run(shutdown_tx.subscribe()).await.unwrap();

    assert_eq!(stats.total_requests(), 0);
    assert_eq!(executor.counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_workers_share_queue() {
    let executor = Arc::new(MockExecutor::new(200).with_delay(Duration::from_millis(5)));
    let queue = Arc::new(WorkQueue::new(work_items(20)));
    let (outcome_tx, mut outcome_rx) = mpsc::channel(100);
    let (shutdown_tx, _) = broadcast::channel(1);
    let semaphore = Arc::new(Semaphore::new(4));

    let mut handles = Vec::new();
    for id in 0..4 {
        let worker = WorkerBuilder::new(id)
            .executor(executor.clone())
            .queue(queue.clone())
            .outcome_tx(outcome_tx.clone())
            .semaphore(semaphore.clone())
            .build()
            .unwrap();
        let shutdown_rx = shutdown_tx.subscribe();
        handles.push(tokio::spawn(async move { worker.run(shutdown_rx).await }));
    }
    drop(outcome_tx);

    let mut total = WorkerStats::new();
    for handle in handles {
        total.merge(&handle.await.unwrap().unwrap());
    }

    let mut ids = std::collections::HashSet::new();
    while let Some(outcome) = outcome_rx.recv().await {
        assert!(ids.insert(outcome.work_item_id()));
    }

    assert_eq!(total.completed, 20);
    assert_eq!(ids.len(), 20);
}

#[tokio::test]
async fn test_worker_shutdown_cancels_in_flight_and_queued() {
    let executor = Arc::new(MockExecutor::new(200).with_delay(Duration::from_secs(30)));
    let queue = Arc::new(WorkQueue::new(work_items(3)));

    let (worker, mut outcome_rx, shutdown_tx) = create_test_worker(0, executor, queue.clone(), 1);
    let shutdown_rx = shutdown_tx.subscribe();
    let handle = tokio::spawn(async move { worker.run(shutdown_rx).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown_tx.send(()).unwrap();

    let stats = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Worker did not stop")
        .unwrap()
        .unwrap();

    assert_eq!(stats.failed, 3);
    assert_eq!(queue.remaining().await, 0);

    let first = outcome_rx.recv().await.unwrap();
    assert_eq!(first.error_description(), Some(CANCELLED_IN_FLIGHT));
    for _ in 0..2 {
        let outcome = outcome_rx.recv().await.unwrap();
        assert_eq!(outcome.error_description(), Some(CANCELLED_BEFORE_DISPATCH));
    }
}

#[tokio::test]
async fn test_worker_repeated_shutdown_still_cancels_in_flight() {
    let executor = Arc::new(MockExecutor::new(200).with_delay(Duration::from_secs(30)));
    let queue = Arc::new(WorkQueue::new(work_items(2)));

    let (worker, mut outcome_rx, shutdown_tx) = create_test_worker(0, executor, queue, 1);
    let shutdown_rx = shutdown_tx.subscribe();
    let handle = tokio::spawn(async move { worker.run(shutdown_rx).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    // The second signal overflows the one-slot channel
    shutdown_tx.send(()).unwrap();
    shutdown_tx.send(()).unwrap();

    let stats = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Worker did not stop after repeated shutdown")
        .unwrap()
        .unwrap();

    assert_eq!(stats.failed, 2);
    let first = outcome_rx.recv().await.unwrap();
    assert_eq!(first.error_description(), Some(CANCELLED_IN_FLIGHT));
}

#[tokio::test]
async fn test_worker_closed_semaphore_is_fatal() {
    let executor = Arc::new(MockExecutor::new(200));
    let queue = Arc::new(WorkQueue::new(work_items(2)));
    let (outcome_tx, _outcome_rx) = mpsc::channel(10);
    let (shutdown_tx, _) = broadcast::channel(1);
    let semaphore = Arc::new(Semaphore::new(1));
    semaphore.close();

    let worker = WorkerBuilder::new(0)
        .executor(executor)
        .queue(queue.clone())
        .outcome_tx(outcome_tx)
        .semaphore(semaphore)
        .build()
        .unwrap();

    let err = worker.run(shutdown_tx.subscribe()).await.unwrap_err();
    assert_eq!(err.kind, crate::error::BenchErrorKind::Shutdown);
    // Nothing was claimed, so nothing was lost
    assert_eq!(queue.remaining().await, 2);
}

#[tokio::test]
async fn test_worker_stops_when_channel_closed() {
    let executor = Arc::new(MockExecutor::new(200));
    let queue = Arc::new(WorkQueue::new(work_items(10)));

    let (worker, outcome_rx, shutdown_tx) = create_test_worker(0, executor, queue.clone(), 1);
    drop(outcome_rx);

    let stats = worker.run(shutdown_tx.subscribe()).await.unwrap();
    assert_eq!(stats.total_requests(), 1);
    assert_eq!(queue.remaining().await, 9);
}

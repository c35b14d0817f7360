//! Shared FIFO of orders waiting for an execution slot

use crate::request::WorkItem;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Orders not yet claimed by any worker
///
/// Ownership of a [`WorkItem`] moves to the worker that claims it; the queue
/// never hands the same item out twice.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<WorkItem>>,
}

impl WorkQueue {
    /// Create a queue holding `items` in submission order
    pub fn new(items: Vec<WorkItem>) -> Self {
        Self {
            items: Mutex::new(items.into()),
        }
    }

    /// Take the next order, if any remain
    pub async fn claim(&self) -> Option<WorkItem> {
        self.items.lock().await.pop_front()
    }

    /// Take every remaining order at once
    pub async fn drain(&self) -> Vec<WorkItem> {
        self.items.lock().await.drain(..).collect()
    }

    /// Number of unclaimed orders
    pub async fn remaining(&self) -> usize {
        self.items.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::WorkItemId;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn items(n: u128) -> Vec<WorkItem> {
        (0..n)
            .map(|i| WorkItem::new(WorkItemId(Uuid::from_u128(i)), "0000000000000", 1, Decimal::ONE))
            .collect()
    }

    #[tokio::test]
    async fn test_claim_is_fifo() {
        let queue = WorkQueue::new(items(3));

        assert_eq!(queue.claim().await.unwrap().id, WorkItemId(Uuid::from_u128(0)));
        assert_eq!(queue.claim().await.unwrap().id, WorkItemId(Uuid::from_u128(1)));
        assert_eq!(queue.remaining().await, 1);
    }

    #[tokio::test]
    async fn test_drain_empties_queue() {
        let queue = WorkQueue::new(items(4));
        queue.claim().await;

        let drained = queue.drain().await;
        assert_eq!(drained.len(), 3);
        assert!(queue.claim().await.is_none());
        assert_eq!(queue.remaining().await, 0);
    }
}

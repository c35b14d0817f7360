//! Worker module for executing orders
//!
//! A Worker is one execution slot of the dispatcher's pool. Its loop is: **claim -> execute -> report -> repeat**.
//!
//! Each Worker is a tokio task that:
//!
//! 1. Acquires an execution permit from the shared semaphore
//! 2. Claims the next order from the shared FIFO queue
//! 3. Executes it via an [`Executor`](crate::traits::Executor)
//! 4. Sends the resulting Outcome down the completion channel
//! 5. Repeats until the queue is empty or a shutdown is signalled
//!
//! Because every worker pulls from the same queue, a worker that finishes
//! early immediately takes more work; nothing is statically partitioned.
//!
//! # Example
//!
//! ```ignore
//! use order_bench_core::worker::{WorkQueue, WorkerBuilder};
//!
//! let worker = WorkerBuilder::new(0)
//!     .executor(executor)
//!     .queue(Arc::new(WorkQueue::new(items)))
//!     .outcome_tx(tx)
//!     .semaphore(semaphore)
//!     .build()?;
//!
//! let stats = worker.run(shutdown_rx).await?;
//! println!("Completed: {}", stats.completed);
//! ```

mod builder;
mod executor;
mod queue;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::{Worker, CANCELLED_BEFORE_DISPATCH, CANCELLED_IN_FLIGHT};
pub use queue::WorkQueue;
pub use stats::WorkerStats;

#[cfg(test)]
mod tests;

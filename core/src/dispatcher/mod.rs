//! Dispatcher for load run lifecycle management
//!
//! The Dispatcher coordinates one load run:
//! - Spawning a bounded pool of worker tasks over a shared queue
//! - Bounding in-flight executions via a semaphore
//! - Streaming outcomes back in completion order
//! - Managing graceful shutdown via a broadcast channel
//! - Folding outcomes into a [`Report`](crate::metrics::Report)
//!
//! # Example
//!
//! ```ignore
//! use order_bench_core::DispatcherBuilder;
//!
//! let dispatcher = DispatcherBuilder::new()
//!     .concurrency(64)
//!     .executor(executor)
//!     .build()?;
//!
//! let report = dispatcher.run(items).await?;
//! ```

mod aggregator;
mod builder;
mod executor;
mod stream;

pub use aggregator::{aggregate, aggregate_iter, Aggregator};
pub use builder::DispatcherBuilder;
pub use executor::Dispatcher;
pub use stream::OutcomeStream;

//! order-bench-core: Core data structures and the dispatch engine for order-bench
//!
//! This crate provides the foundational types used across all order-bench
//! components, including:
//!
//! - Work items and outcomes
//! - Core traits (Transport, Executor, Sampler)
//! - The bounded-concurrency dispatcher and its worker pool
//! - Report aggregation
//! - Error handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod request;
pub mod response;
pub mod traits;
pub mod worker;

pub use config::{ConfigError, DispatchConfig, LoadConfig, DEFAULT_OUTCOME_BUFFER};
pub use dispatcher::{aggregate, aggregate_iter, Aggregator, Dispatcher, DispatcherBuilder, OutcomeStream};
pub use error::*;
pub use executor::{RequestExecutor, DEFAULT_REQUEST_TIMEOUT};
pub use metrics::*;
pub use request::*;
pub use response::*;
pub use traits::*;
pub use worker::{Worker, WorkerBuilder, WorkerStats};

pub use rust_decimal::Decimal;

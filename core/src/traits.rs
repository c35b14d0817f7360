//! Core traits for transports, executors and samplers
//!
//! These traits are defined in core to avoid circular dependencies.
//! Implementations live in their respective crates (vendors/, samplers/).

use crate::request::WorkItem;
use crate::response::Outcome;
use async_trait::async_trait;
use std::time::Duration;

// ============================================================================
// Transport Trait
// ============================================================================

/// Raw HTTP response as seen by the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as text
    pub body: String,
}

/// Sends one JSON POST and waits for the reply
///
/// Implementations handle the wire details (HTTP client, TLS, pooling).
/// The executor layers latency measurement, timeout enforcement and
/// outcome classification on top.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport identifier (e.g., "reqwest")
    fn name(&self) -> &str;

    /// POST `body` to `url` with a JSON content type
    async fn send(
        &self,
        url: &str,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;
}

/// Transport-level failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Could not reach the target (refused, DNS, TLS)
    #[error("connection error: {0}")]
    Connect(String),

    /// No response within the timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The peer answered with something that is not valid HTTP
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Anything else reported by the client
    #[error("transport error: {0}")]
    Other(String),
}

// ============================================================================
// Executor Trait
// ============================================================================

/// Executes one work item against the target
///
/// Infallible: every failure mode is folded into an [`Outcome::Failure`].
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute the item and report what happened
    async fn execute(&self, item: &WorkItem) -> Outcome;
}

// ============================================================================
// Sampler Trait
// ============================================================================

/// Sampler generates work items
///
/// Samplers own their random source, so two samplers never share hidden
/// state and a seeded sampler reproduces the same sequence.
pub trait Sampler: Send {
    /// Sampler name for identification
    fn name(&self) -> &str;

    /// Generate a single work item
    fn sample(&mut self) -> WorkItem;

    /// Generate `n` work items
    fn sample_batch(&mut self, n: usize) -> Vec<WorkItem> {
        (0..n).map(|_| self.sample()).collect()
    }
}

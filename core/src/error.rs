//! Error types for order-bench-core
//!
//! Per-order failures are never errors here: they travel as
//! [`Outcome::Failure`](crate::response::Outcome::Failure) values. `BenchError`
//! is reserved for problems with the run itself (bad configuration, a broken
//! worker pool) and always aborts the run.

use thiserror::Error;

/// Category of a run-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BenchErrorKind {
    /// Invalid or missing configuration
    #[error("configuration error")]
    Config,

    /// A worker task failed or panicked
    #[error("worker error")]
    Worker,

    /// The dispatcher could not schedule or collect work
    #[error("orchestration error")]
    Orchestration,

    /// The execution pool was shut down while work was pending
    #[error("shutdown")]
    Shutdown,
}

/// Run-level error
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct BenchError {
    /// Error category
    pub kind: BenchErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl BenchError {
    /// Create an error of the given kind
    pub fn new(kind: BenchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Config, message)
    }

    /// A required builder field was not supplied
    pub fn missing_config(field: &str) -> Self {
        Self::config(format!("missing required field `{}`", field))
    }

    /// Worker failure
    pub fn worker(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Worker, message)
    }

    /// Dispatcher infrastructure failure
    pub fn orchestration(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Orchestration, message)
    }

    /// Execution slots are no longer available
    pub fn shutdown() -> Self {
        Self::new(
            BenchErrorKind::Shutdown,
            "execution pool closed before all work was scheduled",
        )
    }

    /// Whether the error means the pool itself is unusable
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind, BenchErrorKind::Config)
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;

//! Request executor: one work item in, one outcome out

use crate::request::WorkItem;
use crate::response::Outcome;
use crate::traits::{Executor, Transport, TransportError};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends work items to a fixed target through a [`Transport`]
///
/// Latency is measured around the transport call. The timeout is enforced
/// here as well as passed to the transport.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    target: String,
    timeout: Duration,
}

impl RequestExecutor {
    /// Create an executor for `target` with the default timeout
    pub fn new(transport: Arc<dyn Transport>, target: impl Into<String>) -> Self {
        Self {
            transport,
            target: target.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Target URL
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Executor for RequestExecutor {
    async fn execute(&self, item: &WorkItem) -> Outcome {
        let body = match item.to_json_bytes() {
            Ok(body) => body,
            Err(e) => {
                return Outcome::failure(item.id, format!("failed to serialize order: {}", e))
            }
        };

        let start = Instant::now();
        let sent = tokio::time::timeout(
            self.timeout,
            self.transport.send(&self.target, body, self.timeout),
        )
        .await;
        let latency = start.elapsed();

        match sent {
            Ok(Ok(response)) => Outcome::success(item.id, response.status, latency, &response.body),
            Ok(Err(e)) => {
                tracing::warn!(order_id = %item.id, error = %e, "Request failed");
                Outcome::failure(item.id, e.to_string())
            }
            Err(_) => {
                let e = TransportError::Timeout(self.timeout);
                tracing::warn!(order_id = %item.id, error = %e, "Request failed");
                Outcome::failure(item.id, e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("transport", &self.transport.name())
            .field("target", &self.target)
            .field("timeout", &self.timeout)
            .finish()
    }
}

//! reqwest-backed HTTP transport
//!
//! One [`HttpTransport`] wraps one pooled `reqwest::Client` that is shared
//! by every concurrent execution of a run.

use std::time::Duration;

use async_trait::async_trait;
use order_bench_core::{Transport, TransportError, TransportResponse};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use thiserror::Error;

/// Errors raised while building the HTTP client
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// A timeout value is out of acceptable range
    #[error("invalid connect timeout: {0:?}")]
    InvalidTimeout(Duration),

    /// The underlying client could not be created
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Client-level settings of the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransportConfig {
    /// Time allowed to establish a connection
    pub connect_timeout: Duration,

    /// Idle connections kept per host, `None` for reqwest's default
    pub pool_max_idle_per_host: Option<usize>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: None,
        }
    }
}

impl HttpTransportConfig {
    /// Keep at most `size` idle connections per host
    pub fn with_pool_size(mut self, size: usize) -> Self {
        self.pool_max_idle_per_host = Some(size);
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn validate(&self) -> Result<(), HttpTransportError> {
        if self.connect_timeout.is_zero() {
            return Err(HttpTransportError::InvalidTimeout(self.connect_timeout));
        }
        Ok(())
    }
}

/// POSTs JSON bodies with reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Transport with default client settings
    pub fn new() -> Result<Self, HttpTransportError> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Transport sized for `concurrency` simultaneous requests
    pub fn with_pool_size(concurrency: usize) -> Result<Self, HttpTransportError> {
        Self::with_config(HttpTransportConfig::default().with_pool_size(concurrency))
    }

    /// Transport with explicit client settings
    pub fn with_config(config: HttpTransportConfig) -> Result<Self, HttpTransportError> {
        config.validate()?;

        let mut builder = Client::builder().connect_timeout(config.connect_timeout);
        if let Some(size) = config.pool_max_idle_per_host {
            builder = builder.pool_max_idle_per_host(size);
        }

        tracing::debug!(
            connect_timeout_ms = config.connect_timeout.as_millis() as u64,
            pool_max_idle_per_host = ?config.pool_max_idle_per_host,
            "Building HTTP client"
        );

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "reqwest"
    }

    async fn send(
        &self,
        url: &str,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .timeout(timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| map_error(e, timeout))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| map_error(e, timeout))?;

        Ok(TransportResponse { status, body })
    }
}

/// Classify a reqwest failure
fn map_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_connect() {
        TransportError::Connect(error_chain(&err))
    } else if err.is_request() || err.is_body() || err.is_decode() {
        TransportError::Protocol(error_chain(&err))
    } else {
        TransportError::Other(error_chain(&err))
    }
}

/// reqwest's top-level message omits the cause ("error sending request"),
/// so append the source chain
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

//! Outcome of executing one work item

use crate::request::WorkItemId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum number of characters kept from a response body
pub const RESPONSE_EXCERPT_CHARS: usize = 200;

/// Result of attempting one work item
///
/// Any HTTP response, whatever its status, is a `Success`: the status code is
/// reported, not judged. Only transport-level problems (connect errors,
/// timeouts, malformed responses) produce a `Failure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A response was received
    Success {
        /// Correlated work item
        work_item_id: WorkItemId,
        /// HTTP status code
        status_code: u16,
        /// Wall-clock latency of the request
        latency: Duration,
        /// First characters of the response body
        response_excerpt: String,
    },

    /// No response could be obtained
    Failure {
        /// Correlated work item
        work_item_id: WorkItemId,
        /// Description of what went wrong
        error_description: String,
    },
}

impl Outcome {
    /// Build a `Success`, truncating the body to the excerpt length
    pub fn success(
        work_item_id: WorkItemId,
        status_code: u16,
        latency: Duration,
        body: &str,
    ) -> Self {
        Outcome::Success {
            work_item_id,
            status_code,
            latency,
            response_excerpt: excerpt(body),
        }
    }

    /// Build a `Failure`
    pub fn failure(work_item_id: WorkItemId, error_description: impl Into<String>) -> Self {
        Outcome::Failure {
            work_item_id,
            error_description: error_description.into(),
        }
    }

    /// Id of the work item this outcome belongs to
    pub fn work_item_id(&self) -> WorkItemId {
        match self {
            Outcome::Success { work_item_id, .. } | Outcome::Failure { work_item_id, .. } => {
                *work_item_id
            }
        }
    }

    /// Check if a response was received
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Check if the request failed at the transport level
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Status code, for successes
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Outcome::Success { status_code, .. } => Some(*status_code),
            Outcome::Failure { .. } => None,
        }
    }

    /// Latency, for successes
    pub fn latency(&self) -> Option<Duration> {
        match self {
            Outcome::Success { latency, .. } => Some(*latency),
            Outcome::Failure { .. } => None,
        }
    }

    /// Error description, for failures
    pub fn error_description(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure {
                error_description, ..
            } => Some(error_description),
        }
    }
}

/// Keep at most [`RESPONSE_EXCERPT_CHARS`] characters, cutting on a char boundary
fn excerpt(body: &str) -> String {
    match body.char_indices().nth(RESPONSE_EXCERPT_CHARS) {
        Some((idx, _)) => body[..idx].to_string(),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id() -> WorkItemId {
        WorkItemId(Uuid::nil())
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let body = "x".repeat(500);
        let outcome = Outcome::success(id(), 201, Duration::from_millis(5), &body);

        match outcome {
            Outcome::Success {
                response_excerpt, ..
            } => assert_eq!(response_excerpt.len(), RESPONSE_EXCERPT_CHARS),
            _ => panic!("Expected Success variant"),
        }
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let body = "é".repeat(300);
        let outcome = Outcome::success(id(), 200, Duration::ZERO, &body);

        match outcome {
            Outcome::Success {
                response_excerpt, ..
            } => assert_eq!(response_excerpt.chars().count(), RESPONSE_EXCERPT_CHARS),
            _ => panic!("Expected Success variant"),
        }
    }

    #[test]
    fn test_short_body_kept_whole() {
        let outcome = Outcome::success(id(), 200, Duration::ZERO, "{\"ok\":true}");
        assert!(matches!(
            outcome,
            Outcome::Success { ref response_excerpt, .. } if response_excerpt == "{\"ok\":true}"
        ));
    }

    #[test]
    fn test_accessors() {
        let ok = Outcome::success(id(), 500, Duration::from_millis(10), "");
        assert!(ok.is_success());
        assert_eq!(ok.status_code(), Some(500));
        assert_eq!(ok.latency(), Some(Duration::from_millis(10)));
        assert_eq!(ok.error_description(), None);

        let failed = Outcome::failure(id(), "connection refused");
        assert!(failed.is_failure());
        assert_eq!(failed.status_code(), None);
        assert_eq!(failed.latency(), None);
        assert_eq!(failed.error_description(), Some("connection refused"));
        assert_eq!(failed.work_item_id(), id());
    }
}

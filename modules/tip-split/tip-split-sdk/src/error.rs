//! Tip-split error types.
//!
//! Transport-agnostic error definitions for the suggestion boundary.

use thiserror::Error;

/// Error type for suggestion operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TipSplitError {
    /// The suggestion service is not configured (missing endpoint or credentials).
    #[error("suggestion service not configured: {message}")]
    NotConfigured { message: String },

    /// Network or TLS failure while talking to the service.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The service answered with a non-success status.
    #[error("upstream error: status {status_code}: {message}")]
    Upstream { status_code: u16, message: String },

    /// The service answered but the payload could not be used.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// Internal error.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl TipSplitError {
    /// Create a not configured error.
    #[must_use]
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::NotConfigured {
            message: message.into(),
        }
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Create an upstream status error.
    #[must_use]
    pub fn upstream(status_code: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status_code,
            message: message.into(),
        }
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            TipSplitError::upstream(503, "overloaded").to_string(),
            "upstream error: status 503: overloaded"
        );
        assert_eq!(
            TipSplitError::timeout(1500).to_string(),
            "request timed out after 1500 ms"
        );
        assert_eq!(
            TipSplitError::not_configured("missing api key").to_string(),
            "suggestion service not configured: missing api key"
        );
    }
}

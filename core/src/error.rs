//! Error types for the todo API client.
//!
//! # Design
//! Nothing is caught or translated on the way out: a non-2xx response keeps
//! its raw status and body, a transport failure keeps the underlying message,
//! and a body that fails to decode keeps the parser's message. Callers that
//! care about the cause inspect the variant.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods, transports, and `TodoApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// No response arrived before the configured deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request never completed: bad URI, unreachable host, reset, ...
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    /// HTTP status carried by the error, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_status_and_body() {
        let err = ApiError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_timeout());
    }

    #[test]
    fn timeout_has_no_status() {
        let err = ApiError::Timeout("global".to_string());
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
    }
}

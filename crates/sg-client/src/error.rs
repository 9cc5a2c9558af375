//! Error type for batch changes API clients
//!
//! Cancellation is a first-class variant: callers racing a request against a
//! newer one must be able to tell "the token fired" apart from a real
//! transport or API failure, because cancelled requests are never surfaced
//! to the user.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors produced by a [`crate::BatchChangesClient`] implementation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The supplied cancellation token fired before the request completed.
    #[error("request cancelled")]
    Cancelled,

    /// The HTTP transport failed (connect, TLS, timeout, body read).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("api returned status {status}: {message}")]
    Status {
        /// HTTP status code of the response
        status: u16,
        /// Response body (truncated upstream if very large)
        message: String,
    },

    /// The GraphQL layer reported errors in an otherwise well-formed response.
    #[error("graphql error: {0}")]
    Api(String),

    /// The response body could not be decoded into the expected shape.
    #[error("malformed api payload: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether this error came from the cancellation token rather than the
    /// remote. Cancelled requests must not reach the user.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cancelled_variant_is_cancelled() {
        assert!(ClientError::Cancelled.is_cancelled());
        assert!(!ClientError::Api("boom".to_string()).is_cancelled());
        assert!(!ClientError::Decode("truncated".to_string()).is_cancelled());
        assert!(!ClientError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        }
        .is_cancelled());
    }

    #[test]
    fn test_status_display_carries_code_and_body() {
        let err = ClientError::Status {
            status: 401,
            message: "token expired".to_string(),
        };
        assert_eq!(err.to_string(), "api returned status 401: token expired");
    }
}

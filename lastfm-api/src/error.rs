//! Error types for the Last.fm API client.

use serde_json::Value;
use thiserror::Error;

/// Error code the web service uses for an invalid or expired session key.
pub const INVALID_SESSION_CODE: i64 = 9;

/// Errors that can occur when interacting with the Last.fm API.
#[derive(Debug, Error)]
pub enum LastfmError {
    /// Session problem: missing locally, or rejected by the server.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The API returned an `error` field other than the invalid-session code.
    ///
    /// Common codes:
    /// - `4`  — authentication failed
    /// - `6`  — invalid parameters
    /// - `10` — invalid API key
    /// - `13` — invalid method signature
    /// - `29` — rate limit exceeded
    #[error("API error (code {code}): {message}")]
    Api {
        /// Last.fm error code (not HTTP status).
        code: i64,
        /// Human-readable error message from the API.
        message: String,
        /// The full decoded error body.
        payload: Value,
    },

    /// The HTTP exchange itself failed (connect, DNS, timeout, TLS).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body was not JSON, or lacked an expected field.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A signed method was called but no API secret is configured.
    #[error("API secret is required to sign this method")]
    MissingSecret,
}

impl LastfmError {
    /// Whether the caller should re-authenticate and retry with a new session.
    pub fn is_invalid_session(&self) -> bool {
        matches!(self, Self::Session(SessionError::InvalidSession { .. }))
    }

    /// Remote error code, if the server reported one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } | Self::Session(SessionError::InvalidSession { code, .. }) => {
                Some(*code)
            }
            _ => None,
        }
    }
}

/// Session-key failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An authenticated method was called with no session key available.
    /// Raised before any network request is made.
    #[error("no session key provided")]
    MissingSessionKey,

    /// The server rejected the session key (error code 9).
    #[error("invalid session (code {code}): {message}")]
    InvalidSession {
        code: i64,
        message: String,
        payload: Value,
    },
}

/// Network-level failure reported by a [`Transport`](crate::transport::Transport).
///
/// `code` is `7` for connection failures, `28` for timeouts and `0` otherwise.
#[derive(Debug, Clone, Error)]
#[error("transport error (code {code}): {message}")]
pub struct TransportError {
    pub code: i64,
    pub message: String,
}

impl TransportError {
    pub const CONNECT: i64 = 7;
    pub const TIMEOUT: i64 = 28;
    pub const OTHER: i64 = 0;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            Self::TIMEOUT
        } else if err.is_connect() {
            Self::CONNECT
        } else {
            Self::OTHER
        };
        Self::new(code, err.to_string())
    }
}

/// Convenience alias for `Result<T, LastfmError>`.
pub type Result<T> = std::result::Result<T, LastfmError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_session_is_detected() {
        let err = LastfmError::from(SessionError::InvalidSession {
            code: 9,
            message: "Invalid session key".into(),
            payload: json!({ "error": 9 }),
        });
        assert!(err.is_invalid_session());
        assert_eq!(err.api_code(), Some(9));
    }

    #[test]
    fn missing_key_is_not_invalid_session() {
        let err = LastfmError::from(SessionError::MissingSessionKey);
        assert!(!err.is_invalid_session());
        assert_eq!(err.api_code(), None);
        assert_eq!(err.to_string(), "no session key provided");
    }

    #[test]
    fn transport_error_display() {
        let err = LastfmError::from(TransportError::new(TransportError::TIMEOUT, "timed out"));
        assert_eq!(err.to_string(), "transport error (code 28): timed out");
    }
}

//! The submission error type.

use thiserror::Error;

use crate::traits::HttpError;

/// Failure of a debate submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DebateError {
    /// Request rejected by local validation
    #[error("Invalid debate request: {0}")]
    InvalidRequest(String),

    /// No response was received
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Backend answered with a non-success status
    #[error("Request failed ({status})")]
    Transport { status: u16, message: String },

    /// Response has no streamable body
    #[error("Request failed: response has no body")]
    MissingBody,

    /// Body read failed after the stream opened
    #[error("Stream interrupted: {0}")]
    Stream(String),

    /// No chunk arrived within the idle timeout
    #[error("No data received from the debate server for {after_secs} seconds")]
    IdleTimeout { after_secs: u64 },

    /// The whole debate took longer than the deadline
    #[error("Debate did not finish within {after_secs} seconds")]
    DeadlineExceeded { after_secs: u64 },

    /// Submission cancelled by the caller
    #[error("Debate cancelled")]
    Cancelled,
}

impl DebateError {
    /// Text recorded as the session's last error.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, for transport failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            DebateError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DebateError::InvalidRequest(_) => "DEBATE_INVALID_REQUEST",
            DebateError::Connection(_) => "DEBATE_CONNECTION",
            DebateError::Transport { .. } => "DEBATE_TRANSPORT",
            DebateError::MissingBody => "DEBATE_MISSING_BODY",
            DebateError::Stream(_) => "DEBATE_STREAM",
            DebateError::IdleTimeout { .. } => "DEBATE_IDLE_TIMEOUT",
            DebateError::DeadlineExceeded { .. } => "DEBATE_DEADLINE",
            DebateError::Cancelled => "DEBATE_CANCELLED",
        }
    }
}

impl From<HttpError> for DebateError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => DebateError::Transport { status, message },
            HttpError::ConnectionFailed(msg) | HttpError::InvalidUrl(msg) => {
                DebateError::Connection(msg)
            }
            HttpError::Timeout(msg) | HttpError::Io(msg) | HttpError::Other(msg) => {
                DebateError::Stream(msg)
            }
            HttpError::NoBody => DebateError::MissingBody,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_contains_status() {
        let err = DebateError::Transport {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.user_message(), "Request failed (503)");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.error_code(), "DEBATE_TRANSPORT");
    }

    #[test]
    fn test_from_http_error() {
        let err: DebateError = HttpError::ServerError {
            status: 422,
            message: "prompt too short".to_string(),
        }
        .into();
        assert!(matches!(err, DebateError::Transport { status: 422, .. }));

        let err: DebateError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(err, DebateError::Connection("refused".to_string()));

        let err: DebateError = HttpError::Io("reset".to_string()).into();
        assert_eq!(err.user_message(), "Stream interrupted: reset");

        let err: DebateError = HttpError::NoBody.into();
        assert_eq!(err, DebateError::MissingBody);
    }

    #[test]
    fn test_timeout_messages() {
        assert_eq!(
            DebateError::IdleTimeout { after_secs: 30 }.user_message(),
            "No data received from the debate server for 30 seconds"
        );
        assert_eq!(
            DebateError::DeadlineExceeded { after_secs: 600 }.user_message(),
            "Debate did not finish within 600 seconds"
        );
        assert_eq!(DebateError::Cancelled.status(), None);
    }
}

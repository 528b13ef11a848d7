//! Client errors
//!
//! Every call either yields the decoded resource or one of these. Callers in
//! the runner reduce them to absent/present results, so the variants only
//! need to carry what is worth logging.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, TLS, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered, but not with the status the endpoint succeeds with
    #[error("unexpected status {status} (expected {expected}): {body}")]
    UnexpectedStatus {
        status: StatusCode,
        expected: StatusCode,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    #[error("could not decode response: {0}")]
    Decode(String),

    /// A path parameter was empty, so no request was sent
    #[error("{0} must not be empty")]
    EmptyParameter(&'static str),
}

impl ClientError {
    pub(crate) fn unexpected_status(
        status: StatusCode,
        expected: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedStatus {
            status,
            expected,
            body: body.into(),
        }
    }

    /// Status the API answered with, if it answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Decode(_) | Self::EmptyParameter(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| status.is_server_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguished() {
        let err = ClientError::unexpected_status(StatusCode::NOT_FOUND, StatusCode::OK, "missing");
        assert!(err.is_not_found());
        assert!(!err.is_server_error());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_unexpected_status_message_carries_body() {
        let err = ClientError::unexpected_status(
            StatusCode::SERVICE_UNAVAILABLE,
            StatusCode::CREATED,
            "down",
        );
        assert!(err.is_server_error());
        assert_eq!(
            err.to_string(),
            "unexpected status 503 Service Unavailable (expected 201 Created): down"
        );
    }

    #[test]
    fn test_local_errors_have_no_status() {
        assert_eq!(ClientError::EmptyParameter("run id").status(), None);
        assert_eq!(
            ClientError::EmptyParameter("run id").to_string(),
            "run id must not be empty"
        );
        assert!(!ClientError::Decode("eof".into()).is_not_found());
    }
}

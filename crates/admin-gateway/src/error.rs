//! Error types for gateway operations

use reqwest::StatusCode;

/// Why a token refresh did not produce a new access token.
///
/// `Clone` because one refresh outcome is handed to every queued request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    #[error("no refresh token stored")]
    MissingRefreshToken,

    #[error("refresh token rejected: {0}")]
    Rejected(String),

    #[error("refresh call failed: {0}")]
    Failed(String),

    #[error("refresh abandoned before completion")]
    Abandoned,
}

impl From<admin_auth::Error> for RefreshError {
    fn from(err: admin_auth::Error) -> Self {
        match err {
            admin_auth::Error::InvalidCredentials(msg) => RefreshError::Rejected(msg),
            other => RefreshError::Failed(other.to_string()),
        }
    }
}

/// Errors surfaced to gateway callers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("session expired: {0}")]
    Refresh(#[from] RefreshError),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the session is gone and the user has to log in again.
    ///
    /// An abandoned refresh ran no teardown, so the session is still usable.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::Refresh(e) if *e != RefreshError::Abandoned)
    }
}

/// Result alias for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

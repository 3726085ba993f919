//! Error types for resource calls

/// Errors from typed resource operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport, status, or session failure from the gateway
    #[error(transparent)]
    Gateway(#[from] admin_gateway::Error),

    /// Backend answered with `isSuccess: false`
    #[error("{0}")]
    Rejected(String),

    /// Input refused before any request was sent
    #[error("invalid input: {0}")]
    Validation(String),

    /// Response body did not have the expected shape
    #[error("{0}")]
    Format(String),
}

impl Error {
    /// Whether the session ended and a fresh login is required.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::Gateway(e) if e.is_session_expired())
    }
}

/// Result alias for resource operations.
pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by [`crate::ApiClient`] and the typed endpoint wrappers.
pub enum ApiError {
    /// The request never produced an HTTP response (network error, CORS, abort).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },
    /// The token-refresh endpoint refused the stored refresh token.
    #[error("token refresh rejected with status {status}")]
    RefreshRejected {
        /// HTTP status code returned by the refresh endpoint.
        status: u16,
    },
    /// A response body could not be decoded, or a request body could not be encoded.
    #[error("invalid payload: {0}")]
    Decode(String),
    /// The token store could not persist refreshed credentials.
    #[error("token storage failed: {0}")]
    Storage(String),
    /// A request was rejected locally before it was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::RefreshRejected { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` when the stored session can no longer be renewed and the user must sign in
    /// again.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::RefreshRejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rejected_refresh_ends_the_session() {
        assert!(ApiError::RefreshRejected { status: 403 }.is_session_expired());
        assert!(!ApiError::Status {
            status: 403,
            body: String::new(),
        }
        .is_session_expired());
        assert!(!ApiError::Transport("offline".to_string()).is_session_expired());
    }
}

//! API error taxonomy

use crate::core::session::StorageError;

/// Authentication failures. Both are resolved by sending the user to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// No stored session; the request was never sent
    #[error("You are not logged in")]
    NoSession,

    /// Token rejected and could not be refreshed; the session has been cleared
    #[error("Your session has expired, please log in again")]
    Expired,
}

/// No response reached the client (offline, DNS, timeout, CORS)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Network error: {0}")]
pub struct TransportError(pub String);

/// Errors surfaced by API calls
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Well-formed non-2xx response; `message` is the server's text
    #[error("{message}")]
    Application { status: u16, message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Rejected locally before any request was sent
    #[error("{0}")]
    Validation(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Whether the caller should redirect to the login page
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// Transient failures worth offering a retry for
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// HTTP status for application errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Application { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login() {
        assert!(ApiError::from(AuthFailure::NoSession).requires_login());
        assert!(ApiError::from(AuthFailure::Expired).requires_login());
        assert!(!ApiError::from(TransportError("offline".into())).requires_login());
        assert!(
            !ApiError::Application {
                status: 403,
                message: "Forbidden".into()
            }
            .requires_login()
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(ApiError::from(TransportError("timeout".into())).is_retryable());
        assert!(!ApiError::from(AuthFailure::Expired).is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::Application {
                status: 401,
                message: "Invalid email or password".into()
            }
            .to_string(),
            "Invalid email or password"
        );
        assert_eq!(
            ApiError::from(TransportError("connection refused".into())).to_string(),
            "Network error: connection refused"
        );
        assert_eq!(
            ApiError::from(AuthFailure::Expired).to_string(),
            "Your session has expired, please log in again"
        );
    }
}

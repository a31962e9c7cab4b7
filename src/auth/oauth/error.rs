//! Authentication error types.
//!
//! # Example
//!
//! ```rust
//! use ringplus::auth::AuthError;
//!
//! let error = AuthError::StateMismatch {
//!     expected: "abc123".to_string(),
//!     received: "xyz789".to_string(),
//! };
//! assert!(error.to_string().contains("abc123"));
//! ```

use crate::clients::TransportError;
use thiserror::Error;

/// Errors raised while obtaining or applying an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token provider has no access token.
    #[error("no access token available")]
    MissingToken,

    /// A refresh was requested but no refresh token is held.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// The `state` returned in the redirect does not match the one sent.
    #[error("state parameter mismatch: expected '{expected}', received '{received}'")]
    StateMismatch {
        /// The state generated for the authorization URL.
        expected: String,
        /// The state found in the redirect.
        received: String,
    },

    /// The redirect URL is malformed or reports an authorization failure.
    #[error("invalid callback: {reason}")]
    InvalidCallback {
        /// What is wrong with the callback.
        reason: String,
    },

    /// The token endpoint rejected the exchange.
    #[error("token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// The token endpoint could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::TransportErrorKind;

    #[test]
    fn test_state_mismatch_includes_expected_and_received() {
        let error = AuthError::StateMismatch {
            expected: "abc123".to_string(),
            received: "xyz789".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("expected 'abc123'"));
        assert!(message.contains("received 'xyz789'"));
    }

    #[test]
    fn test_token_exchange_failed_includes_status_and_message() {
        let error = AuthError::TokenExchangeFailed {
            status: 401,
            message: "invalid_client".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "token exchange failed with status 401: invalid_client"
        );
    }

    #[test]
    fn test_from_transport_error() {
        let error: AuthError =
            TransportError::new(TransportErrorKind::Connect, "connection refused").into();
        assert!(matches!(error, AuthError::Transport(_)));
        assert_eq!(error.to_string(), "connect: connection refused");
    }

    #[test]
    fn test_missing_token_message() {
        assert_eq!(AuthError::MissingToken.to_string(), "no access token available");
    }
}

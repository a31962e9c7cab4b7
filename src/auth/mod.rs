//! Authentication for the RingPlus API.
//!
//! The client asks a [`TokenProvider`] for a bearer token before every
//! request. Two providers ship with the crate:
//!
//! - [`StaticToken`]: a fixed token obtained elsewhere
//! - [`OAuthHandler`]: the OAuth 2.0 authorization-code flow, with refresh
//!
//! # Example
//!
//! ```rust
//! use ringplus::auth::{StaticToken, TokenProvider};
//!
//! let auth = StaticToken::new("access-token");
//! assert_eq!(auth.access_token().as_deref(), Some("access-token"));
//! ```

use std::fmt;

pub mod oauth;
pub mod session;

pub use oauth::{AuthCallback, AuthError, OAuthHandler, StateParam};
pub use session::AccessToken;

/// Supplies the bearer token attached to every API request.
///
/// Returning `None` makes the call fail with [`AuthError::MissingToken`]
/// before any network I/O.
pub trait TokenProvider: Send + Sync + fmt::Debug {
    /// Returns the current access token, if any.
    fn access_token(&self) -> Option<String>;
}

/// A fixed access token.
///
/// The `Debug` implementation masks the token.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    /// Wraps an access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A provider with no token; every call fails with
    /// [`AuthError::MissingToken`].
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone().filter(|token| !token.is_empty())
    }
}

impl From<AccessToken> for StaticToken {
    fn from(token: AccessToken) -> Self {
        Self::new(token.access_token)
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("StaticToken(*****)"),
            None => f.write_str("StaticToken(None)"),
        }
    }
}

// Verify auth types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StaticToken>();
};

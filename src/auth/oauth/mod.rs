//! OAuth 2.0 authorization-code flow for RingPlus.
//!
//! 1. **Authorization** ([`OAuthHandler::authorization_url`]): build the URL
//!    that sends the user to RingPlus, with a CSRF [`StateParam`].
//! 2. **Code exchange** ([`OAuthHandler::fetch_token_from_redirect`] or
//!    [`OAuthHandler::fetch_token`]): validate the redirect and trade the
//!    code for an [`AccessToken`](crate::auth::AccessToken).
//! 3. **Refresh** ([`OAuthHandler::refresh_token`]): trade the refresh token
//!    for a new access token.
//!
//! Every failure is an [`AuthError`].

mod callback;
mod error;
mod handler;
mod state;

pub use callback::AuthCallback;
pub use error::AuthError;
pub use handler::OAuthHandler;
pub use state::StateParam;

//! The OAuth `state` parameter used for CSRF protection.
//!
//! [`OAuthHandler::authorization_url`](super::OAuthHandler::authorization_url)
//! generates a fresh [`StateParam`] and remembers it; the redirect back from
//! RingPlus must carry the same value or the token exchange is refused.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

/// A random, URL-safe state value.
///
/// # Example
///
/// ```rust
/// use ringplus::auth::StateParam;
///
/// let state = StateParam::new();
/// assert_eq!(state.as_ref().len(), 30);
/// assert!(state.matches(state.as_ref()));
/// assert!(!state.matches("forged"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam(String);

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    const LENGTH: usize = 30;

    /// Generates a new random state.
    #[must_use]
    pub fn new() -> Self {
        let value = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect();
        Self(value)
    }

    /// Wraps a caller-provided state value as-is.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns `true` if `received` is this state.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        self.0 == received
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

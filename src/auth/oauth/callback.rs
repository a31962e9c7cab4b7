//! Parsing of the redirect RingPlus sends back after authorization.

use crate::auth::oauth::AuthError;

/// The query parameters of an OAuth redirect.
///
/// # Example
///
/// ```rust
/// use ringplus::auth::AuthCallback;
///
/// let callback = AuthCallback::from_redirect_url(
///     "https://example.com/callback?code=abc%2F123&state=xyz",
/// )
/// .unwrap();
/// assert_eq!(callback.code, "abc/123");
/// assert_eq!(callback.state.as_deref(), Some("xyz"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthCallback {
    /// The authorization code to exchange.
    pub code: String,
    /// The state echoed back by the server.
    pub state: Option<String>,
}

impl AuthCallback {
    /// Extracts the code and state from a full redirect URL.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCallback`] if the redirect reports an
    /// error (`error=access_denied`, ...) or carries no `code`.
    pub fn from_redirect_url(url: &str) -> Result<Self, AuthError> {
        let query = url
            .split_once('?')
            .map(|(_, query)| query)
            .unwrap_or_default();
        let query = query.split_once('#').map_or(query, |(query, _)| query);

        let mut code = None;
        let mut state = None;
        let mut error = None;
        let mut description = None;

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(value)?;
            match key {
                "code" => code = Some(value),
                "state" => state = Some(value),
                "error" => error = Some(value),
                "error_description" => description = Some(value),
                _ => {}
            }
        }

        if let Some(error) = error {
            let reason = description.map_or_else(|| error.clone(), |d| format!("{error}: {d}"));
            return Err(AuthError::InvalidCallback { reason });
        }

        let code = code
            .filter(|code| !code.is_empty())
            .ok_or_else(|| AuthError::InvalidCallback {
                reason: "redirect URL has no authorization code".to_string(),
            })?;

        Ok(Self { code, state })
    }
}

fn decode(value: &str) -> Result<String, AuthError> {
    let value = value.replace('+', " ");
    urlencoding::decode(&value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| AuthError::InvalidCallback {
            reason: format!("malformed query value: {e}"),
        })
}
